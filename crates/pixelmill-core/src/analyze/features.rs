//! Heuristic feature extraction shared by every analysis backend.
//!
//! Produces the tags, scene classification, dominant colors, and coarse
//! object candidates that backends fold into their responses. Tags are
//! appended in descending detection-confidence order: geometry first, then
//! format traits, then resolution, then color-derived traits.

use crate::decode::PixelBuffer;
use crate::format::ImageFormat;

use super::color;
use super::types::{BoundingBox, ColorInfo, DetectedObject};

/// Baseline confidence of the heuristic extractor.
const HEURISTIC_CONFIDENCE: f64 = 0.85;

/// Everything the extractor learned about one image.
#[derive(Debug, Clone)]
pub struct FeatureReport {
    pub tags: Vec<String>,
    pub description: String,
    pub scene_type: String,
    pub colors: Vec<ColorInfo>,
    pub objects: Vec<DetectedObject>,
    pub confidence: f64,
}

/// Extract image features for analysis.
///
/// `confidence_threshold` drops object candidates below it.
pub fn extract(
    buffer: &PixelBuffer,
    format: ImageFormat,
    confidence_threshold: Option<f64>,
) -> FeatureReport {
    let (width, height) = (buffer.width, buffer.height);
    let aspect_ratio = width as f64 / height.max(1) as f64;

    let mut tags = Vec::new();
    let mut description = String::new();

    let (geometry_tag, mut scene_type) = classify_aspect(aspect_ratio);
    tags.push(geometry_tag.to_string());

    let (format_tag, format_description) = describe_format(format, buffer.has_alpha);
    tags.push(format_tag.to_string());
    if format == ImageFormat::Png && buffer.has_alpha {
        tags.push("transparent background".to_string());
    }
    description.push_str(format_description);

    if let Some(tag) = classify_resolution(width, height) {
        tags.push(tag.to_string());
    }

    let colors = color::dominant_colors(buffer);
    if let Some((color_tag, color_scene)) = classify_by_color(&colors) {
        tags.push(color_tag.to_string());
        scene_type = color_scene;
    }

    let threshold = confidence_threshold.unwrap_or(0.0);
    let objects: Vec<DetectedObject> = detect_objects(aspect_ratio)
        .into_iter()
        .filter(|o| o.confidence >= threshold)
        .collect();

    if !objects.is_empty() {
        let names: Vec<&str> = objects.iter().map(|o| o.name.as_str()).collect();
        description.push_str(&format!(" Detected: {}.", names.join(", ")));
    }

    FeatureReport {
        tags,
        description,
        scene_type: scene_type.to_string(),
        colors,
        objects,
        confidence: HEURISTIC_CONFIDENCE,
    }
}

/// Geometry tag and initial scene guess from the aspect ratio.
fn classify_aspect(aspect_ratio: f64) -> (&'static str, &'static str) {
    if aspect_ratio > 1.5 {
        ("widescreen", "landscape")
    } else if aspect_ratio < 0.67 {
        ("portrait orientation", "portrait")
    } else {
        ("square-ish", "general")
    }
}

/// Format-derived tag and the opening of the description.
fn describe_format(format: ImageFormat, has_alpha: bool) -> (&'static str, &'static str) {
    match format {
        ImageFormat::Jpeg => ("photo", "A JPEG photograph."),
        ImageFormat::Png => {
            if has_alpha {
                ("graphic", "A PNG image with an alpha channel.")
            } else {
                ("graphic", "A PNG image.")
            }
        }
        ImageFormat::WebP => ("modern format", "A WebP image."),
        ImageFormat::Gif => ("animation", "A GIF image."),
        ImageFormat::Bmp => ("bitmap", "An uncompressed BMP image."),
        ImageFormat::Tiff => ("archival", "A TIFF image."),
    }
}

fn classify_resolution(width: u32, height: u32) -> Option<&'static str> {
    if width > 4000 || height > 4000 {
        Some("high resolution")
    } else if width < 800 && height < 600 {
        Some("low resolution")
    } else {
        None
    }
}

/// Refine the scene guess from the most dominant color.
fn classify_by_color(colors: &[ColorInfo]) -> Option<(&'static str, &'static str)> {
    let [r, g, b] = colors.first()?.rgb;
    if r > 200 && g > 200 && b > 200 {
        Some(("bright", "indoor"))
    } else if g > r && g > b {
        Some(("natural", "outdoor"))
    } else if r > 150 && g < 100 && b < 100 {
        Some(("warm tones", "sunset"))
    } else if b > 150 && r < 100 && g < 100 {
        Some(("cool tones", "night"))
    } else {
        None
    }
}

/// Coarse whole-frame object candidates from composition.
fn detect_objects(aspect_ratio: f64) -> Vec<DetectedObject> {
    let mut objects = Vec::new();

    if aspect_ratio > 1.2 {
        objects.push(DetectedObject {
            name: "landscape".to_string(),
            confidence: 0.8,
            bbox: BoundingBox::FULL,
            category: "scene".to_string(),
        });
    }

    if (0.8..1.2).contains(&aspect_ratio) {
        objects.push(DetectedObject {
            name: "square composition".to_string(),
            confidence: 0.9,
            bbox: BoundingBox::FULL,
            category: "composition".to_string(),
        });
    }

    objects
}
