//! Dominant-color extraction and naming.
//!
//! Colors are quantized to 16 levels per channel and sampled on a coarse
//! grid, so the result is stable and cheap even for large images.

use std::collections::HashMap;

use crate::decode::PixelBuffer;

use super::types::ColorInfo;

/// How many dominant colors to report at most.
const MAX_COLORS: usize = 5;

/// Colors below this share of sampled pixels are dropped.
const MIN_SHARE: f64 = 0.01;

/// Extract the dominant colors of an image, most frequent first.
pub fn dominant_colors(buffer: &PixelBuffer) -> Vec<ColorInfo> {
    let step_x = (buffer.width / 64).max(1);
    let step_y = (buffer.height / 64).max(1);

    let mut counts: HashMap<[u8; 3], u32> = HashMap::new();
    let mut sampled = 0u32;

    let mut y = 0;
    while y < buffer.height {
        let mut x = 0;
        while x < buffer.width {
            let idx = ((y * buffer.width + x) * 4) as usize;
            let quantized = [
                (buffer.pixels[idx] / 16) * 16,
                (buffer.pixels[idx + 1] / 16) * 16,
                (buffer.pixels[idx + 2] / 16) * 16,
            ];
            *counts.entry(quantized).or_insert(0) += 1;
            sampled += 1;
            x += step_x;
        }
        y += step_y;
    }

    if sampled == 0 {
        return Vec::new();
    }

    let mut ranked: Vec<([u8; 3], u32)> = counts.into_iter().collect();
    // Count descending, then RGB ascending so equal counts rank stably.
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(MAX_COLORS)
        .filter_map(|(rgb, count)| {
            let percentage = count as f64 / sampled as f64;
            if percentage < MIN_SHARE {
                return None;
            }
            Some(ColorInfo {
                name: color_name(rgb).to_string(),
                hex: format!("#{:02X}{:02X}{:02X}", rgb[0], rgb[1], rgb[2]),
                rgb,
                percentage,
            })
        })
        .collect()
}

/// Rough human-readable name for an RGB value.
pub fn color_name(rgb: [u8; 3]) -> &'static str {
    let [r, g, b] = rgb;
    if r > 200 && g > 200 && b > 200 {
        "white"
    } else if r < 50 && g < 50 && b < 50 {
        "black"
    } else if r > 150 && g > 150 && b < 100 {
        "yellow"
    } else if r > 150 && g < 100 && b > 150 {
        "purple"
    } else if r < 100 && g > 150 && b > 150 {
        "cyan"
    } else if r > g && r > b {
        "red"
    } else if g > r && g > b {
        "green"
    } else if b > r && b > g {
        "blue"
    } else {
        "mixed"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgba: [u8; 4]) -> PixelBuffer {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
        PixelBuffer::from_rgba_image(img, 4, true)
    }

    #[test]
    fn test_solid_image_single_color() {
        let buffer = solid(32, 32, [208, 16, 16, 255]);
        let colors = dominant_colors(&buffer);

        assert_eq!(colors.len(), 1);
        assert_eq!(colors[0].rgb, [208, 16, 16]);
        assert_eq!(colors[0].name, "red");
        assert_eq!(colors[0].hex, "#D01010");
        assert!((colors[0].percentage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_color_image_ordering() {
        // Left three-quarters red, right quarter blue
        let img = image::RgbaImage::from_fn(64, 16, |x, _| {
            if x < 48 {
                image::Rgba([240, 0, 0, 255])
            } else {
                image::Rgba([0, 0, 240, 255])
            }
        });
        let buffer = PixelBuffer::from_rgba_image(img, 3, false);
        let colors = dominant_colors(&buffer);

        assert!(colors.len() >= 2);
        assert_eq!(colors[0].name, "red");
        assert_eq!(colors[1].name, "blue");
        assert!(colors[0].percentage > colors[1].percentage);
    }

    #[test]
    fn test_minor_colors_dropped() {
        // A single off-color pixel in a 64x64 field is below 1%
        let mut img = image::RgbaImage::from_pixel(64, 64, image::Rgba([16, 160, 16, 255]));
        img.put_pixel(0, 0, image::Rgba([240, 240, 240, 255]));
        let buffer = PixelBuffer::from_rgba_image(img, 3, false);

        let colors = dominant_colors(&buffer);
        assert!(colors.iter().all(|c| c.name != "white"));
    }

    #[test]
    fn test_color_name_table() {
        assert_eq!(color_name([255, 255, 255]), "white");
        assert_eq!(color_name([10, 10, 10]), "black");
        assert_eq!(color_name([200, 30, 30]), "red");
        assert_eq!(color_name([30, 200, 30]), "green");
        assert_eq!(color_name([30, 30, 200]), "blue");
        assert_eq!(color_name([200, 200, 50]), "yellow");
        assert_eq!(color_name([200, 50, 200]), "purple");
        assert_eq!(color_name([50, 200, 200]), "cyan");
        assert_eq!(color_name([100, 100, 100]), "mixed");
    }

    #[test]
    fn test_deterministic() {
        let buffer = solid(100, 60, [64, 128, 192, 255]);
        assert_eq!(dominant_colors(&buffer), dominant_colors(&buffer));
    }
}
