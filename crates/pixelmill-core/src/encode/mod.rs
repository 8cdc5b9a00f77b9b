//! Image encoding pipeline.
//!
//! Each target format has its own encoder; this module owns the shared
//! option validation and the color-space/transparency policy applied before
//! any encoder runs.
//!
//! # Transparency policy
//!
//! When the target format cannot hold alpha and the source has it:
//! `preserve_transparency = true` fails with
//! [`EncodeError::TransparencyUnsupported`]; `preserve_transparency = false`
//! composites the image over an opaque white background. When the target
//! does support alpha, a preserved alpha channel passes through unchanged.

mod jpeg;
mod raster;
pub mod webp;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::PixelBuffer;
use crate::format::ImageFormat;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The requested target format name is not in the registry.
    #[error("Unsupported target format: {0}")]
    UnsupportedTarget(String),

    /// The source has alpha, the target cannot store it, and the caller
    /// asked for transparency to be preserved.
    #[error("Target format {0} cannot preserve transparency")]
    TransparencyUnsupported(&'static str),

    /// Out-of-range or contradictory options.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// The underlying codec rejected the image.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Requested pixel layout for the encoded output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSpace {
    #[default]
    Rgb,
    Rgba,
    Grayscale,
}

/// Per-encode settings, shared by every target format.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodeSettings {
    /// Lossy quality knob, 0..=100. Ignored by lossless-only formats and by
    /// lossless WebP, but always validated.
    pub quality: u8,
    /// Use the lossless mode where the target has one.
    pub lossless: bool,
    /// Keep the alpha channel rather than compositing it away.
    pub preserve_transparency: bool,
    /// Base pixel layout for the output.
    pub color_space: ColorSpace,
}

impl Default for EncodeSettings {
    fn default() -> Self {
        Self {
            quality: 80,
            lossless: false,
            preserve_transparency: true,
            color_space: ColorSpace::Rgb,
        }
    }
}

/// Pixel data after color-space and transparency resolution, ready for a
/// format-specific encoder.
pub(crate) enum Prepared {
    Rgb(image::RgbImage),
    Rgba(image::RgbaImage),
    Luma(image::GrayImage),
}

impl Prepared {
    pub(crate) fn dimensions(&self) -> (u32, u32) {
        match self {
            Prepared::Rgb(img) => img.dimensions(),
            Prepared::Rgba(img) => img.dimensions(),
            Prepared::Luma(img) => img.dimensions(),
        }
    }
}

/// Validate settings that apply to every target.
pub(crate) fn validate_settings(settings: &EncodeSettings) -> Result<(), EncodeError> {
    if settings.quality > 100 {
        return Err(EncodeError::InvalidOptions(format!(
            "quality must be 0..=100, got {}",
            settings.quality
        )));
    }
    Ok(())
}

/// Resolve color space and transparency policy for a target format.
///
/// An explicit grayscale request always composites alpha away: a gray
/// output has no use for the channel and every target can store gray.
pub(crate) fn prepare(
    buffer: &PixelBuffer,
    target: ImageFormat,
    settings: &EncodeSettings,
) -> Result<Prepared, EncodeError> {
    if settings.color_space == ColorSpace::Grayscale {
        let rgb = buffer.to_rgb_composited();
        let luma = image::DynamicImage::ImageRgb8(rgb).into_luma8();
        return Ok(Prepared::Luma(luma));
    }

    let needs_alpha = buffer.has_alpha && settings.preserve_transparency;
    let wants_alpha = needs_alpha || settings.color_space == ColorSpace::Rgba;

    if wants_alpha && target.supports_transparency() {
        let rgba = buffer.to_rgba_image().ok_or_else(|| {
            EncodeError::EncodingFailed("pixel buffer does not match its dimensions".to_string())
        })?;
        return Ok(Prepared::Rgba(rgba));
    }

    if needs_alpha {
        // Target can't hold it and the caller insisted.
        return Err(EncodeError::TransparencyUnsupported(target.name()));
    }

    Ok(Prepared::Rgb(buffer.to_rgb_composited()))
}

/// Encode a pixel buffer to the target format.
pub fn encode(
    buffer: &PixelBuffer,
    target: ImageFormat,
    settings: &EncodeSettings,
) -> Result<Vec<u8>, EncodeError> {
    validate_settings(settings)?;
    let prepared = prepare(buffer, target, settings)?;

    match target {
        ImageFormat::WebP => webp::encode(&prepared, settings),
        ImageFormat::Jpeg => jpeg::encode(&prepared, settings.quality),
        ImageFormat::Png | ImageFormat::Gif | ImageFormat::Bmp | ImageFormat::Tiff => {
            raster::encode(&prepared, target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_buffer(alpha: u8) -> PixelBuffer {
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 50, 25, alpha]));
        PixelBuffer::from_rgba_image(img, 4, true)
    }

    fn rgb_buffer() -> PixelBuffer {
        let img = image::RgbaImage::from_pixel(8, 8, image::Rgba([200, 50, 25, 255]));
        PixelBuffer::from_rgba_image(img, 3, false)
    }

    #[test]
    fn test_validate_quality_range() {
        let mut settings = EncodeSettings::default();
        settings.quality = 100;
        assert!(validate_settings(&settings).is_ok());

        settings.quality = 101;
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_quality_validated_even_when_lossless() {
        let settings = EncodeSettings {
            quality: 150,
            lossless: true,
            ..Default::default()
        };
        let buffer = rgb_buffer();
        assert!(matches!(
            encode(&buffer, ImageFormat::WebP, &settings),
            Err(EncodeError::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_prepare_alpha_preserved_for_capable_target() {
        let buffer = rgba_buffer(128);
        let prepared = prepare(&buffer, ImageFormat::Png, &EncodeSettings::default()).unwrap();
        assert!(matches!(prepared, Prepared::Rgba(_)));
    }

    #[test]
    fn test_prepare_alpha_rejected_for_jpeg() {
        let buffer = rgba_buffer(128);
        let result = prepare(&buffer, ImageFormat::Jpeg, &EncodeSettings::default());
        assert!(matches!(result, Err(EncodeError::TransparencyUnsupported("jpeg"))));
    }

    #[test]
    fn test_prepare_alpha_composited_when_not_preserved() {
        let buffer = rgba_buffer(0);
        let settings = EncodeSettings {
            preserve_transparency: false,
            ..Default::default()
        };
        let prepared = prepare(&buffer, ImageFormat::Jpeg, &settings).unwrap();
        match prepared {
            // Fully transparent over white is white
            Prepared::Rgb(img) => assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]),
            _ => panic!("expected RGB output"),
        }
    }

    #[test]
    fn test_prepare_grayscale_request() {
        let buffer = rgb_buffer();
        let settings = EncodeSettings {
            color_space: ColorSpace::Grayscale,
            ..Default::default()
        };
        let prepared = prepare(&buffer, ImageFormat::Png, &settings).unwrap();
        assert!(matches!(prepared, Prepared::Luma(_)));
    }

    #[test]
    fn test_prepare_rgba_request_opaque_source() {
        let buffer = rgb_buffer();
        let settings = EncodeSettings {
            color_space: ColorSpace::Rgba,
            ..Default::default()
        };
        let prepared = prepare(&buffer, ImageFormat::Png, &settings).unwrap();
        assert!(matches!(prepared, Prepared::Rgba(_)));
    }

    #[test]
    fn test_encode_every_target_from_opaque_source() {
        let buffer = rgb_buffer();
        let settings = EncodeSettings::default();
        for target in ImageFormat::ALL {
            let bytes = encode(&buffer, target, &settings).unwrap();
            assert!(!bytes.is_empty(), "empty output for {target:?}");
            // Output must sniff back to the requested container
            assert_eq!(ImageFormat::sniff(&bytes), Some(target), "bad magic for {target:?}");
        }
    }

    #[test]
    fn test_encode_grayscale_every_target() {
        let buffer = rgb_buffer();
        let settings = EncodeSettings {
            color_space: ColorSpace::Grayscale,
            ..Default::default()
        };
        for target in ImageFormat::ALL {
            let bytes = encode(&buffer, target, &settings).unwrap();
            assert_eq!(ImageFormat::sniff(&bytes), Some(target), "bad magic for {target:?}");
        }
    }

    #[test]
    fn test_encode_deterministic() {
        let buffer = rgba_buffer(200);
        let settings = EncodeSettings::default();
        let a = encode(&buffer, ImageFormat::WebP, &settings).unwrap();
        let b = encode(&buffer, ImageFormat::WebP, &settings).unwrap();
        assert_eq!(a, b);
    }
}
