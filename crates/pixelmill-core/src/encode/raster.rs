//! PNG, GIF, BMP, and TIFF encoding via the `image` crate.
//!
//! These targets are quality-free: PNG/BMP/TIFF are lossless, and GIF's
//! palette quantization has no quality knob. The shared option validation
//! and transparency policy already ran by the time this encoder is called.

use std::io::Cursor;

use image::DynamicImage;

use super::{EncodeError, Prepared};
use crate::format::ImageFormat;

/// Encode prepared pixel data with one of the `image` crate's encoders.
pub(crate) fn encode(prepared: &Prepared, target: ImageFormat) -> Result<Vec<u8>, EncodeError> {
    let output_format = target
        .to_image_output()
        .ok_or_else(|| EncodeError::UnsupportedTarget(target.name().to_string()))?;

    let dynamic = match prepared {
        Prepared::Rgb(img) => DynamicImage::ImageRgb8(img.clone()),
        Prepared::Rgba(img) => DynamicImage::ImageRgba8(img.clone()),
        Prepared::Luma(img) => DynamicImage::ImageLuma8(img.clone()),
    };

    // BMP stores no 8-bit gray, and the GIF encoder takes only Rgb8/Rgba8;
    // widen gray to RGB for those targets.
    let needs_widening = matches!(target, ImageFormat::Bmp | ImageFormat::Gif);
    let dynamic = if needs_widening && matches!(prepared, Prepared::Luma(_)) {
        DynamicImage::ImageRgb8(dynamic.into_rgb8())
    } else {
        dynamic
    };

    let mut buffer = Cursor::new(Vec::new());
    dynamic
        .write_to(&mut buffer, output_format)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}
