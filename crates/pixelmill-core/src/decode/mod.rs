//! Image decoding pipeline.
//!
//! The decoder trusts content sniffing only: the byte signature selects the
//! format, and the filename (if the host even has one) is never consulted.
//! Decoding produces a transient [`PixelBuffer`] that lives for exactly one
//! engine operation.
//!
//! All operations are synchronous; there is no state shared between calls.

mod types;

pub use types::{DecodeError, ImageInfo, PixelBuffer};

use std::io::Cursor;

use image::ImageReader;

use crate::format::ImageFormat;

/// Decode image bytes into a [`PixelBuffer`].
///
/// # Errors
///
/// * [`DecodeError::Empty`] for zero-length input
/// * [`DecodeError::UnsupportedFormat`] when the signature matches no
///   registered format
/// * [`DecodeError::Corrupt`] when the signature matched but the payload
///   failed to parse
pub fn decode(bytes: &[u8]) -> Result<PixelBuffer, DecodeError> {
    let (_, buffer) = decode_with_format(bytes)?;
    Ok(buffer)
}

/// Decode image bytes, also reporting the sniffed container format.
pub fn decode_with_format(bytes: &[u8]) -> Result<(ImageFormat, PixelBuffer), DecodeError> {
    let format = types::sniff_required(bytes)?;

    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format.to_image_decode());
    let img = reader
        .decode()
        .map_err(|e| DecodeError::Corrupt(e.to_string()))?;

    let (channels, has_alpha) = types::layout_of(img.color());
    let rgba = img.into_rgba8();
    Ok((
        format,
        PixelBuffer::from_rgba_image(rgba, channels, has_alpha),
    ))
}

/// Inspect image bytes without keeping the pixel data.
///
/// Backs the `get_image_info` ABI call: reports dimensions, the sniffed
/// format, the encoded size, and the stored channel count.
pub fn image_info(bytes: &[u8]) -> Result<ImageInfo, DecodeError> {
    let (format, buffer) = decode_with_format(bytes)?;
    Ok(ImageInfo {
        width: buffer.width,
        height: buffer.height,
        format: format.name().to_string(),
        size: bytes.len(),
        channels: buffer.channels,
    })
}
