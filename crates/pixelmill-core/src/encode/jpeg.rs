//! JPEG encoding via the `image` crate's encoder.
//!
//! JPEG has no alpha; the transparency policy in [`super::prepare`]
//! guarantees this encoder only ever sees RGB or gray data.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{EncodeError, Prepared};

/// Encode prepared pixel data as JPEG with the given quality.
///
/// Quality 0 is clamped to 1 (the codec rejects 0); everything above that
/// is passed through unchanged.
pub(crate) fn encode(prepared: &Prepared, quality: u8) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = prepared.dimensions();
    let quality = quality.max(1);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    let result = match prepared {
        Prepared::Rgb(img) => {
            encoder.write_image(img.as_raw(), width, height, ExtendedColorType::Rgb8)
        }
        Prepared::Luma(img) => {
            encoder.write_image(img.as_raw(), width, height, ExtendedColorType::L8)
        }
        Prepared::Rgba(_) => {
            return Err(EncodeError::EncodingFailed(
                "JPEG encoder received alpha pixel data".to_string(),
            ))
        }
    };

    result.map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;
    Ok(buffer.into_inner())
}
