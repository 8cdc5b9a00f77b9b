//! WebP encoding, lossy and lossless.
//!
//! Uses the `webp` crate (libwebp bindings) because the pure-Rust `image`
//! codecs have no quality-controlled lossy WebP encoder. Both modes are
//! deterministic: libwebp applies no dithering or randomized search at the
//! default method settings.

use webp::{Encoder, PixelLayout};

use super::{EncodeError, EncodeSettings, Prepared};

/// Encode prepared pixel data as WebP.
///
/// Lossy mode uses `settings.quality`; lossless mode ignores it (the value
/// is still validated upstream). Gray input is expanded to RGB since
/// libwebp has no gray layout.
pub(crate) fn encode(prepared: &Prepared, settings: &EncodeSettings) -> Result<Vec<u8>, EncodeError> {
    let (width, height) = prepared.dimensions();

    let expanded;
    let (pixels, layout): (&[u8], PixelLayout) = match prepared {
        Prepared::Rgb(img) => (img.as_raw(), PixelLayout::Rgb),
        Prepared::Rgba(img) => (img.as_raw(), PixelLayout::Rgba),
        Prepared::Luma(img) => {
            expanded = gray_to_rgb(img);
            (&expanded, PixelLayout::Rgb)
        }
    };

    let encoder = Encoder::new(pixels, layout, width, height);
    let memory = if settings.lossless {
        encoder.encode_lossless()
    } else {
        encoder.encode(settings.quality as f32)
    };

    if memory.is_empty() {
        return Err(EncodeError::EncodingFailed(
            "libwebp returned an empty buffer".to_string(),
        ));
    }
    Ok(memory.to_vec())
}

fn gray_to_rgb(img: &image::GrayImage) -> Vec<u8> {
    let mut out = Vec::with_capacity(img.len() * 3);
    for px in img.pixels() {
        out.extend_from_slice(&[px.0[0], px.0[0], px.0[0]]);
    }
    out
}


// ============================================================================
// Property-Based Tests
// ============================================================================
