//! Core types for image decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::format::ImageFormat;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Zero bytes of input.
    #[error("Empty image data")]
    Empty,

    /// The byte signature matches no registered format.
    #[error("Unsupported or unrecognized image format")]
    UnsupportedFormat,

    /// The signature matched but the payload failed to parse.
    #[error("Corrupt image data: {0}")]
    Corrupt(String),
}

/// A decoded image held as RGBA pixel data.
///
/// The buffer is transient: it is created by [`super::decode`], consumed by
/// the resize/encode steps of a single operation, and never retained across
/// calls. Pixels are normalized to RGBA8 regardless of the source layout;
/// `channels` records the source layout's channel count so callers can still
/// report it.
#[derive(Debug, Clone)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel count of the source image (1, 2, 3, or 4).
    pub channels: u8,
    /// Whether the source format carried an alpha channel.
    pub has_alpha: bool,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap an `image::RgbaImage` along with the source layout description.
    pub fn from_rgba_image(img: image::RgbaImage, channels: u8, has_alpha: bool) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            channels,
            has_alpha,
            pixels: img.into_raw(),
        }
    }

    /// Convert back to an `image::RgbaImage` for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Drop alpha by compositing over an opaque white background.
    pub fn to_rgb_composited(&self) -> image::RgbImage {
        let mut out = image::RgbImage::new(self.width, self.height);
        for (dst, src) in out.pixels_mut().zip(self.pixels.chunks_exact(4)) {
            let a = src[3] as u16;
            dst.0 = [
                ((src[0] as u16 * a + 255 * (255 - a)) / 255) as u8,
                ((src[1] as u16 * a + 255 * (255 - a)) / 255) as u8,
                ((src[2] as u16 * a + 255 * (255 - a)) / 255) as u8,
            ];
        }
        out
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }
}

/// Shape of the `get_image_info` report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageInfo {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Detected container format name ("jpeg", "png", ...).
    pub format: String,
    /// Encoded size in bytes.
    pub size: usize,
    /// Channel count of the stored pixel layout.
    pub channels: u8,
}

/// Channel count and alpha flag for an `image` crate color type.
pub(crate) fn layout_of(color: image::ColorType) -> (u8, bool) {
    let channels = color.channel_count();
    (channels, color.has_alpha())
}

/// The detected format as a registry value, for error shaping.
pub(crate) fn sniff_required(bytes: &[u8]) -> Result<ImageFormat, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }
    ImageFormat::sniff(bytes).ok_or(DecodeError::UnsupportedFormat)
}
