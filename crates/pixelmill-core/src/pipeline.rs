//! Compression and conversion pipelines.
//!
//! Both operations compose decode → optional resize → encode over one
//! transient pixel buffer, then report size and ratio metrics. Every call is
//! pure with respect to its inputs: the same bytes and options always
//! produce byte-identical output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{self, DecodeError};
use crate::encode::{self, ColorSpace, EncodeError, EncodeSettings};
use crate::format::ImageFormat;
use crate::resize::{self, ResizeOptions};
use crate::util::Stopwatch;

/// Failure of a compress or convert operation.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Options for `compress_to_webp`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompressOptions {
    /// Lossy quality, 0..=100 (default 80).
    pub quality: Option<u8>,
    /// Use lossless WebP (default false). Quality is then ignored but
    /// still validated.
    pub lossless: Option<bool>,
}

impl CompressOptions {
    fn to_settings(&self) -> EncodeSettings {
        EncodeSettings {
            quality: self.quality.unwrap_or(80),
            lossless: self.lossless.unwrap_or(false),
            // WebP holds alpha in both modes; nothing to composite away.
            preserve_transparency: true,
            color_space: ColorSpace::Rgb,
        }
    }
}

/// Options for `convert_image_format`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Target format name ("jpeg", "png", "webp", "gif", "bmp", "tiff",
    /// plus the "jpg"/"tif" aliases).
    pub target_format: String,
    /// Lossy quality, 0..=100 (default 80).
    #[serde(default)]
    pub quality: Option<u8>,
    /// Keep alpha rather than compositing it away (default true).
    #[serde(default)]
    pub preserve_transparency: Option<bool>,
    /// Use the target's lossless mode where it has one (default false).
    #[serde(default)]
    pub lossless: Option<bool>,
    /// Output pixel layout (default rgb).
    #[serde(default)]
    pub color_space: Option<ColorSpace>,
    /// Optional output dimensions.
    #[serde(default)]
    pub resize: Option<ResizeOptions>,
}

impl ConversionOptions {
    fn to_settings(&self) -> EncodeSettings {
        EncodeSettings {
            quality: self.quality.unwrap_or(80),
            lossless: self.lossless.unwrap_or(false),
            preserve_transparency: self.preserve_transparency.unwrap_or(true),
            color_space: self.color_space.unwrap_or_default(),
        }
    }
}

/// Result of `compress_to_webp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompressResult {
    /// Encoded WebP bytes.
    pub data: Vec<u8>,
    /// Input size in bytes.
    pub original_size: u32,
    /// Output size in bytes.
    pub compressed_size: u32,
    /// `(original - compressed) / original`. Negative when the encoding
    /// enlarged the file; deliberately not clamped.
    pub compression_ratio: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Wall-clock time of the operation in milliseconds (0.0 on wasm32,
    /// which has no monotonic clock without a JS import).
    pub elapsed_ms: f64,
}

/// Result of `convert_image_format`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConvertResult {
    /// Encoded bytes in the target format.
    pub data: Vec<u8>,
    /// Input size in bytes.
    pub original_size: u32,
    /// Output size in bytes.
    pub converted_size: u32,
    /// `(original - converted) / original`, unclamped.
    pub compression_ratio: f64,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Source width in pixels.
    pub original_width: u32,
    /// Source height in pixels.
    pub original_height: u32,
    /// Wall-clock time of the operation in milliseconds.
    pub elapsed_ms: f64,
}

/// Compress image bytes to WebP.
pub fn compress_to_webp(
    image_data: &[u8],
    options: &CompressOptions,
) -> Result<CompressResult, CodecError> {
    let watch = Stopwatch::start();

    let buffer = decode::decode(image_data)?;
    let settings = options.to_settings();
    let data = encode::encode(&buffer, ImageFormat::WebP, &settings)?;

    let original_size = image_data.len() as u32;
    let compressed_size = data.len() as u32;
    log::debug!(
        "compress_to_webp: {}x{} {} -> {} bytes",
        buffer.width,
        buffer.height,
        original_size,
        compressed_size
    );

    Ok(CompressResult {
        compression_ratio: size_ratio(original_size, compressed_size),
        width: buffer.width,
        height: buffer.height,
        original_size,
        compressed_size,
        elapsed_ms: watch.elapsed_ms(),
        data,
    })
}

/// Convert image bytes to another format, optionally resizing.
pub fn convert_image_format(
    image_data: &[u8],
    options: &ConversionOptions,
) -> Result<ConvertResult, CodecError> {
    let watch = Stopwatch::start();

    let target = ImageFormat::from_name(&options.target_format)
        .ok_or_else(|| EncodeError::UnsupportedTarget(options.target_format.clone()))?;

    let buffer = decode::decode(image_data)?;
    let (original_width, original_height) = (buffer.width, buffer.height);

    let buffer = match &options.resize {
        Some(r) if !r.is_noop() => {
            resize::validate(r)?;
            let (w, h) = resize::target_dimensions(original_width, original_height, r);
            resize::apply(&buffer, w, h)?
        }
        _ => buffer,
    };

    let settings = options.to_settings();
    let data = encode::encode(&buffer, target, &settings)?;

    let original_size = image_data.len() as u32;
    let converted_size = data.len() as u32;
    log::debug!(
        "convert_image_format: {} {}x{} -> {} {}x{}",
        original_size,
        original_width,
        original_height,
        converted_size,
        buffer.width,
        buffer.height
    );

    Ok(ConvertResult {
        compression_ratio: size_ratio(original_size, converted_size),
        width: buffer.width,
        height: buffer.height,
        original_width,
        original_height,
        original_size,
        converted_size,
        elapsed_ms: watch.elapsed_ms(),
        data,
    })
}

/// Space saved as a fraction of the input size. Negative on enlargement.
fn size_ratio(original: u32, output: u32) -> f64 {
    (original as f64 - output as f64) / original as f64
}
