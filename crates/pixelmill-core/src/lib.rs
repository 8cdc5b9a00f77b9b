//! Pixelmill Core - Image codec and analysis engine
//!
//! This crate is the host-agnostic core behind the Pixelmill ABI: format
//! detection, decoding, quality-controlled re-encoding (including lossy and
//! lossless WebP), batch processing with per-item failure isolation, and
//! pluggable AI-based content analysis.
//!
//! Every exported operation is a pure function over caller-owned bytes:
//! decode state lives only for the duration of one call and nothing is
//! shared between calls. Hosts (browser WASM, Node, Electron) wrap this
//! crate; see `pixelmill-wasm` for the WebAssembly surface.

pub mod analyze;
pub mod batch;
pub mod decode;
pub mod encode;
pub mod format;
pub mod pipeline;
pub mod resize;

mod util;

pub use analyze::{
    analyze_image, analyze_image_response, check_model_availability, AnalysisError,
    AnalysisOptions, AnalysisResponse, BackendKind, ImageAnalysis,
};
pub use batch::{
    batch_analyze_images, batch_compress_to_webp, batch_convert_image_format, BatchError,
    BatchItem,
};
pub use decode::{decode, image_info, DecodeError, ImageInfo, PixelBuffer};
pub use encode::{encode, ColorSpace, EncodeError, EncodeSettings};
pub use format::{supported_formats, FormatInfo, ImageFormat};
pub use pipeline::{
    compress_to_webp, convert_image_format, CodecError, CompressOptions, CompressResult,
    ConversionOptions, ConvertResult,
};
pub use resize::ResizeOptions;

/// Health-check probe used by hosts to verify the module is wired up.
pub fn plus_100(input: u32) -> u32 {
    input + 100
}
