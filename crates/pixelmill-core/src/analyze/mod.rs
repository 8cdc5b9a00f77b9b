//! Image analysis dispatcher.
//!
//! Normalizes heterogeneous backend configurations into one request shape,
//! dispatches on the backend tag, and returns the uniform result shape. One
//! operation runs straight through: decode, extract, shape, return — the
//! dispatcher keeps no state between calls.

mod backend;
mod color;
mod features;
mod types;

pub use backend::{backend_for, check_model_availability, ModelBackend, NormalizedRequest};
pub use types::{
    AnalysisError, AnalysisOptions, AnalysisResponse, BackendKind, BoundingBox, ColorInfo,
    DetectedObject, ImageAnalysis,
};

use crate::decode;
use crate::util::Stopwatch;

/// Analyze image bytes with the configured backend.
pub fn analyze_image(
    image_data: &[u8],
    options: &AnalysisOptions,
) -> Result<ImageAnalysis, AnalysisError> {
    let watch = Stopwatch::start();

    let (format, buffer) = decode::decode_with_format(image_data)?;
    let backend = backend_for(options.backend);
    let mut analysis = backend.analyze(&buffer, image_data, format, options)?;
    analysis.analysis_time_ms = watch.elapsed_ms();

    Ok(analysis)
}

/// Analyze and shape into the `{success, result | error}` ABI union.
pub fn analyze_image_response(image_data: &[u8], options: &AnalysisOptions) -> AnalysisResponse {
    AnalysisResponse::from_result(analyze_image(image_data, options))
}
