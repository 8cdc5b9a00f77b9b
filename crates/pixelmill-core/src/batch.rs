//! Batch orchestration with per-item failure isolation.
//!
//! A batch call maps each input to an output slot at the same index; one
//! item's failure is recorded in its slot and never aborts, reorders, or
//! contaminates siblings. Items are independent pure operations, so native
//! builds may fan them out across a rayon pool while wasm builds run them
//! sequentially — the results are identical either way.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analyze::{self, AnalysisError, AnalysisOptions, ImageAnalysis};
use crate::pipeline::{
    self, CompressOptions, CompressResult, ConversionOptions, ConvertResult,
};

/// A failed batch item: the index it occupies and why it failed.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("item {index}: {message}")]
pub struct BatchError {
    /// Position of the failed item in the input list.
    pub index: usize,
    /// Human-readable failure description.
    pub message: String,
}

/// One slot of a batch result, index-aligned with the input list.
pub type BatchItem<T> = Result<T, BatchError>;

/// Run `op` over every item, producing an index-aligned result list.
///
/// Panics inside `op` are caught per item on native targets and surfaced as
/// that item's error; a codec bug in one image must not take down the rest
/// of the batch.
fn run_batch<I, T, F>(items: &[I], op: F) -> Vec<BatchItem<T>>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> Result<T, String> + Sync,
{
    let run_one = |(index, item): (usize, &I)| -> BatchItem<T> {
        catch_item(&op, item)
            .map_err(|message| BatchError { index, message })
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items.par_iter().enumerate().map(run_one).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items.iter().enumerate().map(run_one).collect()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn catch_item<I, T, F>(op: &F, item: &I) -> Result<T, String>
where
    F: Fn(&I) -> Result<T, String>,
{
    std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| op(item)))
        .unwrap_or_else(|panic| Err(describe_panic(panic)))
}

// wasm32 panics abort the instance and cannot be caught; nothing to wrap.
#[cfg(target_arch = "wasm32")]
fn catch_item<I, T, F>(op: &F, item: &I) -> Result<T, String>
where
    F: Fn(&I) -> Result<T, String>,
{
    op(item)
}

#[cfg(not(target_arch = "wasm32"))]
fn describe_panic(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("codec panic: {s}")
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("codec panic: {s}")
    } else {
        "codec panic".to_string()
    }
}

/// Compress every image to WebP; see [`pipeline::compress_to_webp`].
pub fn batch_compress_to_webp(
    images: &[Vec<u8>],
    options: &CompressOptions,
) -> Vec<BatchItem<CompressResult>> {
    log::debug!("batch_compress_to_webp: {} items", images.len());
    run_batch(images, |bytes| {
        pipeline::compress_to_webp(bytes, options).map_err(|e| e.to_string())
    })
}

/// Convert every image to the target format; see
/// [`pipeline::convert_image_format`].
pub fn batch_convert_image_format(
    images: &[Vec<u8>],
    options: &ConversionOptions,
) -> Vec<BatchItem<ConvertResult>> {
    log::debug!("batch_convert_image_format: {} items", images.len());
    run_batch(images, |bytes| {
        pipeline::convert_image_format(bytes, options).map_err(|e| e.to_string())
    })
}

/// Analyze every image; see [`analyze::analyze_image`].
pub fn batch_analyze_images(
    images: &[Vec<u8>],
    options: &AnalysisOptions,
) -> Vec<BatchItem<ImageAnalysis>> {
    log::debug!("batch_analyze_images: {} items", images.len());
    run_batch(images, |bytes| {
        analyze::analyze_image(bytes, options).map_err(|e: AnalysisError| e.to_string())
    })
}
