//! Analysis backends and their dispatch.
//!
//! Each supported backend implements [`ModelBackend`]: it validates its own
//! configuration, normalizes the request into the shape its service expects
//! (base64 payload plus prompt), and shapes the uniform [`ImageAnalysis`]
//! result. The inference transport itself is host-provided and out of the
//! engine's scope; content features come from the built-in extractor.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::decode::PixelBuffer;
use crate::format::ImageFormat;

use super::features;
use super::types::{AnalysisError, AnalysisOptions, BackendKind, ImageAnalysis};

/// The prompt every vision backend receives.
const ANALYSIS_PROMPT: &str =
    "Analyze this image: describe the content, main objects, colors, and scene type.";

/// A request normalized for one backend's wire shape.
#[derive(Debug, Clone)]
pub struct NormalizedRequest {
    /// Model identifier the backend should run.
    pub model: String,
    /// Base64-encoded image payload.
    pub payload: String,
    /// Instruction prompt.
    pub prompt: &'static str,
}

/// Capability interface over the named analysis backends.
pub trait ModelBackend {
    /// Stable backend tag.
    fn kind(&self) -> BackendKind;

    /// Check configuration, failing with [`AnalysisError::BackendUnavailable`]
    /// when the backend cannot run.
    fn ensure_available(&self, options: &AnalysisOptions) -> Result<(), AnalysisError>;

    /// The model identifier this run would use.
    fn model_name(&self, options: &AnalysisOptions) -> String;

    /// Analyze a decoded image.
    fn analyze(
        &self,
        buffer: &PixelBuffer,
        raw: &[u8],
        format: ImageFormat,
        options: &AnalysisOptions,
    ) -> Result<ImageAnalysis, AnalysisError> {
        self.ensure_available(options)?;
        let request = self.normalize(raw, options);

        let report = features::extract(buffer, format, options.confidence_threshold);
        log::debug!(
            "analyze via {}: model={}, payload={} bytes",
            self.kind().name(),
            request.model,
            request.payload.len()
        );

        Ok(ImageAnalysis {
            image_type: format.name().to_string(),
            tags: report.tags,
            description: report.description,
            confidence: report.confidence,
            objects: report.objects,
            colors: report.colors,
            scene_type: report.scene_type,
            analysis_time_ms: 0.0,
            model_used: request.model,
        })
    }

    /// Build the backend-specific request shape.
    fn normalize(&self, raw: &[u8], options: &AnalysisOptions) -> NormalizedRequest {
        NormalizedRequest {
            model: self.model_name(options),
            payload: BASE64.encode(raw),
            prompt: ANALYSIS_PROMPT,
        }
    }
}

/// Qwen vision-language API. Remote, key-gated.
pub struct QwenBackend;

impl ModelBackend for QwenBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Qwen
    }

    fn ensure_available(&self, options: &AnalysisOptions) -> Result<(), AnalysisError> {
        if options.api_key.as_deref().unwrap_or("").is_empty() {
            return Err(AnalysisError::BackendUnavailable(
                "qwen requires an api key".to_string(),
            ));
        }
        Ok(())
    }

    fn model_name(&self, options: &AnalysisOptions) -> String {
        options
            .model_path
            .clone()
            .unwrap_or_else(|| "qwen-vl-plus".to_string())
    }
}

/// Local Ollama server.
pub struct OllamaBackend;

impl OllamaBackend {
    pub const DEFAULT_ENDPOINT: &'static str = "http://localhost:11434";
}

impl ModelBackend for OllamaBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Ollama
    }

    fn ensure_available(&self, options: &AnalysisOptions) -> Result<(), AnalysisError> {
        // Endpoint defaults to the local server; an explicitly empty one is
        // a configuration mistake.
        if matches!(options.endpoint.as_deref(), Some("")) {
            return Err(AnalysisError::BackendUnavailable(
                "ollama endpoint is empty".to_string(),
            ));
        }
        Ok(())
    }

    fn model_name(&self, options: &AnalysisOptions) -> String {
        options
            .model_path
            .clone()
            .unwrap_or_else(|| "llava".to_string())
    }
}

/// Local Shimmy inference server backed by an on-disk model file.
pub struct ShimmyBackend;

impl ModelBackend for ShimmyBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Shimmy
    }

    fn ensure_available(&self, options: &AnalysisOptions) -> Result<(), AnalysisError> {
        let path = options.model_path.as_deref().unwrap_or("");
        if path.is_empty() {
            return Err(AnalysisError::BackendUnavailable(
                "shimmy requires a model path".to_string(),
            ));
        }
        if !check_model_availability(path) {
            return Err(AnalysisError::BackendUnavailable(format!(
                "shimmy model not found: {path}"
            )));
        }
        Ok(())
    }

    fn model_name(&self, options: &AnalysisOptions) -> String {
        options
            .model_path
            .clone()
            .unwrap_or_else(|| "shimmy".to_string())
    }
}

/// Select the backend implementation for a tag.
pub fn backend_for(kind: BackendKind) -> &'static dyn ModelBackend {
    match kind {
        BackendKind::Qwen => &QwenBackend,
        BackendKind::Ollama => &OllamaBackend,
        BackendKind::Shimmy => &ShimmyBackend,
    }
}

/// Whether a model artifact exists and is readable.
///
/// A pure filesystem probe; no decoding. On wasm32 there is no filesystem,
/// so the answer is always `false`.
#[cfg(not(target_arch = "wasm32"))]
pub fn check_model_availability(path: &str) -> bool {
    std::path::Path::new(path).is_file()
}

#[cfg(target_arch = "wasm32")]
pub fn check_model_availability(_path: &str) -> bool {
    false
}
