//! Types for the analysis dispatcher.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::DecodeError;

/// Errors from the analysis dispatcher.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The image could not be decoded for analysis.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The selected backend is missing configuration or a model artifact.
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The backend did not answer within its deadline.
    #[error("Backend timed out")]
    BackendTimeout,

    /// The backend answered with something unparseable.
    #[error("Invalid backend response: {0}")]
    InvalidResponse(String),
}

/// Which analysis backend to dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Qwen vision-language API.
    Qwen,
    /// Local Ollama server (default: no key or model file required).
    #[default]
    Ollama,
    /// Local Shimmy inference server with an on-disk model.
    Shimmy,
}

impl BackendKind {
    /// Parse a backend tag ("qwen", "ollama", "shimmy"), case-insensitively.
    pub fn from_name(name: &str) -> Option<BackendKind> {
        match name.to_ascii_lowercase().as_str() {
            "qwen" => Some(BackendKind::Qwen),
            "ollama" => Some(BackendKind::Ollama),
            "shimmy" => Some(BackendKind::Shimmy),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BackendKind::Qwen => "qwen",
            BackendKind::Ollama => "ollama",
            BackendKind::Shimmy => "shimmy",
        }
    }
}

/// Normalized analysis request configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisOptions {
    /// Backend selector (default ollama).
    pub backend: BackendKind,
    /// Model identifier or on-disk path, backend-specific.
    pub model_path: Option<String>,
    /// Service endpoint for server-backed models.
    pub endpoint: Option<String>,
    /// API key for remote services.
    pub api_key: Option<String>,
    /// Prefer GPU inference where the backend supports it.
    pub use_gpu: Option<bool>,
    /// Drop detected objects below this confidence (0.0..=1.0).
    pub confidence_threshold: Option<f64>,
}

/// A detected object with its normalized bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedObject {
    pub name: String,
    /// Confidence 0.0..=1.0.
    pub confidence: f64,
    pub bbox: BoundingBox,
    pub category: String,
}

/// Normalized bounding box (0.0..=1.0 in both axes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    /// The full image frame.
    pub const FULL: BoundingBox = BoundingBox {
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
    };
}

/// One dominant color of the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorInfo {
    /// Human-readable color name.
    pub name: String,
    /// RGB components.
    pub rgb: [u8; 3],
    /// Share of sampled pixels, 0.0..=1.0.
    pub percentage: f64,
    /// Uppercase "#RRGGBB".
    pub hex: String,
}

/// The analysis result shape shared by every backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAnalysis {
    /// Detected container format name.
    pub image_type: String,
    /// Tags in descending detection-confidence order.
    pub tags: Vec<String>,
    /// Generated description.
    pub description: String,
    /// Overall confidence, 0.0..=1.0.
    pub confidence: f64,
    /// Detected objects.
    pub objects: Vec<DetectedObject>,
    /// Dominant colors.
    pub colors: Vec<ColorInfo>,
    /// Scene classification.
    pub scene_type: String,
    /// Wall-clock analysis time in milliseconds.
    pub analysis_time_ms: f64,
    /// Which backend/model produced the result.
    pub model_used: String,
}

/// The `{success, result | error}` union the ABI returns.
///
/// Constructed only through [`AnalysisResponse::from_result`], which keeps
/// the tagged-union invariant: exactly one of `result`/`error` is present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ImageAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    pub fn from_result(result: Result<ImageAnalysis, AnalysisError>) -> Self {
        match result {
            Ok(analysis) => Self {
                success: true,
                result: Some(analysis),
                error: None,
            },
            Err(e) => Self {
                success: false,
                result: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_from_name() {
        assert_eq!(BackendKind::from_name("qwen"), Some(BackendKind::Qwen));
        assert_eq!(BackendKind::from_name("OLLAMA"), Some(BackendKind::Ollama));
        assert_eq!(BackendKind::from_name("shimmy"), Some(BackendKind::Shimmy));
        assert_eq!(BackendKind::from_name("tensorflow"), None);
    }

    #[test]
    fn test_response_tagged_union_ok() {
        let analysis = ImageAnalysis {
            image_type: "png".to_string(),
            tags: vec![],
            description: String::new(),
            confidence: 0.5,
            objects: vec![],
            colors: vec![],
            scene_type: "general".to_string(),
            analysis_time_ms: 0.0,
            model_used: "ollama".to_string(),
        };
        let response = AnalysisResponse::from_result(Ok(analysis));
        assert!(response.success);
        assert!(response.result.is_some());
        assert!(response.error.is_none());
    }

    #[test]
    fn test_response_tagged_union_err() {
        let response = AnalysisResponse::from_result(Err(AnalysisError::BackendTimeout));
        assert!(!response.success);
        assert!(response.result.is_none());
        assert_eq!(response.error.as_deref(), Some("Backend timed out"));
    }

    #[test]
    fn test_analysis_error_display() {
        let e = AnalysisError::BackendUnavailable("no api key".to_string());
        assert_eq!(e.to_string(), "Backend unavailable: no api key");
    }
}
