//! AI analysis bindings.
//!
//! Analysis never throws across the boundary: both single and batch calls
//! return the tagged `{success, result | error}` union so JavaScript can
//! branch without try/catch.

use pixelmill_core::{AnalysisOptions, AnalysisResponse};
use wasm_bindgen::prelude::*;

use crate::types::{byte_lists, parse_optional, to_js};

/// Analyze an image with the configured backend.
///
/// `options` is an optional `{backend?, modelPath?, endpoint?, apiKey?,
/// useGpu?, confidenceThreshold?}` object; the backend defaults to a local
/// Ollama server. Always resolves to `{success, result?, error?}`.
///
/// # Example
///
/// ```typescript
/// const response = analyze_image(bytes, { backend: 'ollama' });
/// if (response.success) {
///   console.log(response.result.tags, response.result.sceneType);
/// }
/// ```
#[wasm_bindgen]
pub fn analyze_image(image_data: &[u8], options: JsValue) -> Result<JsValue, JsValue> {
    let options: AnalysisOptions = parse_optional(options)?;
    to_js(&pixelmill_core::analyze_image_response(image_data, &options))
}

/// Analyze every image in the list.
///
/// Returns an index-aligned array of the same `{success, result | error}`
/// responses as [`analyze_image`].
#[wasm_bindgen]
pub fn batch_analyze_images(
    images: &js_sys::Array,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let images = byte_lists(images)?;
    let options: AnalysisOptions = parse_optional(options)?;

    let responses: Vec<AnalysisResponse> =
        pixelmill_core::batch_analyze_images(&images, &options)
            .into_iter()
            .map(|item| match item {
                Ok(analysis) => AnalysisResponse::from_result(Ok(analysis)),
                Err(e) => AnalysisResponse {
                    success: false,
                    result: None,
                    error: Some(e.message),
                },
            })
            .collect();
    to_js(&responses)
}

/// Whether a model artifact exists at `path`.
///
/// Always `false` in the browser — there is no filesystem to probe; hosts
/// with real storage answer through their own runtime.
#[wasm_bindgen]
pub fn check_model_availability(path: &str) -> bool {
    pixelmill_core::check_model_availability(path)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_analyze_garbage_resolves_to_error_union() {
        let response = analyze_image(b"not an image", JsValue::UNDEFINED).unwrap();
        let success = js_sys::Reflect::get(&response, &JsValue::from_str("success")).unwrap();
        assert_eq!(success.as_bool(), Some(false));
    }

    #[wasm_bindgen_test]
    fn test_no_filesystem_in_browser() {
        assert!(!check_model_availability("/models/llava.gguf"));
    }
}
