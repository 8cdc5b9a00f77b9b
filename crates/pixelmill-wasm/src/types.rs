//! Conversion helpers between JavaScript values and core engine types.
//!
//! Options objects arrive as plain JS objects and are deserialized with
//! `serde-wasm-bindgen`; results go back the same way. Errors never cross
//! the boundary as panics — they are converted to `JsValue` strings or to
//! per-item markers inside batch arrays.

use pixelmill_core::BatchError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Parse an optional options object, treating `undefined`/`null` as the
/// engine defaults.
pub(crate) fn parse_optional<T>(value: JsValue) -> Result<T, JsValue>
where
    T: DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    parse_required(value)
}

/// Parse a required options object.
pub(crate) fn parse_required<T>(value: JsValue) -> Result<T, JsValue>
where
    T: DeserializeOwned,
{
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("invalid options: {e}")))
}

/// Serialize a result value for JavaScript.
pub(crate) fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value)
        .map_err(|e| JsValue::from_str(&format!("failed to serialize result: {e}")))
}

/// Collect a JS array of `Uint8Array` items into byte vectors.
pub(crate) fn byte_lists(images: &js_sys::Array) -> Result<Vec<Vec<u8>>, JsValue> {
    images
        .iter()
        .map(|item| {
            item.dyn_into::<js_sys::Uint8Array>()
                .map(|array| array.to_vec())
                .map_err(|_| JsValue::from_str("batch items must be Uint8Array"))
        })
        .collect()
}

/// One slot of a batch result as JavaScript sees it: a tagged
/// success/error object, index-aligned with the input array.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct JsBatchItem<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchError>,
}

impl<T: Serialize> From<Result<T, BatchError>> for JsBatchItem<T> {
    fn from(item: Result<T, BatchError>) -> Self {
        match item {
            Ok(result) => Self {
                success: true,
                result: Some(result),
                error: None,
            },
            Err(error) => Self {
                success: false,
                result: None,
                error: Some(error),
            },
        }
    }
}

/// Shape a whole batch result list for JavaScript.
pub(crate) fn batch_to_js<T: Serialize>(
    items: Vec<Result<T, BatchError>>,
) -> Result<JsValue, JsValue> {
    let shaped: Vec<JsBatchItem<T>> = items.into_iter().map(JsBatchItem::from).collect();
    to_js(&shaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_item_tagging() {
        let ok: JsBatchItem<u32> = Ok(7).into();
        assert!(ok.success);
        assert_eq!(ok.result, Some(7));
        assert!(ok.error.is_none());

        let err: JsBatchItem<u32> = Err(BatchError {
            index: 3,
            message: "bad image".to_string(),
        })
        .into();
        assert!(!err.success);
        assert!(err.result.is_none());
        assert_eq!(err.error.as_ref().unwrap().index, 3);
    }
}
