//! Compression, conversion, and inspection bindings.
//!
//! Thin wrappers over `pixelmill-core`: parse the options object, run the
//! pure core operation, serialize the result back. Batch variants accept an
//! array of `Uint8Array` and return an index-aligned array of tagged
//! `{success, result | error}` objects — one bad image never fails the rest.

use pixelmill_core::{CompressOptions, ConversionOptions, ImageFormat};
use wasm_bindgen::prelude::*;

use crate::types::{batch_to_js, byte_lists, parse_optional, parse_required, to_js};

/// Compress an image to WebP.
///
/// `options` is an optional `{quality?, lossless?}` object; quality defaults
/// to 80, lossless to false. Transparency is always preserved — WebP holds
/// alpha in both modes.
///
/// # Example
///
/// ```typescript
/// const result = compress_to_webp(bytes, { quality: 75 });
/// console.log(`${result.originalSize} -> ${result.compressedSize}`);
/// ```
#[wasm_bindgen]
pub fn compress_to_webp(image_data: &[u8], options: JsValue) -> Result<JsValue, JsValue> {
    let options: CompressOptions = parse_optional(options)?;
    let result = pixelmill_core::compress_to_webp(image_data, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&result)
}

/// Compress every image in the list to WebP.
///
/// Returns an array the same length as the input; each slot is
/// `{success: true, result}` or `{success: false, error: {index, message}}`.
#[wasm_bindgen]
pub fn batch_compress_to_webp(
    images: &js_sys::Array,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let images = byte_lists(images)?;
    let options: CompressOptions = parse_optional(options)?;
    batch_to_js(pixelmill_core::batch_compress_to_webp(&images, &options))
}

/// Convert an image to another format, optionally resizing.
///
/// `options` is required and must carry `targetFormat` ("jpeg", "png",
/// "webp", "gif", "bmp", "tiff", plus the "jpg"/"tif" aliases). Optional
/// fields: `quality`, `preserveTransparency`, `lossless`, `colorSpace`,
/// `resize: {width?, height?, maintainAspectRatio?}`.
///
/// # Example
///
/// ```typescript
/// const result = convert_image_format(bytes, {
///   targetFormat: 'jpeg',
///   quality: 85,
///   preserveTransparency: false,
///   resize: { width: 1920, maintainAspectRatio: true },
/// });
/// ```
#[wasm_bindgen]
pub fn convert_image_format(image_data: &[u8], options: JsValue) -> Result<JsValue, JsValue> {
    let options: ConversionOptions = parse_required(options)?;
    let result = pixelmill_core::convert_image_format(image_data, &options)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&result)
}

/// Convert every image in the list; same per-item tagging as
/// [`batch_compress_to_webp`].
#[wasm_bindgen]
pub fn batch_convert_image_format(
    images: &js_sys::Array,
    options: JsValue,
) -> Result<JsValue, JsValue> {
    let images = byte_lists(images)?;
    let options: ConversionOptions = parse_required(options)?;
    batch_to_js(pixelmill_core::batch_convert_image_format(&images, &options))
}

/// Inspect image bytes without re-encoding.
///
/// Returns a JSON string: `{"width", "height", "format", "size", "channels"}`.
#[wasm_bindgen]
pub fn get_image_info(image_data: &[u8]) -> Result<String, JsValue> {
    let info =
        pixelmill_core::image_info(image_data).map_err(|e| JsValue::from_str(&e.to_string()))?;
    serde_json::to_string(&info).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Capability metadata for every supported format, in canonical order.
#[wasm_bindgen]
pub fn get_supported_formats() -> Result<JsValue, JsValue> {
    to_js(&pixelmill_core::supported_formats())
}

/// Capability metadata for one format, as a JSON string.
///
/// Accepts canonical names and extension aliases, case-insensitively.
#[wasm_bindgen]
pub fn get_format_info(format: &str) -> Result<String, JsValue> {
    let format = ImageFormat::from_name(format)
        .ok_or_else(|| JsValue::from_str(&format!("unsupported format: {format}")))?;
    serde_json::to_string(&format.info()).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_get_supported_formats_shape() {
        let formats = get_supported_formats().unwrap();
        let array: js_sys::Array = formats.into();
        assert_eq!(array.length(), 6);
    }

    #[wasm_bindgen_test]
    fn test_get_format_info_json() {
        let json = get_format_info("webp").unwrap();
        assert!(json.contains("image/webp"));
        assert!(json.contains("supportsTransparency"));
    }

    #[wasm_bindgen_test]
    fn test_get_format_info_unknown() {
        assert!(get_format_info("avif").is_err());
    }

    #[wasm_bindgen_test]
    fn test_compress_rejects_garbage() {
        let result = compress_to_webp(b"not an image", JsValue::UNDEFINED);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_convert_requires_options() {
        let result = convert_image_format(&[0u8; 4], JsValue::UNDEFINED);
        assert!(result.is_err());
    }

    #[wasm_bindgen_test]
    fn test_batch_rejects_non_bytes() {
        let items = js_sys::Array::of1(&JsValue::from_str("nope"));
        assert!(batch_compress_to_webp(&items, JsValue::UNDEFINED).is_err());
    }
}
