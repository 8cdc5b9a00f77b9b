//! Resize step of the conversion pipeline.
//!
//! Target dimensions are derived from [`ResizeOptions`] before encoding.
//! Resampling is always Lanczos3 so that identical input and options yield
//! byte-identical output on every run.

use serde::{Deserialize, Serialize};

use crate::decode::PixelBuffer;
use crate::encode::EncodeError;

/// Largest accepted target edge, in pixels.
const MAX_TARGET_EDGE: u32 = 10_000;

/// Requested output dimensions for a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResizeOptions {
    /// Target width in pixels.
    pub width: Option<u32>,
    /// Target height in pixels.
    pub height: Option<u32>,
    /// Keep the source aspect ratio (default true). When both width and
    /// height are given, the image is fitted inside the box; when off,
    /// given dimensions are honored exactly.
    pub maintain_aspect_ratio: Option<bool>,
}

impl ResizeOptions {
    /// Whether any resizing was actually requested.
    pub fn is_noop(&self) -> bool {
        self.width.is_none() && self.height.is_none()
    }
}

/// Reject zero or absurd target dimensions.
pub fn validate(resize: &ResizeOptions) -> Result<(), EncodeError> {
    for (name, value) in [("width", resize.width), ("height", resize.height)] {
        if let Some(v) = value {
            if v == 0 {
                return Err(EncodeError::InvalidOptions(format!(
                    "resize {name} must be greater than 0"
                )));
            }
            if v > MAX_TARGET_EDGE {
                return Err(EncodeError::InvalidOptions(format!(
                    "resize {name} must be at most {MAX_TARGET_EDGE}"
                )));
            }
        }
    }
    Ok(())
}

/// Compute the output dimensions for a source image under `resize`.
pub fn target_dimensions(
    original_width: u32,
    original_height: u32,
    resize: &ResizeOptions,
) -> (u32, u32) {
    let keep_ratio = resize.maintain_aspect_ratio.unwrap_or(true);

    match (resize.width, resize.height) {
        (Some(target_width), Some(target_height)) => {
            if !keep_ratio {
                return (target_width, target_height);
            }
            fit_in_box(original_width, original_height, target_width, target_height)
        }
        (Some(target_width), None) => {
            let height = if keep_ratio {
                derive_height(original_width, original_height, target_width)
            } else {
                original_height
            };
            (target_width, height)
        }
        (None, Some(target_height)) => {
            let width = if keep_ratio {
                derive_width(original_width, original_height, target_height)
            } else {
                original_width
            };
            (width, target_height)
        }
        (None, None) => (original_width, original_height),
    }
}

/// Scale to fit inside a target box, preserving aspect ratio.
fn fit_in_box(
    original_width: u32,
    original_height: u32,
    target_width: u32,
    target_height: u32,
) -> (u32, u32) {
    let ratio = original_width as f64 / original_height as f64;
    let target_ratio = target_width as f64 / target_height as f64;

    if ratio > target_ratio {
        // Source is wider: width is the constraint.
        let height = (target_width as f64 / ratio) as u32;
        (target_width, height.max(1))
    } else {
        let width = (target_height as f64 * ratio) as u32;
        (width.max(1), target_height)
    }
}

fn derive_height(original_width: u32, original_height: u32, target_width: u32) -> u32 {
    ((original_height as f64 * target_width as f64 / original_width as f64) as u32).max(1)
}

fn derive_width(original_width: u32, original_height: u32, target_height: u32) -> u32 {
    ((original_width as f64 * target_height as f64 / original_height as f64) as u32).max(1)
}

/// Resize a pixel buffer to exact dimensions with Lanczos3.
///
/// Returns a clone of the input when the dimensions already match.
pub fn apply(buffer: &PixelBuffer, width: u32, height: u32) -> Result<PixelBuffer, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidOptions(
            "resize dimensions must be non-zero".to_string(),
        ));
    }

    if buffer.width == width && buffer.height == height {
        return Ok(buffer.clone());
    }

    let rgba = buffer.to_rgba_image().ok_or_else(|| {
        EncodeError::InvalidOptions("pixel buffer does not match its dimensions".to_string())
    })?;

    let resized =
        image::imageops::resize(&rgba, width, height, image::imageops::FilterType::Lanczos3);

    Ok(PixelBuffer::from_rgba_image(
        resized,
        buffer.channels,
        buffer.has_alpha,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(width: Option<u32>, height: Option<u32>, keep: bool) -> ResizeOptions {
        ResizeOptions {
            width,
            height,
            maintain_aspect_ratio: Some(keep),
        }
    }

    #[test]
    fn test_target_both_specified_fit() {
        assert_eq!(target_dimensions(400, 300, &opts(Some(200), Some(150), true)), (200, 150));
        // Wider source constrained by width
        assert_eq!(target_dimensions(400, 100, &opts(Some(200), Some(150), true)), (200, 50));
        // Taller source constrained by height
        assert_eq!(target_dimensions(100, 400, &opts(Some(200), Some(100), true)), (25, 100));
    }

    #[test]
    fn test_target_width_only_derives_height() {
        assert_eq!(target_dimensions(400, 300, &opts(Some(200), None, true)), (200, 150));
    }

    #[test]
    fn test_target_height_only_derives_width() {
        assert_eq!(target_dimensions(400, 300, &opts(None, Some(150), true)), (200, 150));
    }

    #[test]
    fn test_target_exact_when_ratio_off() {
        assert_eq!(target_dimensions(400, 300, &opts(Some(200), Some(100), false)), (200, 100));
        // One dimension, ratio off: the other stays put
        assert_eq!(target_dimensions(400, 300, &opts(Some(200), None, false)), (200, 300));
    }

    #[test]
    fn test_target_none_is_identity() {
        assert_eq!(target_dimensions(400, 300, &ResizeOptions::default()), (400, 300));
    }

    #[test]
    fn test_default_keeps_aspect_ratio() {
        let resize = ResizeOptions {
            width: Some(200),
            height: None,
            maintain_aspect_ratio: None,
        };
        assert_eq!(target_dimensions(400, 300, &resize), (200, 150));
    }

    #[test]
    fn test_extreme_ratio_never_zero() {
        let (w, h) = target_dimensions(10_000, 10, &opts(Some(5), Some(5), true));
        assert!(w >= 1 && h >= 1);
    }

    #[test]
    fn test_validate_rejects_zero() {
        assert!(validate(&opts(Some(0), Some(150), true)).is_err());
        assert!(validate(&opts(None, Some(0), true)).is_err());
    }

    #[test]
    fn test_validate_rejects_oversized() {
        assert!(validate(&opts(Some(10_001), None, true)).is_err());
        assert!(validate(&opts(Some(10_000), None, true)).is_ok());
    }

    #[test]
    fn test_validate_accepts_noop() {
        assert!(validate(&ResizeOptions::default()).is_ok());
    }

    #[test]
    fn test_apply_resizes_pixels() {
        let img = image::RgbaImage::from_pixel(100, 50, image::Rgba([40, 80, 120, 255]));
        let buffer = PixelBuffer::from_rgba_image(img, 3, false);

        let resized = apply(&buffer, 50, 25).unwrap();
        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
        assert_eq!(resized.channels, 3);
    }

    #[test]
    fn test_apply_same_dimensions_is_clone() {
        let img = image::RgbaImage::from_pixel(10, 10, image::Rgba([1, 2, 3, 255]));
        let buffer = PixelBuffer::from_rgba_image(img, 3, false);

        let out = apply(&buffer, 10, 10).unwrap();
        assert_eq!(out.pixels, buffer.pixels);
    }

    #[test]
    fn test_apply_zero_dimension_error() {
        let img = image::RgbaImage::from_pixel(10, 10, image::Rgba([0, 0, 0, 255]));
        let buffer = PixelBuffer::from_rgba_image(img, 3, false);
        assert!(apply(&buffer, 0, 10).is_err());
    }

    #[test]
    fn test_apply_deterministic() {
        let img = image::RgbaImage::from_fn(64, 64, |x, y| {
            image::Rgba([(x * 4) as u8, (y * 4) as u8, 0, 255])
        });
        let buffer = PixelBuffer::from_rgba_image(img, 3, false);

        let a = apply(&buffer, 31, 17).unwrap();
        let b = apply(&buffer, 31, 17).unwrap();
        assert_eq!(a.pixels, b.pixels);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for source image dimensions.
    fn source_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=4000, 1u32..=4000)
    }

    /// Strategy for valid resize targets.
    fn target_strategy() -> impl Strategy<Value = (Option<u32>, Option<u32>)> {
        (
            proptest::option::of(1u32..=MAX_TARGET_EDGE),
            proptest::option::of(1u32..=MAX_TARGET_EDGE),
        )
    }

    proptest! {
        /// Property: computed dimensions are always at least 1x1.
        #[test]
        fn prop_target_dimensions_positive(
            (ow, oh) in source_strategy(),
            (w, h) in target_strategy(),
            keep in any::<bool>(),
        ) {
            let resize = ResizeOptions {
                width: w,
                height: h,
                maintain_aspect_ratio: Some(keep),
            };
            let (out_w, out_h) = target_dimensions(ow, oh, &resize);
            prop_assert!(out_w >= 1);
            prop_assert!(out_h >= 1);
        }

        /// Property: fitting inside a box never exceeds the box.
        #[test]
        fn prop_fit_stays_inside_box(
            (ow, oh) in source_strategy(),
            tw in 1u32..=MAX_TARGET_EDGE,
            th in 1u32..=MAX_TARGET_EDGE,
        ) {
            let resize = ResizeOptions {
                width: Some(tw),
                height: Some(th),
                maintain_aspect_ratio: Some(true),
            };
            let (out_w, out_h) = target_dimensions(ow, oh, &resize);
            prop_assert!(out_w <= tw);
            prop_assert!(out_h <= th);
        }

        /// Property: with aspect ratio off, given dimensions are honored
        /// exactly.
        #[test]
        fn prop_exact_when_ratio_off(
            (ow, oh) in source_strategy(),
            tw in 1u32..=MAX_TARGET_EDGE,
            th in 1u32..=MAX_TARGET_EDGE,
        ) {
            let resize = ResizeOptions {
                width: Some(tw),
                height: Some(th),
                maintain_aspect_ratio: Some(false),
            };
            prop_assert_eq!(target_dimensions(ow, oh, &resize), (tw, th));
        }

        /// Property: options that pass validation never make `apply` fail on
        /// the zero-dimension check.
        #[test]
        fn prop_validated_options_yield_valid_dimensions(
            (ow, oh) in source_strategy(),
            (w, h) in target_strategy(),
        ) {
            let resize = ResizeOptions {
                width: w,
                height: h,
                maintain_aspect_ratio: Some(true),
            };
            prop_assume!(validate(&resize).is_ok());
            let (out_w, out_h) = target_dimensions(ow, oh, &resize);
            prop_assert!(out_w > 0 && out_h > 0);
        }
    }
}
