//! Format registry: the closed set of image formats the engine handles.
//!
//! Maps between file extensions, MIME types, and the [`ImageFormat`] enum,
//! and answers per-format capability questions (transparency, lossless,
//! quality). All lookups are pure and total: unknown inputs return `None`
//! rather than erroring, so callers decide whether that is fatal.

use serde::{Deserialize, Serialize};

/// The image formats the engine can decode and encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    WebP,
    Gif,
    Bmp,
    Tiff,
}

/// Capability and naming metadata for one [`ImageFormat`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInfo {
    /// Canonical lowercase name ("jpeg", "png", ...).
    pub name: &'static str,
    /// MIME type ("image/jpeg", ...).
    pub mime_type: &'static str,
    /// Recognized file extensions; the first entry is canonical.
    pub extensions: &'static [&'static str],
    /// Whether the format can store an alpha channel.
    pub supports_transparency: bool,
    /// Whether the format has a lossless encoding mode.
    pub supports_lossless: bool,
    /// Whether the format has a lossy mode controlled by a quality knob.
    pub supports_quality: bool,
}

impl ImageFormat {
    /// Every registered format, in canonical order.
    pub const ALL: [ImageFormat; 6] = [
        ImageFormat::Jpeg,
        ImageFormat::Png,
        ImageFormat::WebP,
        ImageFormat::Gif,
        ImageFormat::Bmp,
        ImageFormat::Tiff,
    ];

    /// Metadata for this format.
    pub fn info(self) -> FormatInfo {
        match self {
            ImageFormat::Jpeg => FormatInfo {
                name: "jpeg",
                mime_type: "image/jpeg",
                extensions: &["jpg", "jpeg"],
                supports_transparency: false,
                supports_lossless: false,
                supports_quality: true,
            },
            ImageFormat::Png => FormatInfo {
                name: "png",
                mime_type: "image/png",
                extensions: &["png"],
                supports_transparency: true,
                supports_lossless: true,
                supports_quality: false,
            },
            ImageFormat::WebP => FormatInfo {
                name: "webp",
                mime_type: "image/webp",
                extensions: &["webp"],
                supports_transparency: true,
                supports_lossless: true,
                supports_quality: true,
            },
            ImageFormat::Gif => FormatInfo {
                name: "gif",
                mime_type: "image/gif",
                extensions: &["gif"],
                supports_transparency: true,
                supports_lossless: true,
                supports_quality: false,
            },
            ImageFormat::Bmp => FormatInfo {
                name: "bmp",
                mime_type: "image/bmp",
                extensions: &["bmp"],
                supports_transparency: false,
                supports_lossless: true,
                supports_quality: false,
            },
            ImageFormat::Tiff => FormatInfo {
                name: "tiff",
                mime_type: "image/tiff",
                extensions: &["tiff", "tif"],
                supports_transparency: true,
                supports_lossless: true,
                supports_quality: false,
            },
        }
    }

    /// Canonical lowercase name.
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        self.info().mime_type
    }

    /// Canonical file extension (first registered extension).
    pub fn extension(self) -> &'static str {
        self.info().extensions[0]
    }

    pub fn supports_transparency(self) -> bool {
        self.info().supports_transparency
    }

    pub fn supports_lossless(self) -> bool {
        self.info().supports_lossless
    }

    pub fn supports_quality(self) -> bool {
        self.info().supports_quality
    }

    /// Look up a format by file extension or filename.
    ///
    /// Accepts either a bare extension (`"jpg"`) or a full filename
    /// (`"photo.JPG"`). Matching is case-insensitive.
    pub fn from_extension(name: &str) -> Option<ImageFormat> {
        let ext = name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.info().extensions.contains(&ext.as_str()))
    }

    /// Look up a format by MIME type (case-insensitive).
    pub fn from_mime(mime: &str) -> Option<ImageFormat> {
        let mime = mime.to_ascii_lowercase();
        Self::ALL.into_iter().find(|f| f.mime_type() == mime)
    }

    /// Parse a format name as used in conversion options.
    ///
    /// Accepts canonical names and extension aliases ("jpg", "tif"),
    /// case-insensitively.
    pub fn from_name(name: &str) -> Option<ImageFormat> {
        match name.to_ascii_lowercase().as_str() {
            "jpeg" | "jpg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "webp" => Some(ImageFormat::WebP),
            "gif" => Some(ImageFormat::Gif),
            "bmp" => Some(ImageFormat::Bmp),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Detect a format from file content by magic bytes.
    ///
    /// Filename extensions are never consulted; this is the only format
    /// detection the decoder trusts.
    pub fn sniff(bytes: &[u8]) -> Option<ImageFormat> {
        if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(b"GIF8") {
            Some(ImageFormat::Gif)
        } else if bytes.starts_with(b"RIFF") && bytes.len() > 12 && &bytes[8..12] == b"WEBP" {
            Some(ImageFormat::WebP)
        } else if bytes.starts_with(&[0x42, 0x4D]) {
            Some(ImageFormat::Bmp)
        } else if bytes.starts_with(&[0x49, 0x49, 0x2A, 0x00])
            || bytes.starts_with(&[0x4D, 0x4D, 0x00, 0x2A])
        {
            Some(ImageFormat::Tiff)
        } else {
            None
        }
    }

    /// Convert to the `image` crate's format for decoding.
    pub(crate) fn to_image_decode(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::WebP => image::ImageFormat::WebP,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
        }
    }

    /// Convert to the `image` crate's output format for encoding.
    ///
    /// WebP is absent: lossy WebP goes through the dedicated encoder in
    /// [`crate::encode::webp`], never through the `image` crate.
    pub(crate) fn to_image_output(self) -> Option<image::ImageFormat> {
        match self {
            ImageFormat::Jpeg => Some(image::ImageFormat::Jpeg),
            ImageFormat::Png => Some(image::ImageFormat::Png),
            ImageFormat::Gif => Some(image::ImageFormat::Gif),
            ImageFormat::Bmp => Some(image::ImageFormat::Bmp),
            ImageFormat::Tiff => Some(image::ImageFormat::Tiff),
            ImageFormat::WebP => None,
        }
    }
}

/// Metadata for every registered format, in canonical order.
pub fn supported_formats() -> Vec<FormatInfo> {
    ImageFormat::ALL.into_iter().map(ImageFormat::info).collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================
