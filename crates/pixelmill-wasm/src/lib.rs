//! Pixelmill WASM - WebAssembly bindings for the Pixelmill image engine
//!
//! This crate exposes the `pixelmill-core` codec and analysis operations to
//! JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `codec` - Compression, format conversion, and inspection bindings
//! - `analyze` - AI analysis bindings
//! - `types` - Conversions between JS values and core types
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_to_webp, get_image_info } from '@pixelmill/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const result = compress_to_webp(bytes, { quality: 80 });
//! console.log(`${result.width}x${result.height}, saved ${result.compressionRatio}`);
//! ```

use wasm_bindgen::prelude::*;

mod analyze;
mod codec;
mod types;

// Re-export the public ABI surface
pub use analyze::{analyze_image, batch_analyze_images, check_model_availability};
pub use codec::{
    batch_compress_to_webp, batch_convert_image_format, compress_to_webp, convert_image_format,
    get_format_info, get_image_info, get_supported_formats,
};

/// Routes `log` records from the core engine to the browser console.
struct ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::Level::Debug
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = format!("{} {}", record.target(), record.args());
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&message.into()),
            log::Level::Warn => web_sys::console::warn_1(&message.into()),
            _ => web_sys::console::log_1(&message.into()),
        }
    }

    fn flush(&self) {}
}

static LOGGER: ConsoleLogger = ConsoleLogger;

/// Initialize the WASM module (called automatically on load)
///
/// Installs the console logger. A host that already installed a logger
/// keeps its own; `set_logger` only succeeds once per process.
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(log::LevelFilter::Debug));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Health-check probe: returns its input plus 100.
#[wasm_bindgen]
pub fn plus_100(input: u32) -> u32 {
    pixelmill_core::plus_100(input)
}
