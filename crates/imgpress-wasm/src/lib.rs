//! imgpress WASM - WebAssembly bindings for imgpress
//!
//! This crate exposes the imgpress-core pipeline to JavaScript: a selected
//! `File` goes in, a compressed artifact that can be downloaded comes out.
//!
//! # Module Structure
//!
//! - `compress` - pipeline entry points (`compress`, `compress_and_download`)
//! - `types` - WASM-compatible artifact wrapper
//! - `reader` - async reading of browser `File`s
//! - `download` - Blob URL download trigger
//! - `logger` - `log` output to the browser console
//!
//! # Usage
//!
//! ```typescript
//! import init, { compress_and_download, is_supported_mime } from '@imgpress/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! source.onchange = async () => {
//!   const file = source.files[0];
//!   if (!is_supported_mime(file.type)) {
//!     alert('Invalid File type selected.');
//!     return;
//!   }
//!   await compress_and_download(file);
//! };
//! ```

use wasm_bindgen::prelude::*;

mod compress;
mod download;
mod logger;
mod reader;
mod types;

// Re-export public types
pub use compress::{
    compress, compress_and_download, default_output_mime, is_supported_mime,
    supported_mime_types,
};
pub use download::BrowserDownload;
pub use types::JsArtifact;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    logger::install(log::LevelFilter::Info);
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
