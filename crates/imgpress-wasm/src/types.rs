//! WASM-compatible wrapper types.

use imgpress_core::OutputArtifact;
use wasm_bindgen::prelude::*;

use crate::download::BrowserDownload;

/// A compressed image ready to be downloaded.
///
/// Holds the encoded bytes in WASM memory. `download()` and `release()`
/// consume the artifact; letting JavaScript garbage-collect it also releases it.
#[wasm_bindgen]
pub struct JsArtifact {
    inner: OutputArtifact,
}

#[wasm_bindgen]
impl JsArtifact {
    /// Encoded width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Encoded height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Output mime type, e.g. `image/jpeg`
    #[wasm_bindgen(getter)]
    pub fn mime(&self) -> String {
        self.inner.mime().as_str().to_string()
    }

    /// Suggested download name, e.g. `download.jpeg`
    #[wasm_bindgen(getter)]
    pub fn filename(&self) -> String {
        self.inner.filename().to_string()
    }

    /// Size of the encoded image in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.bytes().len()
    }

    /// Returns the encoded bytes as a Uint8Array.
    ///
    /// Note: This creates a copy in JavaScript memory.
    pub fn bytes(&self) -> Vec<u8> {
        self.inner.bytes().to_vec()
    }

    /// Trigger a browser download and release the artifact.
    pub fn download(self) -> Result<(), JsValue> {
        self.inner
            .deliver(&mut BrowserDownload)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Release the artifact without downloading it.
    pub fn release(self) {
        self.inner.release();
    }
}

impl JsArtifact {
    pub(crate) fn from_artifact(inner: OutputArtifact) -> Self {
        Self { inner }
    }
}
