//! Compression entry points exposed to JavaScript.
//!
//! # Example
//!
//! ```typescript
//! import init, { compress, compress_and_download } from '@imgpress/wasm';
//!
//! await init();
//!
//! source.onchange = async () => {
//!   const file = source.files[0];
//!   const artifact = await compress(file, { width: 800, quality: 0.7, outputMime: 'image/webp' });
//!   console.log(`${artifact.filename}: ${artifact.byte_length} bytes`);
//!   artifact.download();
//! };
//! ```

use imgpress_core::{EncodeRequest, MimeType, Pipeline, PipelineError};
use wasm_bindgen::prelude::*;
use web_sys::File;

use crate::download::BrowserDownload;
use crate::reader::source_file;
use crate::types::JsArtifact;

fn to_js(error: PipelineError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Turn an optional JS options object into an [`EncodeRequest`].
///
/// `undefined` and `null` select the configured default request.
fn parse_options(options: JsValue) -> Result<EncodeRequest, PipelineError> {
    if options.is_undefined() || options.is_null() {
        return Ok(Pipeline::global().config().default_request);
    }
    serde_wasm_bindgen::from_value(options).map_err(|e| PipelineError::InvalidRequest(e.to_string()))
}

/// Compress a selected file.
///
/// # Arguments
///
/// * `file` - The `File` from an `<input type="file">`
/// * `options` - Optional `{ width, height, quality, outputMime }`; omitted
///   fields fall back to pass-through dimensions, quality 0.8 and `image/jpeg`
///
/// # Errors
///
/// The promise rejects with a message if the type is not JPEG/PNG/WebP,
/// the options are invalid, or decoding or encoding fails.
#[wasm_bindgen]
pub async fn compress(file: File, options: JsValue) -> Result<JsArtifact, JsValue> {
    let request = parse_options(options).map_err(to_js)?;
    Pipeline::global()
        .run(source_file(file), &request)
        .await
        .map(JsArtifact::from_artifact)
        .map_err(to_js)
}

/// Compress with the defaults and immediately download as `download.jpeg`.
#[wasm_bindgen]
pub async fn compress_and_download(file: File) -> Result<(), JsValue> {
    let artifact = Pipeline::global()
        .run_default(source_file(file))
        .await
        .map_err(to_js)?;
    artifact
        .deliver(&mut BrowserDownload)
        .map_err(|e| to_js(e.into()))
}

/// Mime types accepted as input and output.
#[wasm_bindgen]
pub fn supported_mime_types() -> Vec<String> {
    Pipeline::global()
        .config()
        .allow_list
        .entries()
        .iter()
        .map(|mime| mime.as_str().to_string())
        .collect()
}

/// Whether `mime` may be selected.
#[wasm_bindgen]
pub fn is_supported_mime(mime: &str) -> bool {
    Pipeline::global().config().allow_list.accept(mime).is_some()
}

/// Default output format.
#[wasm_bindgen]
pub fn default_output_mime() -> String {
    let default: MimeType = Pipeline::global().config().default_request.output_mime;
    default.as_str().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_mime_types() {
        assert_eq!(
            supported_mime_types(),
            vec!["image/jpeg", "image/png", "image/webp"]
        );
    }

    #[test]
    fn test_is_supported_mime() {
        assert!(is_supported_mime("image/png"));
        assert!(!is_supported_mime("application/pdf"));
    }

    #[test]
    fn test_default_output_mime() {
        assert_eq!(default_output_mime(), "image/jpeg");
    }
}

/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn file(bytes: &[u8], name: &str, mime: &str) -> File {
        let parts = js_sys::Array::new();
        parts.push(&js_sys::Uint8Array::from(bytes).into());
        let opts = web_sys::FilePropertyBag::new();
        opts.set_type(mime);
        File::new_with_u8_array_sequence_and_options(&parts, name, &opts).unwrap()
    }

    /// A flat gray PNG, encoded through the core encoder.
    fn png(width: u32, height: u32) -> Vec<u8> {
        let surface = imgpress_core::RasterSurface::new(
            width,
            height,
            vec![128u8; (width * height * 4) as usize],
        );
        imgpress_core::encode::encode_png(&surface).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_parse_options_defaults() {
        let request = parse_options(JsValue::UNDEFINED).unwrap();
        assert_eq!(request, EncodeRequest::default());
    }

    #[wasm_bindgen_test]
    fn test_parse_options_rejects_bad_quality() {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"quality".into(), &JsValue::from_f64(3.0)).unwrap();
        assert!(parse_options(options.into()).is_err());
    }

    #[wasm_bindgen_test]
    async fn test_compress_resizes() {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"width".into(), &JsValue::from_f64(10.0)).unwrap();
        js_sys::Reflect::set(&options, &"height".into(), &JsValue::from_f64(4.0)).unwrap();

        let artifact = compress(file(&png(40, 40), "a.png", "image/png"), options.into())
            .await
            .unwrap();
        assert_eq!(artifact.width(), 10);
        assert_eq!(artifact.height(), 4);
        assert_eq!(artifact.filename(), "download.jpeg");
        artifact.release();
    }

    #[wasm_bindgen_test]
    async fn test_compress_rejects_pdf() {
        let result = compress(file(b"%PDF", "a.pdf", "application/pdf"), JsValue::UNDEFINED).await;
        assert!(result.is_err());
    }
}
