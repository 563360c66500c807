//! File download via Blob URLs.
//!
//! Triggers downloads by creating a `Blob`, generating an object URL, and
//! programmatically clicking a temporary `<a download>` element.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use imgpress_core::{DeliveryError, Download, DownloadSink};
use js_sys::{Array, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

fn js_error(value: JsValue) -> DeliveryError {
    DeliveryError::Sink(format!("{value:?}"))
}

/// Delivers artifacts as browser downloads.
///
/// The artifact's transient handle only lives inside the pipeline's registry,
/// so a real object URL is minted for the click and revoked right after.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserDownload;

impl DownloadSink for BrowserDownload {
    fn deliver(&mut self, download: Download<'_>) -> Result<(), DeliveryError> {
        let window = web_sys::window().ok_or_else(|| DeliveryError::Sink("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| DeliveryError::Sink("no document".into()))?;

        let parts = Array::new();
        parts.push(&Uint8Array::from(download.bytes).into());

        let opts = BlobPropertyBag::new();
        opts.set_type(download.mime.as_str());

        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts).map_err(js_error)?;
        let url = Url::create_object_url_with_blob(&blob).map_err(js_error)?;

        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(js_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|e| DeliveryError::Sink(format!("failed to cast element: {e:?}")))?;
        anchor.set_href(&url);
        anchor.set_download(download.filename);

        let body = document
            .body()
            .ok_or_else(|| DeliveryError::Sink("no document body".into()))?;
        body.append_child(&anchor).map_err(js_error)?;
        anchor.click();

        // The download has started; cleanup failures are not delivery failures.
        let _ = body.remove_child(&anchor);
        let _ = Url::revoke_object_url(&url);

        log::debug!("triggered download of {} via {}", download.filename, download.url);
        Ok(())
    }
}
