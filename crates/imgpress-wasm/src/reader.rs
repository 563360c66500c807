//! Async reading of a browser `File`.
//!
//! The blob's bytes are fetched through `Blob.arrayBuffer()` the first time
//! the loader polls, so a file rejected by the allow-list is never read.

use std::future::Future;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::io::AsyncRead;
use futures::ready;
use imgpress_core::SourceFile;
use js_sys::Uint8Array;
use wasm_bindgen_futures::JsFuture;
use web_sys::File;

enum State {
    Idle(File),
    Reading(Pin<Box<JsFuture>>),
    Ready { bytes: Vec<u8>, pos: usize },
}

/// `AsyncRead` over the contents of a `File`.
pub struct BlobReader {
    state: State,
}

impl BlobReader {
    /// Nothing is read until the first poll.
    pub fn new(file: File) -> Self {
        Self {
            state: State::Idle(file),
        }
    }
}

impl AsyncRead for BlobReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut [u8],
    ) -> Poll<io::Result<usize>> {
        let this = self.get_mut();
        loop {
            match &mut this.state {
                State::Idle(file) => {
                    let promise = file.array_buffer();
                    this.state = State::Reading(Box::pin(JsFuture::from(promise)));
                }
                State::Reading(pending) => {
                    let buffer = ready!(pending.as_mut().poll(cx))
                        .map_err(|e| io::Error::other(format!("{e:?}")))?;
                    this.state = State::Ready {
                        bytes: Uint8Array::new(&buffer).to_vec(),
                        pos: 0,
                    };
                }
                State::Ready { bytes, pos } => {
                    let n = buf.len().min(bytes.len() - *pos);
                    buf[..n].copy_from_slice(&bytes[*pos..*pos + n]);
                    *pos += n;
                    return Poll::Ready(Ok(n));
                }
            }
        }
    }
}

/// Wrap a browser `File` as a pipeline source.
pub fn source_file(file: File) -> SourceFile {
    let name = file.name();
    let declared_mime = file.type_();
    let size = file.size() as u64;
    SourceFile::from_reader(name, declared_mime, size, BlobReader::new(file))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use futures::io::AsyncReadExt;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn file(bytes: &[u8], name: &str, mime: &str) -> File {
        let parts = js_sys::Array::new();
        parts.push(&Uint8Array::from(bytes).into());
        let opts = web_sys::FilePropertyBag::new();
        opts.set_type(mime);
        File::new_with_u8_array_sequence_and_options(&parts, name, &opts).unwrap()
    }

    #[wasm_bindgen_test]
    async fn test_reads_whole_file() {
        let mut reader = BlobReader::new(file(&[1, 2, 3, 4, 5], "a.png", "image/png"));
        let mut out = Vec::new();
        reader.read_to_end(&mut out).await.unwrap();
        assert_eq!(out, vec![1, 2, 3, 4, 5]);
    }

    #[wasm_bindgen_test]
    fn test_source_file_metadata() {
        let source = source_file(file(&[0u8; 12], "photo.webp", "image/webp"));
        assert_eq!(source.name(), "photo.webp");
        assert_eq!(source.declared_mime(), "image/webp");
        assert_eq!(source.size(), 12);
    }
}
