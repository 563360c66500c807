//! Process-wide registry of transient byte handles.
//!
//! A [`TransientHandle`] is the pipeline's equivalent of a browser object URL:
//! a short-lived `blob:imgpress/<id>` reference to an immutable byte buffer.
//! Unlike object URLs, a handle is released automatically when dropped, so a
//! run cannot leak the resources it registered on any exit path.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;

use crate::mime::MimeType;

const URL_PREFIX: &str = "blob:imgpress/";

static GLOBAL: Lazy<Arc<HandleRegistry>> = Lazy::new(|| Arc::new(HandleRegistry::new()));

struct Entry {
    bytes: Arc<[u8]>,
    mime: MimeType,
}

/// Table of live transient handles.
#[derive(Default)]
pub struct HandleRegistry {
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, Entry>>,
}

impl HandleRegistry {
    /// Create an empty, private registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry.
    pub fn global() -> Arc<HandleRegistry> {
        Arc::clone(&GLOBAL)
    }

    /// Register `bytes` and return a handle that owns the registration.
    pub fn register(self: &Arc<Self>, bytes: impl Into<Arc<[u8]>>, mime: MimeType) -> TransientHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let entry = Entry {
            bytes: bytes.into(),
            mime,
        };
        self.entries().insert(id, entry);
        log::debug!("registered transient handle {URL_PREFIX}{id} ({mime})");

        TransientHandle {
            id,
            url: format!("{URL_PREFIX}{id}"),
            registry: Arc::clone(self),
        }
    }

    /// Look up the bytes and mime type behind a handle url.
    pub fn resolve(&self, url: &str) -> Option<(Arc<[u8]>, MimeType)> {
        let id = parse_url(url)?;
        self.entries()
            .get(&id)
            .map(|entry| (Arc::clone(&entry.bytes), entry.mime))
    }

    /// Revoke a handle by url. Returns `false` if it was not live.
    ///
    /// The owning [`TransientHandle`] stays valid as a value but will no
    /// longer resolve.
    pub fn revoke(&self, url: &str) -> bool {
        parse_url(url).is_some_and(|id| self.remove(id))
    }

    /// Number of live handles.
    pub fn live_count(&self) -> usize {
        self.entries().len()
    }

    fn remove(&self, id: u64) -> bool {
        let removed = self.entries().remove(&id).is_some();
        if removed {
            log::debug!("revoked transient handle {URL_PREFIX}{id}");
        }
        removed
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<u64, Entry>> {
        // Entries are plain data; a panic elsewhere cannot leave them half-written.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for HandleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandleRegistry")
            .field("live", &self.live_count())
            .finish()
    }
}

fn parse_url(url: &str) -> Option<u64> {
    url.strip_prefix(URL_PREFIX)?.parse().ok()
}

/// An owned registration in a [`HandleRegistry`]. Revoked on drop.
pub struct TransientHandle {
    id: u64,
    url: String,
    registry: Arc<HandleRegistry>,
}

impl TransientHandle {
    /// The `blob:imgpress/<id>` url of this handle.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The bytes behind this handle, or `None` if it was revoked externally.
    pub fn resolve(&self) -> Option<Arc<[u8]>> {
        self.registry.resolve(&self.url).map(|(bytes, _)| bytes)
    }

    /// Release the registration now.
    pub fn revoke(self) {
        // Drop does the work.
    }
}

impl Drop for TransientHandle {
    fn drop(&mut self) {
        self.registry.remove(self.id);
    }
}

impl fmt::Debug for TransientHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TransientHandle").field(&self.url).finish()
    }
}
