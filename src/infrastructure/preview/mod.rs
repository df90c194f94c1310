// SPDX-License-Identifier: MPL-2.0
//! Preview store backed by Iced image handles.
//!
//! Each allocation decodes lazily: the handle only wraps the encoded bytes and
//! the renderer decodes them the first time the preview is drawn. Releasing an
//! id drops the handle, which lets the renderer evict its texture.

use crate::application::port::{PreviewId, PreviewStore};
use bytes::Bytes;
use iced::widget::image;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// In-memory [`PreviewStore`] keyed by [`PreviewId`].
#[derive(Debug, Default)]
pub struct HandlePreviewStore {
    handles: Mutex<HashMap<PreviewId, image::Handle>>,
}

impl HandlePreviewStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the renderable handle for `id`, if it is still allocated.
    #[must_use]
    pub fn handle(&self, id: PreviewId) -> Option<image::Handle> {
        self.handles().get(&id).cloned()
    }

    /// Number of previews currently allocated.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.handles().len()
    }

    fn handles(&self) -> MutexGuard<'_, HashMap<PreviewId, image::Handle>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreviewStore for HandlePreviewStore {
    fn allocate(&self, bytes: Arc<[u8]>) -> PreviewId {
        let id = PreviewId::new();
        let len = bytes.len();
        let handle = image::Handle::from_bytes(Bytes::from_owner(bytes));
        self.handles().insert(id, handle);
        tracing::debug!(%id, len, "preview allocated");
        id
    }

    fn release(&self, id: PreviewId) {
        if self.handles().remove(&id).is_none() {
            tracing::warn!(%id, "release of unknown preview");
        } else {
            tracing::debug!(%id, "preview released");
        }
    }
}
