// SPDX-License-Identifier: MPL-2.0
//! Preview resource port definition.
//!
//! A preview is a renderable copy of the selected image owned by the UI
//! layer. Stores hand out a [`PreviewId`] on allocation and must free the
//! resource when the id is released. The application never releases an id
//! twice; see [`Preview`](crate::application::selection::Preview).

use std::fmt;
use std::sync::Arc;

/// Identifier of an allocated preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PreviewId(u64);

impl PreviewId {
    /// Creates a new unique preview ID.
    #[must_use]
    pub fn new() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for PreviewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PreviewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "preview#{}", self.0)
    }
}

/// Allocates and frees previews for selected images.
pub trait PreviewStore: Send + Sync {
    /// Creates a preview for `bytes` and returns its id.
    ///
    /// The bytes are shared with the selection; stores keep the `Arc`
    /// rather than copying the image.
    fn allocate(&self, bytes: Arc<[u8]>) -> PreviewId;

    /// Frees the preview identified by `id`.
    fn release(&self, id: PreviewId);
}
