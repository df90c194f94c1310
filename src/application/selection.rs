// SPDX-License-Identifier: MPL-2.0
//! Image selection: candidate validation and preview ownership.
//!
//! A [`Candidate`] is whatever the user dropped or picked. [`acquire`] turns it
//! into a [`SelectedImage`] when its declared content type is an image, and
//! allocates exactly one preview for it. The preview is released when the
//! `SelectedImage` is dropped, so replacing or clearing a selection can never
//! leak it.

use crate::application::port::{ImageUpload, PreviewId, PreviewStore};
use crate::domain::error::SelectionError;
use std::fmt;
use std::sync::Arc;

/// A file offered for selection, before validation.
#[derive(Clone)]
pub struct Candidate {
    name: String,
    content_type: Option<String>,
    bytes: Arc<[u8]>,
}

impl Candidate {
    /// Creates a candidate from its name, declared content type and contents.
    pub fn new(name: impl Into<String>, content_type: Option<&str>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.map(str::to_string),
            bytes: bytes.into(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns whether the declared content type indicates an image.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.content_type.as_deref().is_some_and(is_image_type)
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Returns whether a MIME type string describes an image (`image/` prefix).
///
/// Parameters such as `; charset=...` are ignored and the comparison is
/// case-insensitive.
#[must_use]
pub fn is_image_type(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.to_ascii_lowercase().starts_with("image/")
}

/// Scoped preview resource.
///
/// Holds the id handed out by a [`PreviewStore`] and releases it exactly once
/// when dropped.
pub struct Preview {
    id: PreviewId,
    store: Arc<dyn PreviewStore>,
}

impl Preview {
    fn allocate(store: &Arc<dyn PreviewStore>, bytes: &Arc<[u8]>) -> Self {
        Self {
            id: store.allocate(Arc::clone(bytes)),
            store: Arc::clone(store),
        }
    }

    #[must_use]
    pub fn id(&self) -> PreviewId {
        self.id
    }
}

impl Drop for Preview {
    fn drop(&mut self) {
        self.store.release(self.id);
    }
}

impl fmt::Debug for Preview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Preview").field(&self.id).finish()
    }
}

/// The image currently selected for classification.
#[derive(Debug)]
pub struct SelectedImage {
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
    preview: Preview,
}

impl SelectedImage {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Size of the image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[must_use]
    pub fn preview_id(&self) -> PreviewId {
        self.preview.id()
    }

    /// Builds the request payload for this image. The bytes are shared, not copied.
    #[must_use]
    pub fn upload(&self) -> ImageUpload {
        ImageUpload {
            file_name: self.name.clone(),
            content_type: self.content_type.clone(),
            bytes: Arc::clone(&self.bytes),
        }
    }
}

/// Validates `candidate` and allocates its preview.
///
/// # Errors
///
/// Returns [`SelectionError::InvalidFileType`] when the declared type is
/// missing or not an image. No preview is allocated in that case.
pub fn acquire(
    previews: &Arc<dyn PreviewStore>,
    candidate: Candidate,
) -> Result<SelectedImage, SelectionError> {
    let Candidate {
        name,
        content_type,
        bytes,
    } = candidate;

    let content_type = match content_type {
        Some(content_type) if is_image_type(&content_type) => content_type,
        other => return Err(SelectionError::InvalidFileType { content_type: other }),
    };

    let preview = Preview::allocate(previews, &bytes);
    Ok(SelectedImage {
        name,
        content_type,
        bytes,
        preview,
    })
}
