// SPDX-License-Identifier: MPL-2.0
//! Classifier gateway port definition.
//!
//! This module defines the [`Classifier`] trait for the single remote call the
//! application makes: upload one image, receive one [`ClassificationResult`].
//!
//! # Design Notes
//!
//! - Implementations must not retry; a failed call is reported as-is
//! - The returned future is `'static` so it can outlive the borrow of the
//!   adapter and be handed to `Task::perform`

use crate::domain::classification::ClassificationResult;
use crate::domain::error::ClassifyError;
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Future resolved by [`Classifier::classify`].
pub type ClassifyFuture = BoxFuture<'static, Result<ClassificationResult, ClassifyError>>;

/// The payload of a classification request.
///
/// Cloning is cheap: the bytes are shared with the selection they came from.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name forwarded to the server.
    pub file_name: String,
    /// Declared content type (always an `image/*` type).
    pub content_type: String,
    /// Raw file contents.
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Remote image classification.
///
/// # Example
///
/// ```ignore
/// use leaf_lens::application::port::{Classifier, ImageUpload};
///
/// async fn diagnose(classifier: &dyn Classifier, upload: ImageUpload) {
///     match classifier.classify(upload).await {
///         Ok(result) => println!("{result}"),
///         Err(err) => eprintln!("{err}"),
///     }
/// }
/// ```
pub trait Classifier: Send + Sync {
    /// Submits `upload` and resolves with the parsed classification.
    ///
    /// # Errors
    ///
    /// - [`ClassifyError::Network`] when no response could be obtained
    /// - [`ClassifyError::Http`] when the status is not a success
    /// - [`ClassifyError::Parse`] when the body has an unexpected shape
    fn classify(&self, upload: ImageUpload) -> ClassifyFuture;
}
