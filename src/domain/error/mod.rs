// SPDX-License-Identifier: MPL-2.0
//! Domain error types.
//!
//! Every failure the classifier workflow can surface is one of these. They
//! carry enough detail for logging and map to a single localized message via
//! [`Failure::i18n_key`].

use thiserror::Error;

/// Rejection raised while acquiring a candidate file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The declared content type does not describe an image.
    #[error("not an image file (declared type: {})", .content_type.as_deref().unwrap_or("unknown"))]
    InvalidFileType { content_type: Option<String> },
}

/// Errors returned by the classifier gateway.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// No response could be obtained (connection refused, DNS, timeout...).
    #[error("classifier unreachable: {0}")]
    Network(String),

    /// A response arrived with a non-success status code.
    #[error("classifier answered with HTTP status {0}")]
    Http(u16),

    /// The response body does not have the expected shape.
    #[error("unexpected classifier response: {0}")]
    Parse(String),
}

impl ClassifyError {
    /// Returns the i18n message key for this error type.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ClassifyError::Network(_) => "error-classify-network",
            ClassifyError::Http(_) => "error-classify-http",
            ClassifyError::Parse(_) => "error-classify-parse",
        }
    }
}

/// The single user-facing failure held by a failed workflow.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Classify(#[from] ClassifyError),
}

impl Failure {
    /// Returns the i18n message key for this failure.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Failure::Selection(SelectionError::InvalidFileType { .. }) => "error-invalid-file-type",
            Failure::Classify(err) => err.i18n_key(),
        }
    }

    /// Returns the HTTP status when the failure came from a non-success response.
    #[must_use]
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Failure::Classify(ClassifyError::Http(status)) => Some(*status),
            _ => None,
        }
    }
}
