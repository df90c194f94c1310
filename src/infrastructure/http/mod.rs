// SPDX-License-Identifier: MPL-2.0
//! HTTP adapter implementing the [`Classifier`] port.
//!
//! One `POST {base}/predict` per call, image bytes sent as the multipart field
//! `file`. Non-success statuses and malformed bodies are reported as typed
//! [`ClassifyError`]s; nothing is retried.

mod wire;

pub use wire::parse_response;

use crate::application::port::{Classifier, ClassifyFuture, ImageUpload};
use crate::domain::classification::ClassificationResult;
use crate::domain::error::ClassifyError;
use crate::error::{Error, Result};
use futures_util::FutureExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Url};
use std::fmt;
use std::time::Duration;

/// Multipart field carrying the image.
pub const FILE_FIELD: &str = "file";

/// Path appended to the configured base URL.
pub const PREDICT_PATH: &str = "predict";

const USER_AGENT: &str = concat!("LeafLens/", env!("CARGO_PKG_VERSION"));

/// Absolute URL of the `/predict` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    predict_url: Url,
}

impl Endpoint {
    /// Builds the endpoint from a base URL such as `http://localhost:8000/`.
    ///
    /// Trailing slashes are trimmed before `/predict` is appended.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `base` is not an absolute `http` or
    /// `https` URL.
    pub fn from_base(base: &str) -> Result<Self> {
        let trimmed = base.trim().trim_end_matches('/');
        let predict_url = Url::parse(&format!("{trimmed}/{PREDICT_PATH}"))
            .map_err(|e| Error::Config(format!("invalid endpoint `{base}`: {e}")))?;

        match predict_url.scheme() {
            "http" | "https" => Ok(Self { predict_url }),
            scheme => Err(Error::Config(format!(
                "invalid endpoint `{base}`: unsupported scheme `{scheme}`"
            ))),
        }
    }

    #[must_use]
    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.predict_url.fmt(f)
    }
}

/// `reqwest`-backed classifier gateway.
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpClassifier {
    /// Creates a gateway posting to `endpoint`.
    ///
    /// `timeout` bounds the whole request; `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Client`] if the HTTP client cannot be initialized.
    pub fn new(endpoint: Endpoint, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| Error::Client(e.to_string()))?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl Classifier for HttpClassifier {
    fn classify(&self, upload: ImageUpload) -> ClassifyFuture {
        let client = self.client.clone();
        let url = self.endpoint.predict_url.clone();
        post_image(client, url, upload).boxed()
    }
}

/// Stand-in gateway used when the HTTP client could not be built.
///
/// Every call fails with [`ClassifyError::Network`] carrying the build error,
/// so the workflow still reaches its `Failed` state instead of hanging.
#[derive(Debug, Clone)]
pub struct Unavailable {
    reason: String,
}

impl Unavailable {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl Classifier for Unavailable {
    fn classify(&self, upload: ImageUpload) -> ClassifyFuture {
        let reason = self.reason.clone();
        async move {
            tracing::warn!(file = %upload.file_name, %reason, "classifier unavailable");
            Err(ClassifyError::Network(reason))
        }
        .boxed()
    }
}

async fn post_image(
    client: reqwest::Client,
    url: Url,
    upload: ImageUpload,
) -> std::result::Result<ClassificationResult, ClassifyError> {
    let ImageUpload {
        file_name,
        content_type,
        bytes,
    } = upload;
    let len = bytes.len();

    let body = Body::from(bytes::Bytes::from_owner(bytes));
    let part = Part::stream_with_length(body, len as u64)
        .file_name(file_name.clone())
        .mime_str(&content_type)
        .map_err(|e| ClassifyError::Network(e.to_string()))?;
    let form = Form::new().part(FILE_FIELD, part);

    tracing::debug!(%url, file = %file_name, %content_type, len, "submitting image");

    let response = client
        .post(url.clone())
        .multipart(form)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(%url, error = %e, "classifier request failed");
            ClassifyError::Network(e.to_string())
        })?;

    let status = response.status();
    if !status.is_success() {
        tracing::warn!(%url, %status, "classifier rejected request");
        return Err(ClassifyError::Http(status.as_u16()));
    }

    let body = response.bytes().await.map_err(|e| {
        tracing::warn!(%url, error = %e, "failed to read classifier response");
        ClassifyError::Network(e.to_string())
    })?;

    let result = parse_response(&body).inspect_err(|e| {
        tracing::warn!(%url, error = %e, "malformed classifier response");
    })?;
    tracing::debug!(%result, breakdown = result.breakdown().len(), "classification received");
    Ok(result)
}
