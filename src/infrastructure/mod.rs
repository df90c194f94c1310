// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like
//! `reqwest` and the Iced image cache.
//!
//! # Available Adapters
//!
//! - [`http`]: Remote classification over HTTP (implements [`Classifier`])
//! - [`preview`]: Image handle store (implements [`PreviewStore`])
//!
//! [`Classifier`]: crate::application::port::Classifier
//! [`PreviewStore`]: crate::application::port::PreviewStore

pub mod http;
pub mod preview;

pub use http::{Endpoint, HttpClassifier, Unavailable};
pub use preview::HandlePreviewStore;
