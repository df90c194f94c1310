// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`classifier`]: Remote image classification
//! - [`preview`]: Allocation and release of renderable previews
//!
//! # Design Notes
//!
//! - No Iced handles and no `reqwest` types cross these traits
//! - Traits are `Send + Sync` so adapters can be shared with background tasks
//! - The classifier returns a boxed future that callers wrap in an Iced `Task`

pub mod classifier;
pub mod preview;

// Re-export main types for convenience
pub use classifier::{ClassifyFuture, Classifier, ImageUpload};
pub use preview::{PreviewId, PreviewStore};
