// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`selection`]: Candidate validation and preview ownership
//! - [`workflow`]: The submit / in-flight / result / error state machine
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer drives [`workflow::Workflow`] and renders its state
//!
//! # Example
//!
//! ```ignore
//! use leaf_lens::application::selection::Candidate;
//! use leaf_lens::application::workflow::{Effect, Event, Workflow};
//!
//! let mut workflow = Workflow::new(previews);
//! workflow.apply(Event::Acquire(Candidate::new("leaf.jpg", Some("image/jpeg"), bytes)));
//! if let Effect::Dispatch { ticket, upload } = workflow.apply(Event::Submit) {
//!     let outcome = classifier.classify(upload).await;
//!     workflow.apply(Event::Resolved { ticket, outcome });
//! }
//! ```

pub mod port;
pub mod selection;
pub mod workflow;
