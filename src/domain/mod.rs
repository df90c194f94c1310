// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types and rules with no UI or I/O dependencies.
//!
//! This module contains pure value objects and business rules. Nothing here
//! touches the network, the filesystem or Iced, which keeps every rule
//! testable with plain unit tests.
//!
//! # Modules
//!
//! - [`classification`]: Classifier output ([`ClassificationResult`](classification::ClassificationResult),
//!   [`LabelScore`](classification::LabelScore)) and percentage formatting
//! - [`error`]: Failure taxonomy ([`SelectionError`](error::SelectionError),
//!   [`ClassifyError`](error::ClassifyError), [`Failure`](error::Failure))
//! - [`presentation`]: Label to accent/icon mapping ([`LabelStyle`](presentation::LabelStyle))

pub mod classification;
pub mod error;
pub mod presentation;
