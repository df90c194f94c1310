// SPDX-License-Identifier: MPL-2.0
//! User interface components.
//!
//! Elm-style "state down, messages up": screens render from borrowed state
//! and emit messages the app shell routes to the workflow.
//!
//! - [`classifier`] - The classifier screen (upload, preview, diagnosis)
//! - [`notifications`] - Toast notification system for user feedback
//! - [`styles`] - Centralized styling (buttons, containers, progress bars)
//! - [`design_tokens`] - Design system constants (colors, spacing, sizing)
//! - [`theming`] - Light/Dark/System theme mode management

pub mod classifier;
pub mod design_tokens;
pub mod notifications;
pub mod styles;
pub mod theming;
