// SPDX-License-Identifier: MPL-2.0
//! `leaf_lens` is a desktop client for a remote potato leaf disease classifier.
//!
//! The user drops or picks one leaf photo, sends it to the classification
//! server and gets back a diagnosis with a per-label confidence breakdown.
//!
//! # Layers
//!
//! - [`domain`] - Classification results, label presentation and error types
//! - [`application`] - Ports, image selection and the workflow state machine
//! - [`infrastructure`] - HTTP gateway and preview store adapters
//! - [`app`] / [`ui`] - The Iced shell and its widgets
//! - [`config`], [`i18n`], [`media`] - Settings, localization and file reading

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod media;
pub mod ui;
