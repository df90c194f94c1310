// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for the application.
//!
//! This module provides localization capabilities using the Fluent localization system.
//!
//! # Features
//!
//! - Locale detection from CLI, config, or system settings
//! - Translations embedded at build time from `assets/i18n/*.ftl`
//! - Fallback to `en-US` when no preferred locale is available

pub mod fluent;
