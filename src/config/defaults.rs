// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.

// ==========================================================================
// Endpoint Defaults
// ==========================================================================

/// Base URL of the inference server when nothing else is configured.
pub const DEFAULT_ENDPOINT_URL: &str = "http://localhost:8000";

/// Environment variable overriding the configured base URL.
pub const ENV_ENDPOINT: &str = "LEAF_LENS_ENDPOINT";

/// Longest request timeout accepted from the settings file (in seconds).
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 600;
