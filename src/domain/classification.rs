// SPDX-License-Identifier: MPL-2.0
//! Classification results returned by the remote classifier.
//!
//! A result is replaced wholesale on every submission, so the types here are
//! plain immutable values. No range or consistency checks are applied: the
//! chosen label does not have to appear in the breakdown and the breakdown
//! does not have to sum to one.

use std::fmt;

/// Confidence for one label of the breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub confidence: f64,
}

impl LabelScore {
    #[must_use]
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Confidence rendered as a percentage with one decimal (`0.05` → `"5.0%"`).
    #[must_use]
    pub fn percent_label(&self) -> String {
        format_percent(self.confidence)
    }
}

/// Outcome of a successful classification.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    chosen_label: String,
    confidence: f64,
    /// Per-label confidences, in the order the server listed them.
    breakdown: Vec<LabelScore>,
}

impl ClassificationResult {
    #[must_use]
    pub fn new(chosen_label: impl Into<String>, confidence: f64, breakdown: Vec<LabelScore>) -> Self {
        Self {
            chosen_label: chosen_label.into(),
            confidence,
            breakdown,
        }
    }

    #[must_use]
    pub fn chosen_label(&self) -> &str {
        &self.chosen_label
    }

    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Confidence of the chosen label rendered as a percentage.
    #[must_use]
    pub fn percent_label(&self) -> String {
        format_percent(self.confidence)
    }

    #[must_use]
    pub fn breakdown(&self) -> &[LabelScore] {
        &self.breakdown
    }

    /// Looks up the confidence reported for `label` in the breakdown.
    #[must_use]
    pub fn score_for(&self, label: &str) -> Option<f64> {
        self.breakdown
            .iter()
            .find(|score| score.label == label)
            .map(|score| score.confidence)
    }
}

impl fmt::Display for ClassificationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.chosen_label, self.percent_label())
    }
}

/// Formats a `[0, 1]` confidence as a percentage with one decimal place.
///
/// Values outside the unit range are formatted as-is (`1.5` → `"150.0%"`).
#[must_use]
pub fn format_percent(confidence: f64) -> String {
    format!("{:.1}%", confidence * 100.0)
}
