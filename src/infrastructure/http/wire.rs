// SPDX-License-Identifier: MPL-2.0
//! JSON body of a successful `/predict` response.
//!
//! ```json
//! {
//!   "chosen_class": "Healthy",
//!   "confidence": 0.92,
//!   "predictions": { "Healthy": 0.92, "Early Blight": 0.05, "Late Blight": 0.03 }
//! }
//! ```
//!
//! Unknown fields are ignored. The order of `predictions` is preserved and a
//! label listed twice is rejected.

use crate::domain::classification::{ClassificationResult, LabelScore};
use crate::domain::error::ClassifyError;
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use std::fmt;

#[derive(Debug, Deserialize)]
struct PredictResponse {
    chosen_class: String,
    confidence: f64,
    predictions: Predictions,
}

/// Label → confidence pairs in document order.
#[derive(Debug)]
struct Predictions(Vec<LabelScore>);

impl<'de> Deserialize<'de> for Predictions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct PredictionsVisitor;

        impl<'de> Visitor<'de> for PredictionsVisitor {
            type Value = Predictions;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of label to confidence")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut scores: Vec<LabelScore> = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((label, confidence)) = map.next_entry::<String, f64>()? {
                    if scores.iter().any(|score| score.label == label) {
                        return Err(de::Error::custom(format!("duplicate label `{label}`")));
                    }
                    scores.push(LabelScore::new(label, confidence));
                }
                Ok(Predictions(scores))
            }
        }

        deserializer.deserialize_map(PredictionsVisitor)
    }
}

impl From<PredictResponse> for ClassificationResult {
    fn from(response: PredictResponse) -> Self {
        ClassificationResult::new(
            response.chosen_class,
            response.confidence,
            response.predictions.0,
        )
    }
}

/// Parses a response body into a [`ClassificationResult`].
///
/// # Errors
///
/// Returns [`ClassifyError::Parse`] when the body is not JSON, a required
/// field is missing, or a field has the wrong type.
pub fn parse_response(body: &[u8]) -> Result<ClassificationResult, ClassifyError> {
    serde_json::from_slice::<PredictResponse>(body)
        .map(ClassificationResult::from)
        .map_err(|e| ClassifyError::Parse(e.to_string()))
}
