//! Core data types for the Prism classification pipeline.

use serde::{Deserialize, Serialize};

use crate::catalog::Label;

/// A single classified label with its probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// The class label this prediction refers to
    pub label: Label,
    /// Softmax probability, rounded to 3 decimals, always > 0
    pub score: f32,
}

/// The complete output for one classified image: up to five predictions,
/// descending by score. The envelope matches what an enclosing serving
/// layer returns as its response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    /// Ranked predictions; may be empty when every class rounds to zero
    pub predictions: Vec<Prediction>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Label;

    #[test]
    fn test_prediction_serializes_label_and_score() {
        let prediction = Prediction {
            label: Label::parse("n01531178 goldfinch, Carduelis carduelis").unwrap(),
            score: 0.966,
        };
        let json = serde_json::to_value(&Classification {
            predictions: vec![prediction],
        })
        .unwrap();

        let p = &json["predictions"][0];
        assert_eq!(p["label"]["synset_id"], "n01531178");
        assert_eq!(p["score"], 0.966f32 as f64);
        let names = p["label"]["names"].as_array().unwrap();
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_empty_classification_serializes() {
        let json = serde_json::to_string(&Classification {
            predictions: vec![],
        })
        .unwrap();
        assert_eq!(json, r#"{"predictions":[]}"#);
    }
}
