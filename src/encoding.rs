//! Label encoding for the target column.
//!
//! Classes are sorted lexicographically, so code `i` always decodes to the
//! `i`-th smallest label. The encoder that produced the training codes must
//! be the one used to decode model output.

use ahash::AHashMap;
use serde::Serialize;

use crate::error::{Result, SympredictError};

/// Bidirectional mapping between label strings and dense class codes.
#[derive(Debug, Clone, Serialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
    #[serde(skip)]
    codes: AHashMap<String, usize>,
}

impl LabelEncoder {
    /// Build an encoder over the distinct labels.
    pub fn fit<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut classes: Vec<String> = labels.iter().map(|l| l.as_ref().to_string()).collect();
        classes.sort();
        classes.dedup();

        let codes = classes
            .iter()
            .enumerate()
            .map(|(code, label)| (label.clone(), code))
            .collect();

        Self { classes, codes }
    }

    /// Fit on `labels` and encode them in the same pass.
    pub fn fit_transform<S: AsRef<str>>(labels: &[S]) -> (Self, Vec<usize>) {
        let encoder = Self::fit(labels);
        let encoded = labels
            .iter()
            .map(|label| encoder.codes[label.as_ref()])
            .collect();
        (encoder, encoded)
    }

    /// Class code for `label`.
    pub fn encode(&self, label: &str) -> Result<usize> {
        self.codes
            .get(label)
            .copied()
            .ok_or_else(|| SympredictError::UnknownLabel(label.to_string()))
    }

    /// Label for `code`.
    pub fn decode(&self, code: usize) -> Result<&str> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(SympredictError::UnknownCode {
                code,
                known: self.classes.len(),
            })
    }

    /// All class labels, indexed by code.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_follow_sorted_order() {
        let labels = ["Malaria", "Allergy", "GERD", "Allergy"];
        let (encoder, encoded) = LabelEncoder::fit_transform(&labels);

        assert_eq!(encoder.classes(), &["Allergy", "GERD", "Malaria"]);
        assert_eq!(encoded, vec![2, 0, 1, 0]);
        assert_eq!(encoder.len(), 3);
    }

    #[test]
    fn test_encode_decode_agree() {
        let encoder = LabelEncoder::fit(&["Typhoid", "Jaundice", "Migraine"]);
        for label in ["Typhoid", "Jaundice", "Migraine"] {
            let code = encoder.encode(label).unwrap();
            assert_eq!(encoder.decode(code).unwrap(), label);
        }
    }

    #[test]
    fn test_unknown_values() {
        let encoder = LabelEncoder::fit(&["Acne", "Psoriasis"]);

        assert!(matches!(
            encoder.encode("Chicken pox"),
            Err(SympredictError::UnknownLabel(_))
        ));
        assert!(matches!(
            encoder.decode(2),
            Err(SympredictError::UnknownCode { code: 2, known: 2 })
        ));
    }
}
