//! Gaussian naive Bayes classifier.

use linfa::Dataset;
use linfa::prelude::*;
use linfa_bayes::GaussianNb;
use ndarray::{Array1, Array2, ArrayView1};

use super::{DiseaseClassifier, as_batch, validate_training_set};
use crate::error::{Result, SympredictError};

/// Gaussian naive Bayes over the symptom indicators.
pub struct NaiveBayesClassifier {
    model: GaussianNb<f64, usize>,
}

impl NaiveBayesClassifier {
    /// Fit on the full training set.
    pub fn fit(features: &Array2<f64>, labels: &[usize]) -> Result<Self> {
        validate_training_set(features, labels)?;

        let dataset = Dataset::new(features.clone(), Array1::from_vec(labels.to_vec()));
        let model = GaussianNb::<f64, usize>::params()
            .fit(&dataset)
            .map_err(|e| SympredictError::training(format!("naive Bayes: {e}")))?;

        Ok(Self { model })
    }
}

impl DiseaseClassifier for NaiveBayesClassifier {
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<usize> {
        let codes: Array1<usize> = self.model.predict(&as_batch(row));
        codes
            .first()
            .copied()
            .ok_or_else(|| SympredictError::training("naive Bayes returned no prediction"))
    }

    fn name(&self) -> &str {
        "naive_bayes"
    }
}
