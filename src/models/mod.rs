//! Disease classifiers trained on the symptom feature matrix.
//!
//! Three independent models share the same input schema (one binary row
//! per patient, one column per symptom) and the same encoded labels:
//!
//! - [`SvmClassifier`]: RBF-kernel support vector machine, one-vs-one
//! - [`NaiveBayesClassifier`]: Gaussian naive Bayes
//! - [`RandomForestClassifier`]: seeded bagged decision trees
//!
//! Models are trained once and are query-only afterwards, so they can be
//! shared across request handlers without locking.

mod naive_bayes;
mod random_forest;
mod svm;

pub use naive_bayes::NaiveBayesClassifier;
pub use random_forest::{ForestConfig, RandomForestClassifier};
pub use svm::SvmClassifier;

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{Result, SympredictError};

/// Classifier trait.
///
/// Implementations map one feature row to an encoded class code.
pub trait DiseaseClassifier: Send + Sync {
    /// Predict the class code for a single feature row.
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<usize>;

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}

/// Check the inputs shared by every trainer and return the class count.
///
/// Codes are assumed dense (`0..n_classes`), as produced by
/// [`LabelEncoder`](crate::encoding::LabelEncoder).
pub(crate) fn validate_training_set(features: &Array2<f64>, labels: &[usize]) -> Result<usize> {
    if features.nrows() == 0 || features.ncols() == 0 {
        return Err(SympredictError::training(format!(
            "feature matrix is empty ({} rows, {} columns)",
            features.nrows(),
            features.ncols()
        )));
    }
    if features.nrows() != labels.len() {
        return Err(SympredictError::training(format!(
            "{} feature rows but {} labels",
            features.nrows(),
            labels.len()
        )));
    }

    let mut distinct = labels.to_vec();
    distinct.sort_unstable();
    distinct.dedup();
    if distinct.len() < 2 {
        return Err(SympredictError::training(format!(
            "need at least 2 distinct classes, found {}",
            distinct.len()
        )));
    }

    Ok(labels.iter().max().map_or(0, |max| max + 1))
}

/// Lift one row into a 1 x n matrix for batch-oriented predictors.
pub(crate) fn as_batch(row: ArrayView1<'_, f64>) -> Array2<f64> {
    row.to_owned().insert_axis(Axis(0))
}

/// Index of the largest count, preferring the lowest index on ties.
pub(crate) fn argmax_lowest(counts: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for (code, &count) in counts.iter().enumerate() {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((code, count)),
        }
    }
    best.map(|(code, _)| code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_validate_rejects_single_class() {
        let features = array![[1.0, 0.0], [0.0, 1.0]];
        let err = validate_training_set(&features, &[0, 0]).unwrap_err();
        assert!(err.to_string().contains("at least 2 distinct classes"));
    }

    #[test]
    fn test_validate_rejects_empty_and_mismatched() {
        let empty = Array2::<f64>::zeros((0, 3));
        assert!(validate_training_set(&empty, &[]).is_err());

        let features = array![[1.0], [0.0]];
        assert!(validate_training_set(&features, &[0]).is_err());
    }

    #[test]
    fn test_validate_counts_classes() {
        let features = array![[1.0], [0.0], [1.0]];
        assert_eq!(validate_training_set(&features, &[0, 2, 1]).unwrap(), 3);
    }

    #[test]
    fn test_argmax_prefers_lowest_code() {
        assert_eq!(argmax_lowest(&[1, 3, 3, 0]), Some(1));
        assert_eq!(argmax_lowest(&[0, 0]), Some(0));
        assert_eq!(argmax_lowest(&[]), None);
    }
}
