//! Support vector classifier using Linfa.
//!
//! linfa-svm only trains binary machines, so multiclass prediction is done
//! one-vs-one: a Gaussian-kernel SVM is fitted for every pair of classes on
//! the rows of those two classes, and each machine casts one vote.
//!
//! - Kernel: k(x, y) = exp(-||x - y||² / eps), eps = n_features * var(X)
//! - Decision: class with the most pairwise wins, lowest code on ties

use linfa::Dataset;
use linfa::prelude::*;
use linfa_svm::Svm;
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rayon::prelude::*;

use super::{DiseaseClassifier, argmax_lowest, as_batch, validate_training_set};
use crate::error::{Result, SympredictError};

/// Binary machine separating `positive` (true) from `negative` (false).
struct PairwiseSvm {
    positive: usize,
    negative: usize,
    model: Svm<f64, bool>,
}

/// One-vs-one RBF support vector classifier.
pub struct SvmClassifier {
    machines: Vec<PairwiseSvm>,
    n_classes: usize,
    kernel_eps: f64,
}

impl SvmClassifier {
    /// Fit one machine per class pair on the full training set.
    pub fn fit(features: &Array2<f64>, labels: &[usize]) -> Result<Self> {
        let n_classes = validate_training_set(features, labels)?;
        let kernel_eps = kernel_width(features);

        let mut rows_by_class: Vec<Vec<usize>> = vec![Vec::new(); n_classes];
        for (row, &code) in labels.iter().enumerate() {
            rows_by_class[code].push(row);
        }

        let pairs: Vec<(usize, usize)> = (0..n_classes)
            .flat_map(|i| (i + 1..n_classes).map(move |j| (i, j)))
            .filter(|&(i, j)| !rows_by_class[i].is_empty() && !rows_by_class[j].is_empty())
            .collect();

        let machines = pairs
            .into_par_iter()
            .map(|(positive, negative)| {
                let rows: Vec<usize> = rows_by_class[positive]
                    .iter()
                    .chain(&rows_by_class[negative])
                    .copied()
                    .collect();
                let records = features.select(Axis(0), &rows);
                let targets: Array1<bool> = rows.iter().map(|&r| labels[r] == positive).collect();

                let model = Svm::<_, bool>::params()
                    .pos_neg_weights(1.0, 1.0)
                    .gaussian_kernel(kernel_eps)
                    .fit(&Dataset::new(records, targets))
                    .map_err(|e| {
                        SympredictError::training(format!(
                            "SVM for classes {positive} vs {negative}: {e}"
                        ))
                    })?;

                Ok(PairwiseSvm {
                    positive,
                    negative,
                    model,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            machines,
            n_classes,
            kernel_eps,
        })
    }

    /// Number of pairwise machines.
    pub fn n_machines(&self) -> usize {
        self.machines.len()
    }

    /// Gaussian kernel width used by every machine.
    pub fn kernel_eps(&self) -> f64 {
        self.kernel_eps
    }
}

/// Kernel width from the overall feature variance.
fn kernel_width(features: &Array2<f64>) -> f64 {
    let eps = features.ncols() as f64 * features.var(0.0);
    if eps.is_finite() && eps > 0.0 { eps } else { 1.0 }
}

impl DiseaseClassifier for SvmClassifier {
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<usize> {
        let batch = as_batch(row);
        let mut votes = vec![0usize; self.n_classes];
        for machine in &self.machines {
            let decisions: Array1<bool> = machine.model.predict(&batch);
            let winner = if decisions.first().copied().unwrap_or(false) {
                machine.positive
            } else {
                machine.negative
            };
            votes[winner] += 1;
        }

        argmax_lowest(&votes).ok_or_else(|| SympredictError::training("SVM has no classes"))
    }

    fn name(&self) -> &str {
        "svm"
    }
}
