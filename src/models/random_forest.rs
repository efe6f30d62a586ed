//! Random forest built from linfa decision trees.
//!
//! Each tree sees a bootstrap sample of the rows and a random subspace of
//! `ceil(sqrt(n_features))` feature columns. The random draws come from a
//! single seeded generator and are made up front, so the forest is the
//! same for a given seed no matter how the trees are scheduled.

use linfa::Dataset;
use linfa::prelude::*;
use linfa_trees::{DecisionTree, SplitQuality};
use ndarray::{Array1, Array2, ArrayView1, Axis};
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{DiseaseClassifier, argmax_lowest, validate_training_set};
use crate::error::{Result, SympredictError};

/// Random forest hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees.
    pub n_trees: usize,
    /// Seed for bootstrap and feature sampling.
    pub seed: u64,
    /// Maximum tree depth (unbounded when `None`).
    pub max_depth: Option<usize>,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 18,
            max_depth: None,
        }
    }
}

struct ForestMember {
    columns: Vec<usize>,
    tree: DecisionTree<f64, usize>,
}

/// Bagged decision trees voting by majority.
pub struct RandomForestClassifier {
    members: Vec<ForestMember>,
    n_classes: usize,
}

impl RandomForestClassifier {
    /// Fit a forest on the full training set.
    pub fn fit(features: &Array2<f64>, labels: &[usize], config: &ForestConfig) -> Result<Self> {
        let n_classes = validate_training_set(features, labels)?;
        if config.n_trees == 0 {
            return Err(SympredictError::training("random forest needs at least one tree"));
        }

        let n_rows = features.nrows();
        let n_cols = features.ncols();
        let subspace = ((n_cols as f64).sqrt().ceil() as usize).clamp(1, n_cols);

        let mut rng = StdRng::seed_from_u64(config.seed);
        let draws: Vec<(Vec<usize>, Vec<usize>)> = (0..config.n_trees)
            .map(|_| {
                let rows: Vec<usize> = (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect();
                let mut columns = sample(&mut rng, n_cols, subspace).into_vec();
                columns.sort_unstable();
                (rows, columns)
            })
            .collect();

        let members = draws
            .into_par_iter()
            .map(|(rows, columns)| {
                let records = features.select(Axis(0), &rows).select(Axis(1), &columns);
                let targets: Array1<usize> = rows.iter().map(|&r| labels[r]).collect();
                let tree = DecisionTree::<f64, usize>::params()
                    .split_quality(SplitQuality::Gini)
                    .max_depth(config.max_depth)
                    .fit(&Dataset::new(records, targets))
                    .map_err(|e| SympredictError::training(format!("decision tree: {e}")))?;
                Ok(ForestMember { columns, tree })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { members, n_classes })
    }

    /// Number of trees in the forest.
    pub fn n_trees(&self) -> usize {
        self.members.len()
    }
}

impl DiseaseClassifier for RandomForestClassifier {
    fn predict(&self, row: ArrayView1<'_, f64>) -> Result<usize> {
        let mut votes = vec![0usize; self.n_classes];
        for member in &self.members {
            let projected = row.select(Axis(0), &member.columns).insert_axis(Axis(0));
            let codes: Array1<usize> = member.tree.predict(&projected);
            for &code in &codes {
                let slot = votes.get_mut(code).ok_or(SympredictError::UnknownCode {
                    code,
                    known: self.n_classes,
                })?;
                *slot += 1;
            }
        }

        argmax_lowest(&votes)
            .ok_or_else(|| SympredictError::training("random forest has no classes"))
    }

    fn name(&self) -> &str {
        "random_forest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn training_set() -> (Array2<f64>, Vec<usize>) {
        let features = array![
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
        ];
        (features, vec![0, 0, 0, 1, 1, 1])
    }

    #[test]
    fn test_forest_learns_separable_classes() {
        let (features, labels) = training_set();
        let forest = RandomForestClassifier::fit(&features, &labels, &ForestConfig::default()).unwrap();

        assert_eq!(forest.n_trees(), 100);
        assert_eq!(forest.predict(array![1.0, 1.0, 0.0, 0.0].view()).unwrap(), 0);
        assert_eq!(forest.predict(array![0.0, 0.0, 1.0, 1.0].view()).unwrap(), 1);
    }

    #[test]
    fn test_same_seed_same_forest() {
        let (features, labels) = training_set();
        let config = ForestConfig {
            n_trees: 15,
            ..ForestConfig::default()
        };
        let a = RandomForestClassifier::fit(&features, &labels, &config).unwrap();
        let b = RandomForestClassifier::fit(&features, &labels, &config).unwrap();

        for probe in [
            array![1.0, 0.0, 1.0, 0.0],
            array![0.0, 1.0, 0.0, 1.0],
            array![0.0, 0.0, 0.0, 0.0],
        ] {
            assert_eq!(a.predict(probe.view()).unwrap(), b.predict(probe.view()).unwrap());
        }
    }

    #[test]
    fn test_zero_trees_is_rejected() {
        let (features, labels) = training_set();
        let config = ForestConfig {
            n_trees: 0,
            ..ForestConfig::default()
        };
        assert!(RandomForestClassifier::fit(&features, &labels, &config).is_err());
    }
}
