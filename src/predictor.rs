//! Feature encoding and the three-model plurality vote.

use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::SymptomCatalog;
use crate::error::{Result, SympredictError};

/// What to do when all three models disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// The random forest prediction wins.
    #[default]
    RandomForest,
    /// Refuse to pick; the vote is reported as inconclusive.
    Reject,
}

impl FromStr for TieBreak {
    type Err = SympredictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rf" | "random_forest" | "random-forest" => Ok(TieBreak::RandomForest),
            "reject" => Ok(TieBreak::Reject),
            other => Err(SympredictError::invalid_config(format!(
                "unknown tie-break policy '{other}' (expected 'rf' or 'reject')"
            ))),
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TieBreak::RandomForest => write!(f, "rf"),
            TieBreak::Reject => write!(f, "reject"),
        }
    }
}

/// Individual model predictions plus the voted result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiseasePrediction {
    #[serde(rename = "rf_model_prediction")]
    pub random_forest: String,
    #[serde(rename = "naive_bayes_prediction")]
    pub naive_bayes: String,
    #[serde(rename = "svm_model_prediction")]
    pub svm: String,
    #[serde(rename = "final_prediction")]
    pub final_prediction: String,
}

impl DiseasePrediction {
    /// Vote over the three model outputs.
    pub fn vote(random_forest: String, naive_bayes: String, svm: String, tie: TieBreak) -> Result<Self> {
        let final_prediction = plurality_vote(&random_forest, &naive_bayes, &svm, tie)?.to_string();
        Ok(Self {
            random_forest,
            naive_bayes,
            svm,
            final_prediction,
        })
    }

    /// How many of the three models agree with the final prediction.
    pub fn agreement(&self) -> usize {
        [&self.random_forest, &self.naive_bayes, &self.svm]
            .into_iter()
            .filter(|p| **p == self.final_prediction)
            .count()
    }
}

/// The label predicted by at least two of the three models.
///
/// When all three differ the [`TieBreak`] policy decides.
pub fn plurality_vote<'a>(
    random_forest: &'a str,
    naive_bayes: &'a str,
    svm: &'a str,
    tie: TieBreak,
) -> Result<&'a str> {
    if random_forest == naive_bayes || random_forest == svm {
        return Ok(random_forest);
    }
    if naive_bayes == svm {
        return Ok(naive_bayes);
    }

    match tie {
        TieBreak::RandomForest => Ok(random_forest),
        TieBreak::Reject => Err(SympredictError::AmbiguousVote {
            rf: random_forest.to_string(),
            naive_bayes: naive_bayes.to_string(),
            svm: svm.to_string(),
        }),
    }
}

/// Binary feature row for the selected symptoms.
///
/// Unknown names and repeats are ignored.
pub fn encode_symptoms<I, S>(catalog: &SymptomCatalog, symptoms: I) -> Array1<f64>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut row = Array1::<f64>::zeros(catalog.len());
    for symptom in symptoms {
        let symptom = symptom.as_ref();
        match catalog.index_of(symptom) {
            Some(index) => row[index] = 1.0,
            None => debug!(symptom, "ignoring unknown symptom"),
        }
    }
    row
}
