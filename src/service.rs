//! The trained service context shared by every request.
//!
//! A [`SymptomService`] is built once at startup, strictly in dependency
//! order (dataset, then catalog and label encoder, then models), and is
//! read-only afterwards. Handlers receive it behind an `Arc`.

use std::path::Path;
use std::time::Instant;

use tracing::{error, info};

use crate::catalog::SymptomCatalog;
use crate::config::ModelConfig;
use crate::dataset::TrainingData;
use crate::encoding::LabelEncoder;
use crate::error::{Result, SympredictError};
use crate::models::{
    DiseaseClassifier, NaiveBayesClassifier, RandomForestClassifier, SvmClassifier,
};
use crate::predictor::{DiseasePrediction, TieBreak, encode_symptoms};

/// The three voting models.
pub struct VotingModels {
    pub random_forest: Box<dyn DiseaseClassifier>,
    pub naive_bayes: Box<dyn DiseaseClassifier>,
    pub svm: Box<dyn DiseaseClassifier>,
}

impl VotingModels {
    /// Train all three models on the full data set.
    pub fn train(data: &TrainingData, labels: &[usize], config: &ModelConfig) -> Result<Self> {
        let svm = timed("svm", || SvmClassifier::fit(&data.features, labels))?;
        let naive_bayes = timed("naive_bayes", || {
            NaiveBayesClassifier::fit(&data.features, labels)
        })?;
        let random_forest = timed("random_forest", || {
            RandomForestClassifier::fit(&data.features, labels, &config.forest)
        })?;

        Ok(Self {
            random_forest: Box::new(random_forest),
            naive_bayes: Box::new(naive_bayes),
            svm: Box::new(svm),
        })
    }
}

fn timed<T>(model: &str, fit: impl FnOnce() -> Result<T>) -> Result<T> {
    let start = Instant::now();
    let fitted = fit()?;
    info!(model, elapsed_ms = start.elapsed().as_millis() as u64, "model trained");
    Ok(fitted)
}

/// Catalog, label decoder and trained models.
pub struct SymptomService {
    catalog: SymptomCatalog,
    encoder: LabelEncoder,
    models: VotingModels,
    tie_break: TieBreak,
}

impl SymptomService {
    /// Load the training file and train every model.
    pub fn from_path<P: AsRef<Path>>(path: P, config: &ModelConfig) -> Result<Self> {
        let data = TrainingData::from_path(path)?;
        Self::train(&data, config)
    }

    /// Build the catalog and encoder from `data`, then train the models.
    pub fn train(data: &TrainingData, config: &ModelConfig) -> Result<Self> {
        let catalog = SymptomCatalog::from_feature_names(&data.feature_names)?;
        let (encoder, labels) = LabelEncoder::fit_transform(&data.labels);
        if encoder.len() < 2 {
            return Err(SympredictError::training(format!(
                "column '{}' has {} distinct label(s), need at least 2",
                data.label_column,
                encoder.len()
            )));
        }
        info!(
            symptoms = catalog.len(),
            classes = encoder.len(),
            rows = data.n_rows(),
            "training models"
        );

        let models = VotingModels::train(data, &labels, config)?;
        Ok(Self::from_parts(catalog, encoder, models, config.tie_break))
    }

    /// Assemble a service from already trained parts.
    pub fn from_parts(
        catalog: SymptomCatalog,
        encoder: LabelEncoder,
        models: VotingModels,
        tie_break: TieBreak,
    ) -> Self {
        Self {
            catalog,
            encoder,
            models,
            tie_break,
        }
    }

    /// Predict a disease from a symptom selection.
    ///
    /// Unknown names and duplicates are ignored; an empty selection still
    /// yields a prediction.
    pub fn predict_disease<I, S>(&self, symptoms: I) -> Result<DiseasePrediction>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row = encode_symptoms(&self.catalog, symptoms);

        let random_forest = self.run(self.models.random_forest.as_ref(), &row)?;
        let naive_bayes = self.run(self.models.naive_bayes.as_ref(), &row)?;
        let svm = self.run(self.models.svm.as_ref(), &row)?;

        DiseasePrediction::vote(random_forest, naive_bayes, svm, self.tie_break)
    }

    fn run(&self, model: &dyn DiseaseClassifier, row: &ndarray::Array1<f64>) -> Result<String> {
        let code = model.predict(row.view())?;
        match self.encoder.decode(code) {
            Ok(label) => Ok(label.to_string()),
            Err(e) => {
                error!(model = model.name(), code, "model produced a code the decoder does not know");
                Err(e)
            }
        }
    }

    /// Symptom names matching `query`, in catalog order.
    pub fn search(&self, query: &str) -> Vec<&str> {
        self.catalog.search(query)
    }

    pub fn catalog(&self) -> &SymptomCatalog {
        &self.catalog
    }

    /// Disease labels, indexed by class code.
    pub fn classes(&self) -> &[String] {
        self.encoder.classes()
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }
}
