//! Command implementations for the sympredict CLI.

use std::sync::Arc;

use tracing::info;

use crate::catalog::SymptomCatalog;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::dataset::TrainingData;
use crate::error::{Result, SympredictError};
use crate::server;
use crate::service::SymptomService;

/// Execute a CLI command.
pub fn execute_command(args: SympredictArgs) -> Result<()> {
    match &args.command {
        Command::Serve(serve_args) => serve(serve_args, &args),
        Command::Predict(predict_args) => predict(predict_args, &args),
        Command::Search(search_args) => search(search_args, &args),
        Command::Symptoms(data_args) => list_symptoms(data_args, &args),
    }
}

/// Train, then serve until interrupted.
fn serve(args: &ServeArgs, _cli_args: &SympredictArgs) -> Result<()> {
    let config = args.service_config();
    config.validate()?;
    let addr = config.bind_addr()?;
    info!(config = ?config, "starting");

    let service = Arc::new(SymptomService::from_path(&config.data_path, &config.models)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| SympredictError::server(format!("cannot start runtime: {e}")))?;
    runtime.block_on(server::serve(service, addr))
}

/// Train, then predict once.
fn predict(args: &PredictArgs, cli_args: &SympredictArgs) -> Result<()> {
    output_result(&prediction_report(args)?, cli_args)
}

fn prediction_report(args: &PredictArgs) -> Result<PredictionReport> {
    let models = args.models.model_config();
    if models.forest.n_trees == 0 {
        return Err(SympredictError::invalid_config("--trees must be at least 1"));
    }
    let service = SymptomService::from_path(&args.data.data_path, &models)?;

    let symptoms: Vec<String> = args
        .symptoms
        .iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let (recognized, ignored): (Vec<String>, Vec<String>) = symptoms
        .iter()
        .cloned()
        .partition(|s| service.catalog().contains(s));

    let prediction = service.predict_disease(&symptoms)?;
    Ok(PredictionReport {
        recognized,
        ignored,
        prediction,
    })
}

/// Search the catalog without training any model.
fn search(args: &SearchArgs, cli_args: &SympredictArgs) -> Result<()> {
    output_result(&search_matches(args)?, cli_args)
}

fn search_matches(args: &SearchArgs) -> Result<Vec<String>> {
    let catalog = load_catalog(&args.data)?;
    Ok(catalog
        .search(&args.query)
        .into_iter()
        .map(str::to_string)
        .collect())
}

/// List every symptom with its feature index.
fn list_symptoms(args: &DataArgs, cli_args: &SympredictArgs) -> Result<()> {
    output_result(&symptom_entries(args)?, cli_args)
}

fn symptom_entries(args: &DataArgs) -> Result<Vec<SymptomEntry>> {
    let catalog = load_catalog(args)?;
    Ok(catalog
        .names()
        .iter()
        .enumerate()
        .map(|(index, name)| SymptomEntry {
            index,
            name: name.clone(),
        })
        .collect())
}

fn load_catalog(args: &DataArgs) -> Result<SymptomCatalog> {
    let data = TrainingData::from_path(&args.data_path)?;
    SymptomCatalog::from_feature_names(&data.feature_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::predictor::TieBreak;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/training_small.csv");

    fn data_args() -> DataArgs {
        DataArgs {
            data_path: PathBuf::from(FIXTURE),
        }
    }

    fn predict_args(trees: usize, symptoms: &[&str]) -> PredictArgs {
        PredictArgs {
            data: data_args(),
            models: ModelArgs {
                tie_break: TieBreak::RandomForest,
                trees,
                seed: 18,
                max_depth: None,
            },
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_predict_splits_recognized_and_ignored() {
        let args = predict_args(10, &["Itching", " Skin Rash ", "", "  ", "Headache"]);
        let report = prediction_report(&args).unwrap();

        assert_eq!(report.recognized, vec!["Itching", "Skin Rash"]);
        assert_eq!(report.ignored, vec!["Headache"]);
        assert_eq!(report.prediction.final_prediction, "Fungal infection");
    }

    #[test]
    fn test_predict_rejects_zero_trees() {
        let err = prediction_report(&predict_args(0, &["Itching"])).unwrap_err();
        assert!(matches!(err, SympredictError::InvalidConfig(_)));
    }

    #[test]
    fn test_predict_with_missing_data_file() {
        let mut args = predict_args(10, &["Itching"]);
        args.data.data_path = PathBuf::from("/nonexistent/Training.csv");
        let err = prediction_report(&args).unwrap_err();
        assert!(matches!(err, SympredictError::DataLoad(_)));
    }

    #[test]
    fn test_search_reads_catalog_from_file() {
        let args = SearchArgs {
            data: data_args(),
            query: "PAIN".to_string(),
        };
        assert_eq!(search_matches(&args).unwrap(), vec!["Joint Pain", "Stomach Pain"]);

        let args = SearchArgs {
            data: data_args(),
            query: String::new(),
        };
        assert_eq!(search_matches(&args).unwrap().len(), 10);
    }

    #[test]
    fn test_symptom_entries_follow_feature_order() {
        let entries = symptom_entries(&data_args()).unwrap();

        assert_eq!(entries.len(), 10);
        assert_eq!((entries[0].index, entries[0].name.as_str()), (0, "Itching"));
        assert_eq!((entries[9].index, entries[9].name.as_str()), (9, "Vomiting"));
    }
}
