//! # sympredict
//!
//! Disease prediction from a symptom checklist.
//!
//! At startup a labeled symptom CSV is loaded and three classifiers are
//! trained on it: an RBF support vector machine, Gaussian naive Bayes and a
//! seeded random forest. A prediction encodes the selected symptoms as a
//! binary row, asks every model, and returns each answer together with the
//! plurality vote.
//!
//! ## Features
//!
//! - Column-dropping CSV loader with sorted label encoding
//! - Symptom catalog with case-insensitive search
//! - Configurable policy for three-way disagreements
//! - axum web form, search endpoint and JSON API
//!
//! ```rust,no_run
//! use sympredict::config::ModelConfig;
//! use sympredict::service::SymptomService;
//!
//! # fn main() -> sympredict::error::Result<()> {
//! let service = SymptomService::from_path("Training.csv", &ModelConfig::default())?;
//! let prediction = service.predict_disease(["Itching", "Skin Rash"])?;
//! println!("{}", prediction.final_prediction);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod encoding;
pub mod error;
pub mod logging;
pub mod models;
pub mod predictor;
pub mod server;
pub mod service;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
