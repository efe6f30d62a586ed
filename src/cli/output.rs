//! Output formatting for CLI commands.

use std::fmt::Write as _;

use serde::Serialize;

use crate::cli::args::{OutputFormat, SympredictArgs};
use crate::error::Result;
use crate::predictor::DiseasePrediction;

/// Result of `predict`.
#[derive(Debug, Serialize)]
pub struct PredictionReport {
    /// Selected symptoms found in the catalog.
    pub recognized: Vec<String>,
    /// Selected symptoms that were ignored.
    pub ignored: Vec<String>,
    /// The voted prediction.
    pub prediction: DiseasePrediction,
}

/// One catalog entry for `symptoms`.
#[derive(Debug, Serialize)]
pub struct SymptomEntry {
    pub index: usize,
    pub name: String,
}

/// Anything the CLI can print in both formats.
pub trait Report: Serialize {
    /// Human-readable rendering.
    fn human(&self) -> String;
}

impl Report for PredictionReport {
    fn human(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Final prediction:   {} ({} of 3 models agree)",
            self.prediction.final_prediction,
            self.prediction.agreement()
        );
        let _ = writeln!(out, "  Random forest:    {}", self.prediction.random_forest);
        let _ = writeln!(out, "  Naive Bayes:      {}", self.prediction.naive_bayes);
        let _ = writeln!(out, "  SVM:              {}", self.prediction.svm);
        if !self.ignored.is_empty() {
            let _ = writeln!(out, "Ignored unknown symptoms: {}", self.ignored.join(", "));
        }
        out
    }
}

impl Report for Vec<String> {
    fn human(&self) -> String {
        let mut out = String::new();
        for name in self {
            let _ = writeln!(out, "{name}");
        }
        out
    }
}

impl Report for Vec<SymptomEntry> {
    fn human(&self) -> String {
        let mut out = String::new();
        for entry in self {
            let _ = writeln!(out, "{:>4}  {}", entry.index, entry.name);
        }
        out
    }
}

/// Render `report` in the requested format.
pub fn render<R: Report>(report: &R, cli_args: &SympredictArgs) -> Result<String> {
    match cli_args.output_format {
        OutputFormat::Human => Ok(report.human()),
        OutputFormat::Json => {
            let json = if cli_args.pretty {
                serde_json::to_string_pretty(report)?
            } else {
                serde_json::to_string(report)?
            };
            Ok(json + "\n")
        }
    }
}

/// Print `report` to stdout in the requested format.
pub fn output_result<R: Report>(report: &R, cli_args: &SympredictArgs) -> Result<()> {
    print!("{}", render(report, cli_args)?);
    Ok(())
}
