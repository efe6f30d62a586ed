//! Command line argument parsing for the sympredict CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_DATA_PATH, ModelConfig, ServiceConfig};
use crate::models::ForestConfig;
use crate::predictor::TieBreak;

/// sympredict - disease prediction from a symptom checklist
#[derive(Parser, Debug, Clone)]
#[command(name = "sympredict")]
#[command(about = "Predict diseases from symptoms with a three-model majority vote")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct SympredictArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl SympredictArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train the models and serve the web form
    Serve(ServeArgs),

    /// Train the models and predict once
    Predict(PredictArgs),

    /// Search the symptom catalog
    Search(SearchArgs),

    /// List every known symptom with its feature index
    Symptoms(DataArgs),
}

impl Command {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Serve(_) => "serve",
            Command::Predict(_) => "predict",
            Command::Search(_) => "search",
            Command::Symptoms(_) => "symptoms",
        }
    }
}

/// Location of the training data
#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Training data CSV
    #[arg(short, long = "data", env = "SYMPREDICT_DATA", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,
}

/// Model options shared by commands that train
#[derive(Args, Debug, Clone)]
pub struct ModelArgs {
    /// Policy when all three models disagree (rf or reject)
    #[arg(long, env = "SYMPREDICT_TIE_BREAK", default_value = "rf")]
    pub tie_break: TieBreak,

    /// Number of random forest trees
    #[arg(long, env = "SYMPREDICT_TREES", default_value = "100")]
    pub trees: usize,

    /// Random forest seed
    #[arg(long, env = "SYMPREDICT_SEED", default_value = "18")]
    pub seed: u64,

    /// Maximum depth of each random forest tree
    #[arg(long, env = "SYMPREDICT_MAX_DEPTH")]
    pub max_depth: Option<usize>,
}

impl ModelArgs {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            forest: ForestConfig {
                n_trees: self.trees,
                seed: self.seed,
                max_depth: self.max_depth,
            },
            tie_break: self.tie_break,
        }
    }
}

/// Arguments for serving
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub models: ModelArgs,

    /// Address to bind
    #[arg(long, env = "SYMPREDICT_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(short, long, env = "SYMPREDICT_PORT", default_value = "5000")]
    pub port: u16,
}

impl ServeArgs {
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            data_path: self.data.data_path.clone(),
            host: self.host.clone(),
            port: self.port,
            models: self.models.model_config(),
        }
    }
}

/// Arguments for a one-off prediction
#[derive(Parser, Debug, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(flatten)]
    pub models: ModelArgs,

    /// Symptom names, e.g. "Skin Rash" (comma-separated lists are accepted)
    #[arg(value_name = "SYMPTOM", value_delimiter = ',')]
    pub symptoms: Vec<String>,
}

/// Arguments for catalog search
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Text to look for (empty lists everything)
    #[arg(value_name = "QUERY", default_value = "")]
    pub query: String,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serve_command() {
        let args = SympredictArgs::try_parse_from([
            "sympredict",
            "serve",
            "--data",
            "/data/Training.csv",
            "--port",
            "8080",
            "--tie-break",
            "reject",
        ])
        .unwrap();

        if let Command::Serve(serve_args) = args.command {
            let config = serve_args.service_config();
            assert_eq!(config.data_path, PathBuf::from("/data/Training.csv"));
            assert_eq!(config.port, 8080);
            assert_eq!(config.host, "127.0.0.1");
            assert_eq!(config.models.tie_break, TieBreak::Reject);
            assert_eq!(config.models.forest.n_trees, 100);
            assert_eq!(config.models.forest.seed, 18);
        } else {
            panic!("Expected Serve command");
        }
    }

    #[test]
    fn test_predict_command() {
        let args = SympredictArgs::try_parse_from([
            "sympredict",
            "predict",
            "Itching",
            "Skin Rash,Chills",
        ])
        .unwrap();

        if let Command::Predict(predict_args) = args.command {
            assert_eq!(predict_args.symptoms, vec!["Itching", "Skin Rash", "Chills"]);
        } else {
            panic!("Expected Predict command");
        }
    }

    #[test]
    fn test_search_defaults_to_empty_query() {
        let args = SympredictArgs::try_parse_from(["sympredict", "search"]).unwrap();

        if let Command::Search(search_args) = args.command {
            assert_eq!(search_args.query, "");
        } else {
            panic!("Expected Search command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        let args = SympredictArgs::try_parse_from(["sympredict", "symptoms"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = SympredictArgs::try_parse_from(["sympredict", "-vv", "symptoms"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = SympredictArgs::try_parse_from(["sympredict", "--quiet", "symptoms"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            SympredictArgs::try_parse_from(["sympredict", "symptoms", "--format", "json"]).unwrap();
        assert_eq!(args.output_format, OutputFormat::Json);
    }
}
