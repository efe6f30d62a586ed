//! Error types for sympredict.
//!
//! Every fallible operation in the library returns [`Result`], whose error
//! side is the [`SympredictError`] enum. Startup failures (unreadable data,
//! too few classes, a model that refuses to fit) are fatal; per-request
//! failures are rendered by the web layer.
//!
//! # Examples
//!
//! ```
//! use sympredict::error::{Result, SympredictError};
//!
//! fn load() -> Result<()> {
//!     Err(SympredictError::data_load("no data rows"))
//! }
//!
//! assert_eq!(
//!     load().unwrap_err().to_string(),
//!     "Data load error: no data rows"
//! );
//! ```

use std::io;

use thiserror::Error;

/// The main error type for sympredict operations.
#[derive(Error, Debug)]
pub enum SympredictError {
    /// I/O errors (file operations, socket binding, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The training data is unreadable or malformed
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// A label string the encoder never saw during fitting
    #[error("Unknown label: {0}")]
    UnknownLabel(String),

    /// A class code outside the decoder range
    #[error("Unknown class code {code} (decoder knows {known} classes)")]
    UnknownCode { code: usize, known: usize },

    /// A model could not be trained
    #[error("Training error: {0}")]
    Training(String),

    /// All three models disagree and the tie policy rejects the vote
    #[error(
        "Ambiguous vote: random forest predicted {rf}, naive Bayes predicted {naive_bayes}, SVM predicted {svm}"
    )]
    AmbiguousVote {
        rf: String,
        naive_bayes: String,
        svm: String,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),
}

/// Result type alias for operations that may fail with SympredictError.
pub type Result<T> = std::result::Result<T, SympredictError>;

impl SympredictError {
    /// Create a new data load error.
    pub fn data_load<S: Into<String>>(msg: S) -> Self {
        SympredictError::DataLoad(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        SympredictError::Training(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        SympredictError::InvalidConfig(msg.into())
    }

    /// Create a new server error.
    pub fn server<S: Into<String>>(msg: S) -> Self {
        SympredictError::Server(msg.into())
    }

    /// Whether this error breaks an internal invariant rather than
    /// reflecting bad input.
    pub fn is_internal(&self) -> bool {
        matches!(self, SympredictError::UnknownCode { .. })
    }
}
