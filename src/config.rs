//! Service configuration.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SympredictError};
use crate::models::ForestConfig;
use crate::predictor::TieBreak;

/// Default location of the training data file.
pub const DEFAULT_DATA_PATH: &str = "Training.csv";

/// Model training and voting options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Random forest hyperparameters.
    pub forest: ForestConfig,
    /// Policy for a three-way disagreement.
    pub tie_break: TieBreak,
}

/// Everything needed to start the web service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Training data CSV.
    pub data_path: PathBuf,
    /// Address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Model options.
    pub models: ModelConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            host: "127.0.0.1".to_string(),
            port: 5000,
            models: ModelConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Check values that clap cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        if self.models.forest.n_trees == 0 {
            return Err(SympredictError::invalid_config("--trees must be at least 1"));
        }
        if self.data_path.as_os_str().is_empty() {
            return Err(SympredictError::invalid_config("data path is empty"));
        }
        self.bind_addr().map(|_| ())
    }

    /// Socket address from `host` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.host.parse().map_err(|_| {
            SympredictError::invalid_config(format!("'{}' is not an IP address", self.host))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
