//! Error type shared by tree parsing and classification

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("anomaly {0} not found in tree")]
    AnomalyNotFound(i64),

    #[error("invalid anomaly tree: {0}")]
    InvalidTree(#[from] serde_json::Error),

    #[error("invalid classifier config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
