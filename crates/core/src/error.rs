use thiserror::Error;

pub type RoiResult<T> = Result<T, RoiError>;

#[derive(Error, Debug)]
pub enum RoiError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown ranking metric: {0}")]
    UnknownMetric(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<config::ConfigError> for RoiError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
