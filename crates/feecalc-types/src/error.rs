use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeeCalcError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid fee rule: {0}")]
    InvalidRule(String),

    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Solver error: {0}")]
    SolverError(String),
}

impl From<serde_json::Error> for FeeCalcError {
    fn from(err: serde_json::Error) -> Self {
        FeeCalcError::SerializationError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, FeeCalcError>;
