use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoluteError {
    #[error("Invalid spiral geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid physical parameter: {0}")]
    InvalidParameter(String),

    #[error("Integration diverged at t={t_s} s: {message}")]
    IntegrationDiverged { t_s: f64, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type VoluteResult<T> = Result<T, VoluteError>;
