use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecurityError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid coordinate: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SecurityResult<T> = Result<T, SecurityError>;
