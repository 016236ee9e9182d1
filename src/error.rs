use thiserror::Error;

#[derive(Error, Debug)]
pub enum IrrigatorError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("Sensor unavailable: {0}")]
    Sensor(String),

    #[error("Actuator error: {0}")]
    Actuator(String),
}

pub type Result<T> = std::result::Result<T, IrrigatorError>;
