use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Request failed with status {status_code}: {status_message}")]
    RequestFailed {
        status_code: u16,
        status_message: String,
    },
    #[error("Unexpected response from server: {0}")]
    UnexpectedResponseShape(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Payment is not bound to an order or a multiorder")]
    MissingParent,
    #[error("Payment is already bound to {0}")]
    ConflictingParent(String),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Transport error: {0}")]
    TransportError(#[from] reqwest::Error),
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PaymentError>;
