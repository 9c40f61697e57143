// src/infrastructure/error.rs
use crate::domain::error::DomainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("File system error: {0}")]
    FileSystem(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

// Implement conversion from infrastructure errors to domain errors
impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::FileSystem(msg) => DomainError::Storage(msg),
            InfrastructureError::Serialization(msg) => DomainError::Document(msg),
            InfrastructureError::Storage(msg) => DomainError::Storage(msg),
            InfrastructureError::InvalidUrl(msg) => DomainError::Other(format!("Invalid URL: {}", msg)),
        }
    }
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(error: serde_json::Error) -> Self {
        InfrastructureError::Serialization(error.to_string())
    }
}

pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
