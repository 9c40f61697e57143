// src/domain/error.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Malformed data: {0}")]
    MalformedData(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Document store error: {0}")]
    Document(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        let context = context.into();
        match self {
            DomainError::InvalidTag(msg) => DomainError::InvalidTag(format!("{}: {}", context, msg)),
            DomainError::LimitExceeded(msg) => {
                DomainError::LimitExceeded(format!("{}: {}", context, msg))
            }
            DomainError::Upload(msg) => DomainError::Upload(format!("{}: {}", context, msg)),
            DomainError::Delete(msg) => DomainError::Delete(format!("{}: {}", context, msg)),
            DomainError::MalformedData(msg) => {
                DomainError::MalformedData(format!("{}: {}", context, msg))
            }
            DomainError::Storage(msg) => DomainError::Storage(format!("{}: {}", context, msg)),
            DomainError::Document(msg) => DomainError::Document(format!("{}: {}", context, msg)),
            DomainError::Io(err) => {
                DomainError::Io(std::io::Error::new(err.kind(), format!("{}: {}", context, err)))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context, msg)),
        }
    }

    /// Validation failures are raised before any I/O and can be fixed by the caller.
    pub fn is_validation(&self) -> bool {
        matches!(self, DomainError::InvalidTag(_) | DomainError::LimitExceeded(_))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
