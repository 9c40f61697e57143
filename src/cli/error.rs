// src/cli/error.rs
use crate::application::error::ApplicationError;
use crate::domain::error::DomainError;
use crate::exitcode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

// Add context method to CliError
impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Application(err) => CliError::Application(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidInput(_) => exitcode::DATAERR,
            CliError::Application(ApplicationError::Validation(_)) => exitcode::DATAERR,
            CliError::Application(ApplicationError::NotFound(_)) => exitcode::NOINPUT,
            CliError::Application(ApplicationError::Upload(_)) => exitcode::IOERR,
            CliError::Application(ApplicationError::Domain(DomainError::Io(_))) => exitcode::IOERR,
            CliError::Io(_) => exitcode::IOERR,
            _ => exitcode::USAGE,
        }
    }
}

// Direct conversion from DomainError to CliError (via ApplicationError)
impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Application(ApplicationError::from_domain(err))
    }
}

pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::upload::AssetFile;

    #[test]
    fn given_validation_failures_when_exit_code_then_dataerr() {
        let err: CliError = DomainError::InvalidTag("bad!".to_string()).into();
        assert_eq!(err.exit_code(), exitcode::DATAERR);
        assert_eq!(
            CliError::InvalidInput("x".to_string()).exit_code(),
            exitcode::DATAERR
        );
    }

    #[test]
    fn given_missing_or_io_failures_when_exit_code_then_specific_codes() {
        let not_found = CliError::Application(ApplicationError::NotFound("tag".to_string()));
        assert_eq!(not_found.exit_code(), exitcode::NOINPUT);
        let upload = CliError::Application(ApplicationError::Upload("disk".to_string()));
        assert_eq!(upload.exit_code(), exitcode::IOERR);
        let storage: CliError = DomainError::Storage("down".to_string()).into();
        assert_eq!(storage.exit_code(), exitcode::USAGE);
    }

    #[test]
    fn given_unreadable_input_file_when_exit_code_then_ioerr() {
        let dir = tempfile::tempdir().unwrap();
        let err: CliError = AssetFile::from_path(&dir.path().join("missing.jpg"))
            .unwrap_err()
            .into();
        assert_eq!(err.exit_code(), exitcode::IOERR);
        assert!(err.to_string().contains("missing.jpg"));
    }

    #[test]
    fn given_error_when_context_then_message_prefixed() {
        let err = CliError::CommandFailed("boom".to_string()).context("upload");
        assert_eq!(err.to_string(), "Command failed: upload: boom");
    }
}
