//! Error types for az-ssh

use std::io;

use thiserror::Error;

use crate::config::{EXIT_EXEC_FAILED, EXIT_NOT_EXECUTABLE, EXIT_NOT_FOUND, EXIT_USAGE, USAGE};

/// Main error type for az-ssh
#[derive(Debug, Error)]
pub enum AzSshError {
    /// Short or long option outside the accepted grammar
    #[error("option {0} not recognized")]
    UnknownOption(String),

    /// Long option prefix matching more than one long option
    #[error("option {0} not a unique prefix")]
    AmbiguousOption(String),

    /// Value-bearing option at the end of the argument list
    #[error("option {0} requires argument")]
    MissingValue(String),

    /// Value attached to a long option that takes none (`--arc=x`)
    #[error("option {0} must not have an argument")]
    UnexpectedValue(String),

    /// Argument that is not valid Unicode
    #[error("argument {0} is not valid unicode")]
    InvalidUnicode(String),

    /// No destination positional argument
    #[error("missing destination")]
    MissingDestination,

    /// Target program could not be located on the search path
    #[error("{0} not found on PATH")]
    NotFound(String),

    /// Target program was found but cannot be executed
    #[error("{0} is not executable")]
    NotExecutable(String),

    /// Any other failure while replacing the process image
    #[error("failed to execute {program}: {source}")]
    Exec {
        program: String,
        #[source]
        source: io::Error,
    },
}

/// Result type alias using AzSshError
pub type Result<T> = std::result::Result<T, AzSshError>;

impl AzSshError {
    /// Create an unknown option error
    pub fn unknown_option(option: impl Into<String>) -> Self {
        AzSshError::UnknownOption(option.into())
    }

    /// Create a missing value error
    pub fn missing_value(option: impl Into<String>) -> Self {
        AzSshError::MissingValue(option.into())
    }

    /// Classify an I/O error returned while executing `program`
    pub fn exec(program: impl Into<String>, source: io::Error) -> Self {
        let program = program.into();
        match source.kind() {
            io::ErrorKind::NotFound => AzSshError::NotFound(program),
            io::ErrorKind::PermissionDenied => AzSshError::NotExecutable(program),
            _ => AzSshError::Exec { program, source },
        }
    }

    /// Whether the error comes from malformed command-line arguments
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            AzSshError::UnknownOption(_)
                | AzSshError::AmbiguousOption(_)
                | AzSshError::MissingValue(_)
                | AzSshError::UnexpectedValue(_)
                | AzSshError::InvalidUnicode(_)
                | AzSshError::MissingDestination
        )
    }

    /// Text printed to stdout for a usage error: the message, then the usage
    pub fn usage_report(&self) -> String {
        format!("Error: {self}\n{USAGE}")
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            AzSshError::NotFound(_) => EXIT_NOT_FOUND,
            AzSshError::NotExecutable(_) => EXIT_NOT_EXECUTABLE,
            AzSshError::Exec { .. } => EXIT_EXEC_FAILED,
            _ => EXIT_USAGE,
        }
    }
}
