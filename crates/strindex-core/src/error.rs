//! Error types for the outer surfaces (config, file IO, caret arguments)
//!
//! Position queries never fail with an error; they answer "no position".

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for strindex operations
#[derive(Debug, Error)]
pub enum StrIndexError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system I/O errors
    #[error("IO error for path '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A caret given as `LINE:COL` or offset that does not fit the document
    #[error("Invalid caret '{caret}': {message}")]
    InvalidCaret { caret: String, message: String },
}

/// Error kind enumeration for categorizing errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Caret,
}

impl StrIndexError {
    /// Get the error kind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StrIndexError::ConfigError { .. } => ErrorKind::Config,
            StrIndexError::IoError { .. } => ErrorKind::Io,
            StrIndexError::InvalidCaret { .. } => ErrorKind::Caret,
        }
    }

    /// Check if this error is recoverable (the query can go on without it)
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Config | ErrorKind::Caret)
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create an IO error with path context
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.into(),
            source,
        }
    }

    /// Create an invalid caret error
    pub fn invalid_caret(caret: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCaret {
            caret: caret.into(),
            message: message.into(),
        }
    }
}

/// Convert from std::io::Error
impl From<std::io::Error> for StrIndexError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError {
            path: PathBuf::new(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(StrIndexError::config_error("x").kind(), ErrorKind::Config);
        assert_eq!(
            StrIndexError::invalid_caret("3:9", "past end of line").kind(),
            ErrorKind::Caret
        );
        let io = StrIndexError::io_error(
            "Foo.java",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(io.kind(), ErrorKind::Io);
        assert!(!io.is_recoverable());
    }

    #[test]
    fn test_display() {
        let err = StrIndexError::invalid_caret("0:1", "lines start at 1");
        assert_eq!(err.to_string(), "Invalid caret '0:1': lines start at 1");
    }
}
