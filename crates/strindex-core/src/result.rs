//! Result type alias for strindex operations

use crate::error::StrIndexError;

/// Standard Result type for strindex operations
pub type Result<T> = std::result::Result<T, StrIndexError>;

/// Extension trait for Result to provide additional convenience methods
pub trait ResultExt<T> {
    /// Log the error and continue with None
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) => {
                if err.is_recoverable() {
                    tracing::warn!("Continuing after error: {}", err);
                } else {
                    tracing::error!("Fatal error: {}", err);
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_and_continue() {
        let ok: Result<u8> = Ok(1);
        assert_eq!(ok.log_and_continue(), Some(1));

        let config: Result<u8> = Err(StrIndexError::config_error("bad"));
        assert_eq!(config.log_and_continue(), None);
    }
}
