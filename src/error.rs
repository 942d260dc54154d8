//! Unified error handling for the redemption console

use thiserror::Error;

use crate::api::ApiError;

/// Main console error type
///
/// Editor operations recover from API failures locally and report them
/// through the host; this type covers what escapes to callers (setup,
/// configuration, export I/O and direct API use).
#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl ConsoleError {
    /// Short machine-readable code, used in CLI output
    pub fn error_code(&self) -> &'static str {
        match self {
            ConsoleError::Config(_) => "config_error",
            ConsoleError::Api(_) => "api_error",
            ConsoleError::Io(_) => "io_error",
            ConsoleError::InvalidInput(_) => "invalid_input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = ConsoleError::InvalidInput("bad date".to_string());
        assert_eq!(err.error_code(), "invalid_input");
        assert_eq!(err.to_string(), "Invalid input: bad date");

        let err: ConsoleError = ApiError::HttpError(502).into();
        assert_eq!(err.error_code(), "api_error");
    }
}
