//! Error types for CLI operations

use std::fmt;
use thiserror::Error;
use vonage::auth::AuthError;

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Signing, token or settings failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid command arguments
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A value was given neither as a flag nor in settings
    #[error("Missing {flag} (or `{setting}` in settings)")]
    MissingArgument {
        /// Command-line flag
        flag: &'static str,
        /// Settings key
        setting: &'static str,
    },

    /// JSON rendering error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(String),
}

impl CliError {
    /// Get user-friendly suggestions for resolving the error
    pub fn suggestions(&self) -> Vec<&'static str> {
        match self {
            Self::MissingArgument { .. } => vec![
                "Pass the flag explicitly",
                "Or point --config at a settings file",
                "Or export the matching VONAGE__* variable",
            ],
            Self::InvalidArguments(_) => vec![
                "Parameters take the form NAME=VALUE",
                "Use --help to see expected format",
            ],
            Self::Auth(AuthError::InvalidSignMethod(_)) => {
                vec!["Use one of md5hash, md5hmac, sha1hmac, sha256hmac, sha512hmac"]
            }
            Self::Auth(AuthError::KeyParse(_)) => {
                vec!["The private key must be the PEM file downloaded for the application"]
            }
            _ => vec![],
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidArguments(_) | Self::MissingArgument { .. } => ErrorCategory::User,
            Self::Auth(AuthError::Config(_) | AuthError::IncompleteConfig(_)) => {
                ErrorCategory::Config
            }
            Self::Auth(AuthError::KeyFile { .. }) => ErrorCategory::System,
            Self::Auth(_) => ErrorCategory::Auth,
            Self::Json(_) => ErrorCategory::Parsing,
            Self::Logging(_) => ErrorCategory::System,
        }
    }
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input on the command line
    User,
    /// Settings file or environment
    Config,
    /// Signing or token generation
    Auth,
    /// Output rendering
    Parsing,
    /// Filesystem or process setup
    System,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "User Input"),
            Self::Config => write!(f, "Configuration"),
            Self::Auth => write!(f, "Authentication"),
            Self::Parsing => write!(f, "Parsing"),
            Self::System => write!(f, "System"),
        }
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_message() {
        let err = CliError::MissingArgument {
            flag: "--application-id",
            setting: "application.id",
        };
        assert_eq!(
            err.to_string(),
            "Missing --application-id (or `application.id` in settings)"
        );
        assert_eq!(err.category(), ErrorCategory::User);
        assert_eq!(err.suggestions().len(), 3);
    }

    #[test]
    fn test_auth_error_passthrough() {
        let err = CliError::from(AuthError::InvalidSignMethod("sha3".into()));
        assert_eq!(err.to_string(), "invalid method: sha3");
        assert_eq!(err.category(), ErrorCategory::Auth);
        assert!(!err.suggestions().is_empty());
    }
}
