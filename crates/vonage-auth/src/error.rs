//! Error types for signing, token generation and credential handling.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for authentication operations
pub type Result<T> = std::result::Result<T, AuthError>;

/// Errors raised while authenticating requests to the Vonage APIs
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    /// Signature method name is not one of the supported algorithms
    #[error("invalid method: {0}")]
    InvalidSignMethod(String),

    /// The signing secret was rejected by the MAC implementation
    #[error("invalid signing key")]
    InvalidSigningKey,

    /// Inbound parameters carry no `sig` value
    #[error("request has no sig parameter")]
    MissingSignature,

    /// Inbound `sig` value is not hex encoded
    #[error("malformed signature: {0}")]
    MalformedSignature(#[source] hex::FromHexError),

    /// Private key file could not be read
    #[error("failed to read private key {}: {source}", path.display())]
    KeyFile {
        /// Path that was read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Private key is not a PEM encoded RSA key
    #[error("failed to parse RSA private key: {0}")]
    KeyParse(#[source] jsonwebtoken::errors::Error),

    /// RS256 signing failed
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// Auth scheme name is not one of `key-secret`, `signature` or `jwt`
    #[error("unknown auth scheme: {0}")]
    UnknownScheme(String),

    /// The credentials cannot be used the way the caller asked
    #[error("{scheme} credentials cannot be used for {usage}")]
    UnsupportedScheme {
        /// Scheme of the credentials
        scheme: &'static str,
        /// What the caller tried to do with them
        usage: &'static str,
    },

    /// A settings field required by the selected scheme is missing
    #[error("incomplete configuration: missing {0}")]
    IncompleteConfig(&'static str),

    /// Settings could not be loaded or deserialized
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
