//! Credentials and the ways they are attached to requests.
//!
//! | scheme       | query/body parameters         | `Authorization` header |
//! |--------------|-------------------------------|------------------------|
//! | `key-secret` | `api_key`, `api_secret`       | `Basic`                |
//! | `signature`  | `api_key`, `timestamp`, `sig` | not supported          |
//! | `jwt`        | not supported                 | `Bearer`               |

use std::fmt;
use std::str::FromStr;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{AuthError, Result};
use crate::jwt::Generator;
use crate::signature::{Params, RequestSigner};

/// Authentication scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthScheme {
    /// API key and secret
    KeySecret,
    /// API key plus signed parameters
    Signature,
    /// Application JWT
    Jwt,
}

impl AuthScheme {
    /// Configuration name of the scheme
    pub fn as_str(self) -> &'static str {
        match self {
            Self::KeySecret => "key-secret",
            Self::Signature => "signature",
            Self::Jwt => "jwt",
        }
    }
}

impl fmt::Display for AuthScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthScheme {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "key-secret" => Ok(Self::KeySecret),
            "signature" => Ok(Self::Signature),
            "jwt" => Ok(Self::Jwt),
            _ => Err(AuthError::UnknownScheme(s.to_string())),
        }
    }
}

/// Account or application credentials
#[derive(Debug, Clone)]
pub enum Credentials {
    /// API key and secret
    KeySecret {
        /// Account API key
        api_key: String,
        /// Account API secret
        api_secret: SecretString,
    },
    /// API key plus a signer holding the signature secret
    Signature {
        /// Account API key
        api_key: String,
        /// Signer for outbound parameters
        signer: RequestSigner,
    },
    /// Application JWT generator
    Jwt(Generator),
}

impl Credentials {
    /// Key/secret credentials
    pub fn key_secret(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::KeySecret {
            api_key: api_key.into(),
            api_secret: SecretString::new(api_secret.into()),
        }
    }

    /// Signature credentials
    pub fn signature(api_key: impl Into<String>, signer: RequestSigner) -> Self {
        Self::Signature {
            api_key: api_key.into(),
            signer,
        }
    }

    /// Scheme of these credentials
    pub fn scheme(&self) -> AuthScheme {
        match self {
            Self::KeySecret { .. } => AuthScheme::KeySecret,
            Self::Signature { .. } => AuthScheme::Signature,
            Self::Jwt(_) => AuthScheme::Jwt,
        }
    }

    /// API key, for account-level schemes
    pub fn api_key(&self) -> Option<&str> {
        match self {
            Self::KeySecret { api_key, .. } | Self::Signature { api_key, .. } => Some(api_key),
            Self::Jwt(_) => None,
        }
    }

    /// Add the credentials to query or form parameters.
    ///
    /// For signature credentials this also adds `timestamp` (if absent) and
    /// `sig`, so it must be the last change made to `params`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedScheme`] for JWT credentials, or a
    /// signing error from [`RequestSigner::sign_params`].
    pub fn apply_to_params(&self, params: &mut Params) -> Result<()> {
        match self {
            Self::KeySecret {
                api_key,
                api_secret,
            } => {
                params.insert("api_key", api_key.as_str());
                params.insert("api_secret", api_secret.expose_secret().as_str());
            }
            Self::Signature { api_key, signer } => {
                params.insert("api_key", api_key.as_str());
                signer.sign_params(params)?;
            }
            Self::Jwt(_) => {
                return Err(AuthError::UnsupportedScheme {
                    scheme: AuthScheme::Jwt.as_str(),
                    usage: "request parameters",
                });
            }
        }
        debug!(scheme = %self.scheme(), "Applied credentials to request parameters");
        Ok(())
    }

    /// Value of the `Authorization` header.
    ///
    /// JWT credentials mint a fresh token on every call.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::UnsupportedScheme`] for signature credentials, or a
    /// generation error from [`Generator::generate`].
    pub fn authorization_header(&self) -> Result<String> {
        match self {
            Self::KeySecret {
                api_key,
                api_secret,
            } => {
                let pair = format!("{api_key}:{}", api_secret.expose_secret());
                Ok(format!("Basic {}", STANDARD.encode(pair)))
            }
            Self::Jwt(generator) => Ok(format!("Bearer {}", generator.generate()?.as_str())),
            Self::Signature { .. } => Err(AuthError::UnsupportedScheme {
                scheme: AuthScheme::Signature.as_str(),
                usage: "the Authorization header",
            }),
        }
    }
}

impl From<Generator> for Credentials {
    fn from(generator: Generator) -> Self {
        Self::Jwt(generator)
    }
}
