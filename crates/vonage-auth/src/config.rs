//! Settings
//!
//! Credentials are read from an optional TOML file overlaid with environment
//! variables prefixed `VONAGE__`, using `__` to separate nested keys:
//!
//! ```toml
//! api_key = "abc123"
//! api_secret = "s3cr3t"
//!
//! [signature]
//! method = "sha256hmac"
//! secret = "signature-secret"
//!
//! [application]
//! id = "aaaaaaaa-bbbb-cccc-dddd-0123456789ab"
//! private_key_path = "private.key"
//! token_ttl_secs = 900
//! acl_paths = ["/*/users/**"]
//! ```
//!
//! `VONAGE__SIGNATURE__SECRET=...` overrides `signature.secret`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use crate::credentials::{AuthScheme, Credentials};
use crate::error::{AuthError, Result};
use crate::jwt::Generator;
use crate::signature::{RequestSigner, SignMethod};

/// Environment variable prefix
pub const ENV_PREFIX: &str = "VONAGE";

/// Separator between the prefix and nested keys in environment variables
pub const ENV_SEPARATOR: &str = "__";

/// Default token lifetime in seconds
fn default_token_ttl_secs() -> u64 {
    900
}

fn default_sign_method() -> String {
    SignMethod::Md5Hash.as_str().to_string()
}

/// Top-level settings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Account API key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Account API secret
    #[serde(default)]
    pub api_secret: Option<SecretString>,
    /// Request signing settings
    #[serde(default)]
    pub signature: Option<SignatureSettings>,
    /// Application settings for JWTs
    #[serde(default)]
    pub application: Option<ApplicationSettings>,
}

/// Request signing settings
#[derive(Debug, Clone, Deserialize)]
pub struct SignatureSettings {
    /// Method name, one of `md5hash`, `md5hmac`, `sha1hmac`, `sha256hmac`, `sha512hmac`
    #[serde(default = "default_sign_method")]
    pub method: String,
    /// Signature secret from the account dashboard
    #[serde(default)]
    pub secret: Option<SecretString>,
}

/// Application settings for JWTs
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    /// Application ID
    #[serde(default)]
    pub id: Option<String>,
    /// Path to the application's PEM private key
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,
    /// Token lifetime in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
    /// `sub` claim
    #[serde(default)]
    pub subject: Option<String>,
    /// ACL paths
    #[serde(default)]
    pub acl_paths: Vec<String>,
}

impl Settings {
    /// Parse settings from a TOML string, overlaid with the environment
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the TOML is invalid or a value has the
    /// wrong type.
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .add_source(environment())
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Load settings from an optional TOML file, overlaid with the environment
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Config`] if the file is missing or invalid.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            debug!(path = %path.display(), "Loading settings file");
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        let config = builder.add_source(environment()).build()?;

        Ok(config.try_deserialize()?)
    }

    /// Build credentials for `scheme`
    ///
    /// # Errors
    ///
    /// - [`AuthError::IncompleteConfig`] naming the first missing field
    /// - [`AuthError::InvalidSignMethod`] for an unknown `signature.method`
    /// - [`AuthError::KeyFile`] if the private key cannot be read
    pub fn credentials(&self, scheme: AuthScheme) -> Result<Credentials> {
        match scheme {
            AuthScheme::KeySecret => {
                let api_key = self.api_key()?;
                let api_secret = self
                    .api_secret
                    .as_ref()
                    .ok_or(AuthError::IncompleteConfig("api_secret"))?;
                Ok(Credentials::key_secret(api_key, api_secret.expose_secret().as_str()))
            }
            AuthScheme::Signature => {
                let api_key = self.api_key()?;
                let signer = self.signer()?;
                Ok(Credentials::signature(api_key, signer))
            }
            AuthScheme::Jwt => self.generator().map(Credentials::Jwt),
        }
    }

    /// Build a request signer from the `[signature]` table
    ///
    /// # Errors
    ///
    /// See [`Settings::credentials`].
    pub fn signer(&self) -> Result<RequestSigner> {
        let signature = self
            .signature
            .as_ref()
            .ok_or(AuthError::IncompleteConfig("signature"))?;
        let method: SignMethod = signature.method.parse()?;
        let secret = signature
            .secret
            .as_ref()
            .ok_or(AuthError::IncompleteConfig("signature.secret"))?;
        Ok(RequestSigner::new(method, secret.expose_secret().as_str()))
    }

    /// Build a JWT generator from the `[application]` table
    ///
    /// # Errors
    ///
    /// See [`Settings::credentials`].
    pub fn generator(&self) -> Result<Generator> {
        let application = self
            .application
            .as_ref()
            .ok_or(AuthError::IncompleteConfig("application"))?;
        let id = application
            .id
            .as_deref()
            .ok_or(AuthError::IncompleteConfig("application.id"))?;
        let key_path = application
            .private_key_path
            .as_deref()
            .ok_or(AuthError::IncompleteConfig("application.private_key_path"))?;

        let mut generator = Generator::from_key_file(id, key_path)?
            .with_ttl(Duration::from_secs(application.token_ttl_secs))
            .with_paths(application.acl_paths.iter().cloned());
        if let Some(subject) = &application.subject {
            generator = generator.with_subject(subject.as_str());
        }
        Ok(generator)
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or(AuthError::IncompleteConfig("api_key"))
    }
}

fn environment() -> Environment {
    Environment::default()
        .prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
}
