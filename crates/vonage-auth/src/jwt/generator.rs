//! Token generator
//!
//! A [`Generator`] is configured once and can mint any number of tokens;
//! [`Generator::generate`] takes `&self`, so one instance can be shared across
//! threads.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use tracing::{debug, warn};
use uuid::Uuid;

use super::claims::{Acl, Claims};
use crate::error::{AuthError, Result};

/// Token lifetime used when none (or zero) is configured
pub const DEFAULT_TTL: Duration = Duration::from_secs(15 * 60);

/// Builds RS256 application JWTs
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use vonage_auth::jwt::Generator;
///
/// let generator = Generator::from_key_file("aaaaaaaa-bbbb-cccc-dddd-0123456789ab", "private.key")?
///     .with_ttl(Duration::from_secs(3600))
///     .add_path("/*/users/**");
///
/// let token = generator.generate()?;
/// println!("Bearer {}", token.as_str());
/// # Ok::<(), vonage_auth::AuthError>(())
/// ```
#[derive(Clone)]
pub struct Generator {
    application_id: String,
    private_key: Vec<u8>,
    ttl: Duration,
    subject: Option<String>,
    paths: Vec<String>,
    jti: Option<String>,
    nbf: Option<i64>,
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("application_id", &self.application_id)
            .field("private_key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .field("subject", &self.subject)
            .field("paths", &self.paths)
            .field("jti", &self.jti)
            .field("nbf", &self.nbf)
            .finish()
    }
}

impl Generator {
    /// Create a generator from PEM encoded private key bytes.
    ///
    /// The key is only parsed when a token is generated.
    pub fn new(application_id: impl Into<String>, private_key: impl Into<Vec<u8>>) -> Self {
        Self {
            application_id: application_id.into(),
            private_key: private_key.into(),
            ttl: DEFAULT_TTL,
            subject: None,
            paths: Vec::new(),
            jti: None,
            nbf: None,
        }
    }

    /// Create a generator reading the private key from `path`
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::KeyFile`] if the file cannot be read.
    pub fn from_key_file(application_id: impl Into<String>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let key = std::fs::read(path).map_err(|source| AuthError::KeyFile {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded application private key");
        Ok(Self::new(application_id, key))
    }

    /// Token lifetime; zero restores [`DEFAULT_TTL`]
    #[must_use]
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Subject (`sub`) claim; empty omits the claim
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Fixed JWT ID.
    ///
    /// Values that are not a UUID, and the nil UUID, are ignored at generation
    /// time in favour of a random one.
    #[must_use]
    pub fn with_jti(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Not Before (`nbf`) claim; the unix epoch omits the claim
    #[must_use]
    pub fn with_nbf(mut self, nbf: DateTime<Utc>) -> Self {
        self.nbf = Some(nbf.timestamp());
        self
    }

    /// Allow an additional ACL path
    #[must_use]
    pub fn add_path(mut self, path: impl Into<String>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Replace the ACL paths
    #[must_use]
    pub fn with_paths<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Application ID
    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    /// Effective token lifetime
    pub fn ttl(&self) -> Duration {
        if self.ttl.is_zero() { DEFAULT_TTL } else { self.ttl }
    }

    /// ACL paths in the order they were added
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Build the claim set for a token issued at `now` (unix seconds)
    ///
    /// `exp` saturates at `i64::MAX` for lifetimes beyond the representable range.
    pub fn claims_at(&self, now: i64) -> Claims {
        let ttl = i64::try_from(self.ttl().as_secs()).unwrap_or(i64::MAX);
        Claims {
            iat: now,
            application_id: self.application_id.clone(),
            exp: now.saturating_add(ttl),
            jti: self.resolve_jti(),
            nbf: self.nbf.filter(|nbf| *nbf != 0),
            sub: self.subject.clone().filter(|sub| !sub.is_empty()),
            acl: (!self.paths.is_empty()).then(|| Acl::from_paths(self.paths.iter().cloned())),
        }
    }

    /// Generate and sign a new token
    ///
    /// # Errors
    ///
    /// - [`AuthError::KeyParse`] if the private key is not a PEM encoded RSA key
    /// - [`AuthError::Signing`] if RS256 signing fails
    pub fn generate(&self) -> Result<GeneratedToken> {
        let claims = self.claims_at(Utc::now().timestamp());

        let key = EncodingKey::from_rsa_pem(&self.private_key).map_err(AuthError::KeyParse)?;
        let header = Header::new(Algorithm::RS256);
        let token = encode(&header, &claims, &key).map_err(AuthError::Signing)?;

        debug!(
            application_id = %claims.application_id,
            jti = %claims.jti,
            exp = claims.exp,
            acl_paths = self.paths.len(),
            "Generated application JWT"
        );

        Ok(GeneratedToken {
            token,
            header,
            claims,
        })
    }

    fn resolve_jti(&self) -> String {
        match self.jti.as_deref().map(Uuid::parse_str) {
            Some(Ok(jti)) if !jti.is_nil() => jti.to_string(),
            Some(Ok(_)) => {
                warn!("Configured JTI is the nil UUID, using a random one");
                Uuid::new_v4().to_string()
            }
            Some(Err(e)) => {
                warn!(error = %e, "Configured JTI is not a UUID, using a random one");
                Uuid::new_v4().to_string()
            }
            None => Uuid::new_v4().to_string(),
        }
    }
}

/// A signed token together with the header and claims it was built from
#[derive(Clone)]
pub struct GeneratedToken {
    token: String,
    header: Header,
    claims: Claims,
}

impl fmt::Debug for GeneratedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedToken")
            .field("token", &"[REDACTED]")
            .field("header", &self.header)
            .field("claims", &self.claims)
            .finish()
    }
}

impl GeneratedToken {
    /// Compact serialized token
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// JOSE header (`alg` and `typ`)
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Claims encoded in the token
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Take the compact token
    pub fn into_string(self) -> String {
        self.token
    }
}

impl fmt::Display for GeneratedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}
