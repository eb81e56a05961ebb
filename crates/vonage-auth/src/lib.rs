//! # Vonage Auth
//!
//! Authentication for the Vonage (formerly Nexmo) communication APIs.
//!
//! ## Schemes
//!
//! - **API key and secret** - sent as parameters or a `Basic` header
//! - **Signed requests** - a `sig` parameter computed over the other
//!   parameters with MD5 or HMAC-MD5/SHA1/SHA256/SHA512; the same algorithm
//!   verifies inbound webhooks
//! - **Application JWTs** - RS256 tokens signed with an application's private
//!   key, sent as a `Bearer` header
//!
//! ## Architecture
//!
//! - [`signature`] - Canonical parameter string, signature generation, [`RequestSigner`]
//! - [`jwt`] - Claim set and the token [`Generator`](jwt::Generator)
//! - [`credentials`] - [`Credentials`] and how each scheme is applied to a request
//! - [`config`] - [`Settings`] loaded from TOML and `VONAGE__*` environment variables
//! - [`error`] - [`AuthError`]
//!
//! ## Quick Start
//!
//! ```rust
//! use vonage_auth::{Params, RequestSigner, SignMethod};
//!
//! let signer = RequestSigner::new(SignMethod::Sha256Hmac, "signature-secret");
//!
//! let mut params = Params::new();
//! params.insert("api_key", "abc123");
//! params.insert("to", "447700900000");
//! params.insert("text", "Hello");
//! signer.sign_params(&mut params).unwrap();
//!
//! assert!(signer.verify(&params).unwrap());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod credentials;
pub mod error;
pub mod jwt;
pub mod signature;

pub use self::config::{ApplicationSettings, Settings, SignatureSettings};
pub use credentials::{AuthScheme, Credentials};
pub use error::{AuthError, Result};
pub use jwt::{Claims, GeneratedToken, Generator};
pub use signature::{ParamValue, Params, RequestSigner, SignMethod, generate_signature};
