//! # Vonage - Rust SDK core
//!
//! Building blocks for calling the [Vonage](https://developer.vonage.com)
//! (formerly Nexmo) communication APIs.
//!
//! ## Components
//!
//! - [`auth`] - request signing and webhook verification, application JWTs,
//!   credentials and settings (feature `auth`)
//! - [`ncco`] - call control objects for the Voice API (feature `ncco`)
//!
//! ## Quick Start
//!
//! ```rust
//! use vonage::prelude::*;
//!
//! // Sign an outbound SMS request
//! let credentials = Credentials::signature(
//!     "abc123",
//!     RequestSigner::new(SignMethod::Sha256Hmac, "signature-secret"),
//! );
//! let mut params = Params::new();
//! params.insert("to", "447700900000");
//! params.insert("text", "Hello");
//! credentials.apply_to_params(&mut params).unwrap();
//! assert!(params.contains("sig"));
//!
//! // Answer a call
//! let ncco = Ncco::new().with_action(Talk::new("Thanks for calling"));
//! assert_eq!(
//!     ncco.to_json().unwrap(),
//!     r#"[{"action":"talk","text":"Thanks for calling","bargeIn":false,"loop":1}]"#
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `auth` (default) - re-exports `vonage-auth`
//! - `ncco` (default) - re-exports `vonage-ncco`

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "auth")]
#[cfg_attr(docsrs, doc(cfg(feature = "auth")))]
pub use vonage_auth as auth;

#[cfg(feature = "ncco")]
#[cfg_attr(docsrs, doc(cfg(feature = "ncco")))]
pub use vonage_ncco as ncco;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// SDK name sent in the `User-Agent` header
pub const SDK_NAME: &str = "vonage-rust";

/// SDK version
pub fn version() -> &'static str {
    VERSION
}

/// `User-Agent` value identifying this SDK, e.g. `vonage-rust/0.12.1`
pub fn user_agent() -> String {
    format!("{SDK_NAME}/{VERSION}")
}

/// Convenient prelude for Vonage applications
///
/// ```rust
/// use vonage::prelude::*;
///
/// let generator = Generator::new("aaaaaaaa-bbbb-cccc-dddd-0123456789ab", Vec::new())
///     .add_path("/*/users/**");
/// assert_eq!(generator.paths(), ["/*/users/**"]);
/// ```
pub mod prelude {
    pub use super::{user_agent, version};

    #[cfg(feature = "auth")]
    pub use vonage_auth::{
        AuthError, AuthScheme, Credentials, GeneratedToken, Generator, ParamValue, Params,
        RequestSigner, Settings, SignMethod, generate_signature,
    };

    #[cfg(feature = "ncco")]
    pub use vonage_ncco::{
        Action, Connect, Conversation, DtmfInput, Endpoint, Input, Ncco, Notify, PhoneEndpoint,
        Record, SipEndpoint, Stream, Talk, WebSocketEndpoint,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn test_user_agent_format() {
        let ua = user_agent();
        assert!(ua.starts_with("vonage-rust/"));
        assert_eq!(ua.strip_prefix("vonage-rust/"), Some(VERSION));
    }
}
