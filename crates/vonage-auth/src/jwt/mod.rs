//! Application JWTs
//!
//! Voice, Messages and other application-scoped APIs authenticate with a
//! short-lived RS256 token signed by the application's private key.
//!
//! # Claims
//!
//! | claim            | value                                             |
//! |------------------|---------------------------------------------------|
//! | `iat`            | issue time, unix seconds                          |
//! | `application_id` | the application the key belongs to                |
//! | `exp`            | `iat` plus the TTL (15 minutes unless configured) |
//! | `jti`            | random UUIDv4, or a configured override           |
//! | `nbf`            | only when configured                              |
//! | `sub`            | only when configured                              |
//! | `acl`            | `{"paths": {<path>: {}}}`, only when paths exist  |
//!
//! # Modules
//!
//! - `claims` - Claim set and ACL shape
//! - `generator` - Token generator and the generated token bundle

pub mod claims;
pub mod generator;

pub use claims::{Acl, Claims};
pub use generator::{DEFAULT_TTL, GeneratedToken, Generator};
