//! Request signing
//!
//! Vonage accepts a `sig` parameter computed over the other request
//! parameters, and signs inbound webhooks the same way. The signed material is
//! a canonical string built from the parameters sorted by name:
//!
//! ```text
//! &api_key=abc123&from=NEXMO&timestamp=1461605396&to=447700900000
//! ```
//!
//! Values have every `&` and `=` replaced by `_`. The `sig` parameter itself is
//! never part of the signed material. `md5hash` appends the shared secret to
//! the canonical string and digests it; the HMAC methods key the MAC with the
//! secret.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::error::{AuthError, Result};

/// Name of the signature parameter
pub const SIG_PARAM: &str = "sig";

/// Name of the timestamp parameter added to outbound signed requests
pub const TIMESTAMP_PARAM: &str = "timestamp";

/// Signature algorithm configured for the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignMethod {
    /// MD5 digest of the canonical string followed by the secret
    Md5Hash,
    /// HMAC-MD5
    Md5Hmac,
    /// HMAC-SHA1
    Sha1Hmac,
    /// HMAC-SHA256
    Sha256Hmac,
    /// HMAC-SHA512
    Sha512Hmac,
}

impl SignMethod {
    /// All supported methods
    pub const ALL: [SignMethod; 5] = [
        Self::Md5Hash,
        Self::Md5Hmac,
        Self::Sha1Hmac,
        Self::Sha256Hmac,
        Self::Sha512Hmac,
    ];

    /// Configuration name of the method
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Md5Hash => "md5hash",
            Self::Md5Hmac => "md5hmac",
            Self::Sha1Hmac => "sha1hmac",
            Self::Sha256Hmac => "sha256hmac",
            Self::Sha512Hmac => "sha512hmac",
        }
    }

    /// Length in bytes of signatures produced by this method
    pub fn output_len(self) -> usize {
        match self {
            Self::Md5Hash | Self::Md5Hmac => 16,
            Self::Sha1Hmac => 20,
            Self::Sha256Hmac => 32,
            Self::Sha512Hmac => 64,
        }
    }
}

impl fmt::Display for SignMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignMethod {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| AuthError::InvalidSignMethod(s.to_string()))
    }
}

/// Scalar request parameter value
///
/// Values render into the canonical string the way the platform's reference
/// clients print them: floats use the shortest round-trip digits and switch to
/// exponent form (`1e+06`, `1e-05`) when the decimal exponent is below -4 or
/// at least 6.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// Text
    Str(String),
    /// Integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Boolean
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write_float(f, *x),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

fn write_float(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    if x.is_nan() {
        return f.write_str("NaN");
    }
    if x.is_infinite() {
        return f.write_str(if x.is_sign_positive() { "+Inf" } else { "-Inf" });
    }
    if x == 0.0 {
        return write!(f, "{x}");
    }

    let scientific = format!("{x:e}");
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    if (-4..6).contains(&exponent) {
        write!(f, "{x}")
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        write!(f, "{mantissa}e{sign}{:02}", exponent.unsigned_abs())
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Request parameters, ordered by name
///
/// Ordering is byte-wise on the parameter name, which is the order the
/// canonical string uses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Create an empty parameter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string, such as a webhook
    /// query string. A leading `?` is ignored; repeated names keep the last value.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Encode as an `application/x-www-form-urlencoded` string
    pub fn to_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.0 {
            serializer.append_pair(name, &value.to_string());
        }
        serializer.finish()
    }

    /// Insert a parameter, returning the previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Option<ParamValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Look up a parameter
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Remove a parameter
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        self.0.remove(name)
    }

    /// Whether `name` is present
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parameters in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<ParamValue>> Extend<(K, V)> for Params {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

/// Build the canonical string signed for `params`.
///
/// `sig` is skipped; values have `&` and `=` replaced with `_`.
pub fn canonical_string(params: &Params) -> String {
    let mut canonical = String::new();
    for (name, value) in params.iter().filter(|(name, _)| *name != SIG_PARAM) {
        let value = value.to_string().replace(['&', '='], "_");
        canonical.push('&');
        canonical.push_str(name);
        canonical.push('=');
        canonical.push_str(&value);
    }
    canonical
}

/// Compute the raw signature of `params`.
///
/// # Errors
///
/// Returns [`AuthError::InvalidSigningKey`] if the MAC rejects the secret.
pub fn generate_signature(method: SignMethod, secret: &str, params: &Params) -> Result<Vec<u8>> {
    let canonical = canonical_string(params);

    match method {
        SignMethod::Md5Hash => Ok(Md5::new_with_prefix(canonical.as_bytes())
            .chain_update(secret.as_bytes())
            .finalize()
            .to_vec()),
        SignMethod::Md5Hmac => compute_mac::<Hmac<Md5>>(secret.as_bytes(), canonical.as_bytes()),
        SignMethod::Sha1Hmac => compute_mac::<Hmac<Sha1>>(secret.as_bytes(), canonical.as_bytes()),
        SignMethod::Sha256Hmac => {
            compute_mac::<Hmac<Sha256>>(secret.as_bytes(), canonical.as_bytes())
        }
        SignMethod::Sha512Hmac => {
            compute_mac::<Hmac<Sha512>>(secret.as_bytes(), canonical.as_bytes())
        }
    }
}

fn compute_mac<M: Mac + KeyInit>(key: &[u8], message: &[u8]) -> Result<Vec<u8>> {
    let mut mac = <M as KeyInit>::new_from_slice(key).map_err(|_| AuthError::InvalidSigningKey)?;
    Mac::update(&mut mac, message);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Signs outbound requests and verifies inbound webhooks with an account's
/// signature secret.
#[derive(Clone)]
pub struct RequestSigner {
    method: SignMethod,
    secret: SecretString,
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner")
            .field("method", &self.method)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl RequestSigner {
    /// Create a signer
    pub fn new(method: SignMethod, secret: impl Into<String>) -> Self {
        Self {
            method,
            secret: SecretString::new(secret.into()),
        }
    }

    /// Configured method
    pub fn method(&self) -> SignMethod {
        self.method
    }

    /// Raw signature of `params`
    ///
    /// # Errors
    ///
    /// See [`generate_signature`].
    pub fn sign(&self, params: &Params) -> Result<Vec<u8>> {
        generate_signature(self.method, self.secret.expose_secret(), params)
    }

    /// Lowercase hex signature of `params`, the form sent as `sig`
    ///
    /// # Errors
    ///
    /// See [`generate_signature`].
    pub fn sign_hex(&self, params: &Params) -> Result<String> {
        self.sign(params).map(hex::encode)
    }

    /// Add `timestamp` (if absent) and `sig` to outbound parameters.
    ///
    /// # Errors
    ///
    /// See [`generate_signature`].
    pub fn sign_params(&self, params: &mut Params) -> Result<()> {
        if !params.contains(TIMESTAMP_PARAM) {
            params.insert(TIMESTAMP_PARAM, chrono::Utc::now().timestamp());
        }
        let sig = self.sign_hex(params)?;
        params.insert(SIG_PARAM, sig);
        debug!(method = %self.method, params = params.len(), "Signed request parameters");
        Ok(())
    }

    /// Check the `sig` of inbound parameters.
    ///
    /// Accepts either hex case. The comparison runs in constant time.
    ///
    /// # Errors
    ///
    /// - [`AuthError::MissingSignature`] if there is no `sig` parameter
    /// - [`AuthError::MalformedSignature`] if `sig` is not hex
    pub fn verify(&self, params: &Params) -> Result<bool> {
        let provided = params.get(SIG_PARAM).ok_or(AuthError::MissingSignature)?;
        let provided = hex::decode(provided.to_string()).map_err(AuthError::MalformedSignature)?;
        let expected = self.sign(params)?;

        let valid: bool = expected.as_slice().ct_eq(provided.as_slice()).into();
        if !valid {
            debug!(method = %self.method, "Request signature mismatch");
        }
        Ok(valid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_method_names() {
        for method in SignMethod::ALL {
            assert_eq!(method.as_str().parse::<SignMethod>().unwrap(), method);
            assert_eq!(method.to_string(), method.as_str());
        }
    }

    #[test]
    fn test_sign_method_is_case_sensitive() {
        let err = "MD5HASH".parse::<SignMethod>().unwrap_err();
        assert_eq!(err.to_string(), "invalid method: MD5HASH");
    }

    #[test]
    fn test_canonical_string_sorted_and_escaped() {
        let params: Params = [
            ("to", ParamValue::from("447700900000")),
            ("from", ParamValue::from("A&B=C")),
            ("sig", ParamValue::from("ignored")),
            ("count", ParamValue::from(3)),
        ]
        .into_iter()
        .collect();

        assert_eq!(canonical_string(&params), "&count=3&from=A_B_C&to=447700900000");
    }

    #[test]
    fn test_canonical_string_keys_not_escaped() {
        let params: Params = [("a=b", "1")].into_iter().collect();
        assert_eq!(canonical_string(&params), "&a=b=1");
    }

    #[test]
    fn test_canonical_string_byte_order() {
        let params: Params = [("b", "2"), ("B", "1"), ("_", "3")].into_iter().collect();
        assert_eq!(canonical_string(&params), "&B=1&_=3&b=2");
    }

    #[test]
    fn test_param_value_display() {
        assert_eq!(ParamValue::from(true).to_string(), "true");
        assert_eq!(ParamValue::from(-12).to_string(), "-12");
        assert_eq!(ParamValue::from(1.5).to_string(), "1.5");
    }

    #[test]
    fn test_float_display_switches_to_exponent_form() {
        let cases = [
            (0.0, "0"),
            (2.0, "2"),
            (100_000.0, "100000"),
            (123_456.7, "123456.7"),
            (1e6, "1e+06"),
            (1_234_567.0, "1.234567e+06"),
            (1e21, "1e+21"),
            (1e100, "1e+100"),
            (0.0001, "0.0001"),
            (0.00001, "1e-05"),
            (-2.5e-7, "-2.5e-07"),
            (f64::INFINITY, "+Inf"),
            (f64::NEG_INFINITY, "-Inf"),
        ];
        for (value, expected) in cases {
            assert_eq!(ParamValue::from(value).to_string(), expected, "{value:?}");
        }
    }

    #[test]
    fn test_output_lengths() {
        let params = Params::new();
        for method in SignMethod::ALL {
            let sig = generate_signature(method, "secret", &params).unwrap();
            assert_eq!(sig.len(), method.output_len(), "{method}");
        }
    }

    #[test]
    fn test_from_query_decodes() {
        let params = Params::from_query("?text=Hello+World%21&to=447700900000");
        assert_eq!(params.get("text"), Some(&ParamValue::from("Hello World!")));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_signer_debug_redacts_secret() {
        let signer = RequestSigner::new(SignMethod::Sha256Hmac, "super-secret");
        let debug = format!("{signer:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_sign_params_adds_timestamp_and_sig() {
        let signer = RequestSigner::new(SignMethod::Md5Hash, "secret");
        let mut params: Params = [("api_key", "abc123")].into_iter().collect();

        signer.sign_params(&mut params).unwrap();

        assert!(params.contains(TIMESTAMP_PARAM));
        assert!(signer.verify(&params).unwrap());
    }

    #[test]
    fn test_sign_params_keeps_existing_timestamp() {
        let signer = RequestSigner::new(SignMethod::Md5Hash, "secret");
        let mut params: Params = [("timestamp", "1461605396")].into_iter().collect();

        signer.sign_params(&mut params).unwrap();

        assert_eq!(params.get(TIMESTAMP_PARAM), Some(&ParamValue::from("1461605396")));
    }
}
