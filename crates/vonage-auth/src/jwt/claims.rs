//! Claim set carried by application JWTs

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Claims of an application JWT
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Issued At - unix seconds
    pub iat: i64,

    /// Application the signing key belongs to
    pub application_id: String,

    /// Expiration Time - unix seconds
    pub exp: i64,

    /// JWT ID - unique per token
    pub jti: String,

    /// Not Before - unix seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,

    /// Subject - the user the token acts for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Access control list restricting the API paths the token may call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acl: Option<Acl>,
}

/// Path restrictions of a token
///
/// Each path maps to an empty restriction object, which the platform reads as
/// "allow everything under this path".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Acl {
    /// Allowed path patterns, e.g. `/*/users/**`
    pub paths: BTreeMap<String, Map<String, Value>>,
}

impl Acl {
    /// ACL allowing each of `paths`
    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            paths: paths.into_iter().map(|p| (p.into(), Map::new())).collect(),
        }
    }

    /// Whether `path` is listed
    pub fn allows(&self, path: &str) -> bool {
        self.paths.contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_acl_shape() {
        let acl = Acl::from_paths(["/*/users/**", "/*/conversations/**"]);
        assert_eq!(
            serde_json::to_value(&acl).unwrap(),
            json!({"paths": {"/*/users/**": {}, "/*/conversations/**": {}}})
        );
    }

    #[test]
    fn test_duplicate_paths_collapse() {
        let acl = Acl::from_paths(["/*/users/**", "/*/users/**"]);
        assert_eq!(acl.paths.len(), 1);
        assert!(acl.allows("/*/users/**"));
    }

    #[test]
    fn test_optional_claims_omitted() {
        let claims = Claims {
            iat: 1,
            application_id: "app".into(),
            exp: 901,
            jti: "id".into(),
            nbf: None,
            sub: None,
            acl: None,
        };
        let value = serde_json::to_value(&claims).unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("nbf"));
        assert!(!object.contains_key("sub"));
        assert!(!object.contains_key("acl"));
        assert_eq!(object.len(), 4);
    }
}
