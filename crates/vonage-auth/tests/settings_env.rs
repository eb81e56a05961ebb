//! Environment overrides for settings.
//!
//! Kept in their own test binary: every test here mutates process
//! environment variables that the other settings tests read.

use vonage_auth::{AuthScheme, Params, RequestSigner, SignMethod, Settings};

#[test]
fn test_environment_overrides_toml() {
    temp_env::with_var("VONAGE__SIGNATURE__SECRET", Some("from-env"), || {
        let settings = Settings::from_toml("[signature]\nmethod = \"md5hash\"\nsecret = \"from-file\"").unwrap();

        let mut params = Params::new();
        let signer = settings.signer().unwrap();
        signer.sign_params(&mut params).unwrap();

        let env_signer = RequestSigner::new(SignMethod::Md5Hash, "from-env");
        assert!(env_signer.verify(&params).unwrap());
    });
}

#[test]
fn test_environment_alone_is_enough() {
    temp_env::with_vars(
        [
            ("VONAGE__API_KEY", Some("env-key")),
            ("VONAGE__API_SECRET", Some("env-secret")),
        ],
        || {
            let settings = Settings::load(None).unwrap();
            let credentials = settings.credentials(AuthScheme::KeySecret).unwrap();
            assert_eq!(credentials.api_key(), Some("env-key"));
        },
    );
}

#[test]
fn test_nested_ttl_from_environment() {
    temp_env::with_var("VONAGE__APPLICATION__TOKEN_TTL_SECS", Some("120"), || {
        let settings = Settings::from_toml("[application]\nid = \"app\"").unwrap();
        assert_eq!(settings.application.unwrap().token_ttl_secs, 120);
    });
}
