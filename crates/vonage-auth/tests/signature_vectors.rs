//! Known-answer tests for request signatures (secret `"secret"`).

use pretty_assertions::assert_eq;
use vonage_auth::signature::canonical_string;
use vonage_auth::{AuthError, ParamValue, Params, RequestSigner, SignMethod, generate_signature};

fn hex_signature(method: SignMethod, params: &Params) -> String {
    hex::encode(generate_signature(method, "secret", params).unwrap())
}

fn sms_params() -> Params {
    let mut params = Params::new();
    params.insert("api_key", "abc123");
    params.insert("to", "447700900000");
    params.insert("text", "Hello&World=");
    params.insert("timestamp", 1_461_605_396_i64);
    params
}

#[test]
fn test_md5hash_empty_params() {
    assert_eq!(
        hex_signature(SignMethod::Md5Hash, &Params::new()),
        "5ebe2294ecd0e0f08eab7690d2a6ee69"
    );
}

#[test]
fn test_md5hash_only_sig_param() {
    let params: Params = [("sig", "signature")].into_iter().collect();
    assert_eq!(
        hex_signature(SignMethod::Md5Hash, &params),
        "5ebe2294ecd0e0f08eab7690d2a6ee69"
    );
}

#[test]
fn test_md5hash_custom_param() {
    let params: Params = [("from", "NEXMO")].into_iter().collect();
    assert_eq!(
        hex_signature(SignMethod::Md5Hash, &params),
        "2cdd20a2a0f7270545a98b3ccb87ba51"
    );
}

#[test]
fn test_hmac_empty_params() {
    let cases = [
        (SignMethod::Md5Hmac, "5c8db03f04cec0f43bcb060023914190"),
        (SignMethod::Sha1Hmac, "25af6174a0fcecc4d346680a72b7ce644b9a88e8"),
        (
            SignMethod::Sha256Hmac,
            "f9e66e179b6747ae54108f82f8ade8b3c25d76fd30afde6c395822c530196169",
        ),
        (
            SignMethod::Sha512Hmac,
            "b0e9650c5faf9cd8ae02276671545424104589b3656731ec193b25d01b07561c27637c2d4d68389d6cf5007a8632c26ec89ba80a01c77a6cdd389ec28db43901",
        ),
    ];

    for (method, expected) in cases {
        assert_eq!(hex_signature(method, &Params::new()), expected, "{method}");
    }
}

#[test]
fn test_sms_request_canonical_string() {
    assert_eq!(
        canonical_string(&sms_params()),
        "&api_key=abc123&text=Hello_World_&timestamp=1461605396&to=447700900000"
    );
}

#[test]
fn test_sms_request_signatures() {
    let params = sms_params();
    assert_eq!(
        hex_signature(SignMethod::Md5Hash, &params),
        "348c7cb0e043102d231700a080ad1869"
    );
    assert_eq!(
        hex_signature(SignMethod::Sha256Hmac, &params),
        "93bbfb8c7fcfbe0ab7cec4f73ca3927b163fafa149136639e19c3a6f21607a55"
    );
}

#[test]
fn test_invalid_method_rejected_before_signing() {
    let err = "random method".parse::<SignMethod>().unwrap_err();
    assert!(matches!(err, AuthError::InvalidSignMethod(ref m) if m == "random method"));
    assert_eq!(err.to_string(), "invalid method: random method");
}

#[test]
fn test_signing_does_not_mutate_params() {
    let params: Params = [("from", "NEXMO"), ("sig", "stale")].into_iter().collect();
    let before = params.clone();

    let _ = generate_signature(SignMethod::Sha1Hmac, "secret", &params).unwrap();

    assert_eq!(params, before);
    assert_eq!(params.get("sig"), Some(&ParamValue::from("stale")));
}

#[test]
fn test_verify_webhook_query_string() {
    // GIVEN: an inbound webhook signed with sha256hmac
    let signer = RequestSigner::new(SignMethod::Sha256Hmac, "secret");
    let query = "?api_key=abc123&to=447700900000&text=Hello%26World%3D&timestamp=1461605396\
                 &sig=93BBFB8C7FCFBE0AB7CEC4F73CA3927B163FAFA149136639E19C3A6F21607A55";

    // WHEN: verifying the parsed parameters
    let params = Params::from_query(query);

    // THEN: the upper-case hex signature is accepted
    assert!(signer.verify(&params).unwrap());
}

#[test]
fn test_verify_rejects_tampered_params() {
    let signer = RequestSigner::new(SignMethod::Md5Hash, "secret");
    let mut params = sms_params();
    signer.sign_params(&mut params).unwrap();

    params.insert("to", "447700900001");

    assert!(!signer.verify(&params).unwrap());
}

#[test]
fn test_verify_rejects_wrong_secret() {
    let mut params = sms_params();
    RequestSigner::new(SignMethod::Sha512Hmac, "secret")
        .sign_params(&mut params)
        .unwrap();

    let other = RequestSigner::new(SignMethod::Sha512Hmac, "other");
    assert!(!other.verify(&params).unwrap());
}

#[test]
fn test_verify_errors() {
    let signer = RequestSigner::new(SignMethod::Md5Hash, "secret");

    let err = signer.verify(&sms_params()).unwrap_err();
    assert!(matches!(err, AuthError::MissingSignature));

    let mut params = sms_params();
    params.insert("sig", "not-hex");
    let err = signer.verify(&params).unwrap_err();
    assert!(matches!(err, AuthError::MalformedSignature(_)));
}

#[test]
fn test_verify_rejects_truncated_signature() {
    let signer = RequestSigner::new(SignMethod::Md5Hash, "secret");
    let mut params = sms_params();
    params.insert("sig", "348c7cb0e043102d");

    assert!(!signer.verify(&params).unwrap());
}
