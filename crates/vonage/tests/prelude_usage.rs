//! The prelude covers a typical answer-webhook handler.

use pretty_assertions::assert_eq;
use vonage::prelude::*;

#[test]
fn test_verify_webhook_then_answer_with_ncco() {
    // GIVEN: an inbound answer webhook signed by the platform
    let signer = RequestSigner::new(SignMethod::Md5Hmac, "signature-secret");
    let mut inbound = Params::from_query("from=447700900000&to=447700900001&uuid=aaaa-bbbb");
    signer.sign_params(&mut inbound).unwrap();

    // WHEN: the handler verifies it and builds the answer
    assert!(signer.verify(&inbound).unwrap());
    let ncco: Ncco = [
        Action::from(Talk::new("Connecting you")),
        Connect::new(Endpoint::phone("447700900002"))
            .with_from("447700900001")
            .into(),
    ]
    .into_iter()
    .collect();

    // THEN: the NCCO renders in order
    let value = ncco.to_value().unwrap();
    assert_eq!(value[0]["action"], "talk");
    assert_eq!(value[1]["endpoint"][0]["number"], "447700900002");
}

#[test]
fn test_re_exported_crates() {
    let method: vonage::auth::SignMethod = "sha512hmac".parse().unwrap();
    assert_eq!(method, SignMethod::Sha512Hmac);
    assert_eq!(vonage::ncco::DEFAULT_LOOP, 1);
}
