//! A token only verifies under the secret that issued it.

use serde_json::json;

use crate::e2e_tests::helpers::{PayloadGenerator, claims, codec_with_secret};
use crate::token::TokenVerificationError;

#[test]
fn test_wrong_secret_is_rejected() {
    let issuer = codec_with_secret(b"first-secret", "15m");
    let verifier = codec_with_secret(b"second-secret", "15m");

    let token = issuer.issue(&claims(json!({"userId": 42}))).expect("issued");
    assert!(issuer.verify(&token).is_ok());
    assert_eq!(verifier.verify(&token), Err(TokenVerificationError));
}

#[test]
fn test_random_secret_pairs() {
    let mut generator = PayloadGenerator::new(0x5ec_2e7);

    for _ in 0..50 {
        let first = generator.secret();
        let second = generator.secret();
        if first == second {
            continue;
        }

        let issuer = codec_with_secret(&first, "1h");
        let same = codec_with_secret(&first, "1h");
        let other = codec_with_secret(&second, "1h");

        let payload = generator.claims();
        let token = issuer.issue(&payload).expect("issued");

        assert_eq!(same.verify(&token).expect("same secret verifies"), payload);
        assert_eq!(other.verify(&token), Err(TokenVerificationError));
    }
}

#[test]
fn test_empty_secret_fails_issue_and_verify() {
    let empty = codec_with_secret(b"", "15m");
    assert!(empty.issue(&claims(json!({"userId": 42}))).is_err());

    let issuer = codec_with_secret(b"real-secret", "15m");
    let token = issuer.issue(&claims(json!({"userId": 42}))).expect("issued");
    assert_eq!(empty.verify(&token), Err(TokenVerificationError));
}
