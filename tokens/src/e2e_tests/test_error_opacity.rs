//! Callers cannot tell failure causes apart.

use std::error::Error;

use serde_json::json;

use crate::e2e_tests::helpers::{SECRET, claims, codec, codec_with_secret};
use crate::time::SimulatedTimeSource;
use crate::token::{TokenCodec, TokenIssuanceError, TokenVerificationError};

#[test]
fn test_verification_failures_are_indistinguishable() {
    let time = SimulatedTimeSource::default_start();
    let codec = TokenCodec::with_time_source(SECRET, "1m", &time);
    let forger = codec_with_secret(b"forger-secret", "1m");

    let expired = codec.issue(&claims(json!({"userId": 1}))).expect("issued");
    let forged = forger.issue(&claims(json!({"userId": 1}))).expect("issued");
    time.advance(120_000);

    let errors = [
        codec.verify(&expired).expect_err("expired"),
        codec.verify(&forged).expect_err("forged"),
        codec.verify("definitely.not.a-token").expect_err("malformed"),
        codec.verify("").expect_err("empty"),
    ];

    for error in errors {
        assert_eq!(error, TokenVerificationError);
        assert_eq!(error.to_string(), "Failed to verify the token");
        assert!(error.source().is_none());
    }
}

#[test]
fn test_issuance_failures_are_indistinguishable() {
    let errors = [
        codec_with_secret(b"", "15m")
            .issue(&claims(json!({"userId": 1})))
            .expect_err("empty secret"),
        codec("not a duration")
            .issue(&claims(json!({"userId": 1})))
            .expect_err("bad expiry"),
        codec("15m")
            .issue(&claims(json!({"userId": 1, "exp": 5})))
            .expect_err("reserved claim"),
    ];

    for error in errors {
        assert_eq!(error, TokenIssuanceError);
        assert_eq!(error.to_string(), "Failed to issue the token");
        assert!(error.source().is_none());
    }
}
