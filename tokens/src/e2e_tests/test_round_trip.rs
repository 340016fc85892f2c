//! Issued claims come back unchanged.

use serde_json::json;

use crate::e2e_tests::helpers::{PayloadGenerator, claims, codec};

#[test]
fn test_user_id_round_trip() {
    let codec = codec("1s");
    let payload = claims(json!({"userId": 42}));

    let token = codec.issue(&payload).expect("issued");
    assert_eq!(codec.verify(&token).expect("verified"), payload);
}

#[test]
fn test_caller_issued_at_round_trip() {
    let codec = codec("15m");
    let payload = claims(json!({"userId": 1, "iat": 1_700_000_000}));

    let token = codec.issue(&payload).expect("issued");
    assert_eq!(codec.verify(&token).expect("verified"), payload);

    let detailed = codec.verify_detailed(&token).expect("verified");
    assert_eq!(detailed.issued_at, Some(1_700_000_000));
    assert_eq!(detailed.expires_at, 1_700_000_000 + 15 * 60);
}

#[test]
fn test_empty_claims_round_trip() {
    let codec = codec("15m");
    let token = codec.issue(&crate::Claims::new()).expect("issued");
    assert!(codec.verify(&token).expect("verified").is_empty());
}

#[test]
fn test_nested_claims_round_trip() {
    let codec = codec("1h");
    let payload = claims(json!({
        "sub": "user-123",
        "aud": "dashboard",
        "roles": ["admin", "billing"],
        "profile": {"name": "Ada", "verified": true, "score": null},
        "limits": [1, -2, 9_007_199_254_740_993_i64]
    }));

    let token = codec.issue(&payload).expect("issued");
    assert_eq!(codec.verify(&token).expect("verified"), payload);
}

#[test]
fn test_random_claims_round_trip() {
    let codec = codec("15m");
    let mut generator = PayloadGenerator::new(0x5eed);

    for i in 0..200 {
        let payload = generator.claims();
        let token = codec
            .issue(&payload)
            .unwrap_or_else(|e| panic!("payload {i} should issue: {e}"));
        let verified = codec
            .verify(&token)
            .unwrap_or_else(|e| panic!("payload {i} should verify: {e}"));
        assert_eq!(verified, payload, "payload {i} changed in transit");
    }
}

#[test]
fn test_token_is_url_safe() {
    let codec = codec("15m");
    let mut generator = PayloadGenerator::new(7);

    for _ in 0..50 {
        let token = codec.issue(&generator.claims()).expect("issued");
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')),
            "token contains non URL-safe characters: {token}"
        );
    }
}

#[test]
fn test_issue_is_deterministic_for_same_instant() {
    let codec = codec("15m");
    let payload = claims(json!({"userId": 42, "role": "admin"}));

    let first = codec.issue(&payload).expect("issued");
    let second = codec.issue(&payload).expect("issued");
    assert_eq!(first, second);
}
