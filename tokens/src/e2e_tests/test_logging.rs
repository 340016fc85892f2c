//! Failures leave exactly one error entry in the log; successes leave none.

use std::sync::{Arc, Mutex};

use serde_json::json;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use crate::e2e_tests::helpers::{claims, codec, codec_with_secret};

/// Level of each event, and whether it carried an `error` field.
type Recorded = Arc<Mutex<Vec<(Level, bool)>>>;

struct RecordingLayer {
    events: Recorded,
}

impl<S: Subscriber> Layer<S> for RecordingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let has_error_field = event.fields().any(|field| field.name() == "error");
        self.events
            .lock()
            .expect("recorder lock")
            .push((*event.metadata().level(), has_error_field));
    }
}

fn record(f: impl FnOnce()) -> Vec<(Level, bool)> {
    let events = Recorded::default();
    let subscriber = tracing_subscriber::registry().with(RecordingLayer {
        events: Arc::clone(&events),
    });
    tracing::subscriber::with_default(subscriber, f);
    let recorded = events.lock().expect("recorder lock").clone();
    recorded
}

#[test]
fn test_success_is_not_logged() {
    let codec = codec("15m");
    let events = record(|| {
        let token = codec.issue(&claims(json!({"userId": 42}))).expect("issued");
        codec.verify(&token).expect("verified");
        codec.verify_detailed(&token).expect("verified");
    });
    assert!(events.is_empty(), "unexpected log entries: {events:?}");
}

#[test]
fn test_failed_issue_logs_one_error() {
    for (expires_in, payload) in [
        ("15m", json!({"exp": 1})),
        ("15m", json!({"iat": "yesterday"})),
        ("whenever", json!({"userId": 1})),
    ] {
        let codec = codec(expires_in);
        let events = record(|| {
            assert!(codec.issue(&claims(payload.clone())).is_err());
        });
        assert_eq!(
            events,
            vec![(Level::ERROR, true)],
            "issuing {payload} with {expires_in}"
        );
    }

    let codec = codec_with_secret(b"", "15m");
    let events = record(|| {
        assert!(codec.issue(&claims(json!({"userId": 1}))).is_err());
    });
    assert_eq!(events, vec![(Level::ERROR, true)]);
}

#[test]
fn test_failed_verify_logs_one_error() {
    let codec = codec("15m");
    let forged = codec_with_secret(b"forger-secret", "15m")
        .issue(&claims(json!({"userId": 1})))
        .expect("issued");

    for token in ["", "not-a-token", forged.as_str()] {
        let events = record(|| {
            assert!(codec.verify(token).is_err());
        });
        assert_eq!(events, vec![(Level::ERROR, true)], "verifying '{token}'");
    }

    let events = record(|| {
        assert!(codec.verify_detailed("a.b.c").is_err());
    });
    assert_eq!(events, vec![(Level::ERROR, true)]);
}
