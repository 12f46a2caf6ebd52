//! Purpose: Integration coverage for the public Rust API surface.
//! Exports: Integration tests only.
//! Role: Exercise capsule lifecycle, compute, callbacks, and sequence fill
//! through `capsule::api` exactly as an embedder would.
//! Invariants: Tests rely only on the stable API; no core internals.
//! Invariants: Callback assertions observe invocation counts and payloads.

use capsule::api::{Capsule, ErrorKind, Value, fill_indices};
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn value_round_trips_through_construction() {
    for value in [
        Value::new(0, false),
        Value::new(-17, true),
        Value::new(i32::MAX, false),
        Value::new(i32::MIN, true),
    ] {
        assert_eq!(Capsule::new(value).value(), value);
    }
}

#[test]
fn compute_overwrites_rather_than_accumulates() {
    let mut capsule = Capsule::new(Value::new(1000, true));
    capsule.compute(&[3, 4, 5]);
    assert_eq!(capsule.value(), Value::new(12, true));

    capsule.compute(&[3, 4, 5]);
    assert_eq!(capsule.value().integer, 12);

    capsule.compute(&[]);
    assert_eq!(capsule.value(), Value::new(0, true));
}

#[test]
fn trigger_reflects_latest_compute_not_registration_time() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut capsule = Capsule::new(Value::new(99, false));
    capsule.arm(move |value| sink.borrow_mut().push(value));
    capsule.compute(&[3, 4, 5]);
    capsule.trigger();
    capsule.compute(&[-2, 2, 7]);
    capsule.trigger();

    assert_eq!(*seen.borrow(), vec![12, 7]);
}

#[test]
fn armed_state_follows_registration() {
    let mut capsule = Capsule::new(Value::default());
    assert!(!capsule.is_armed());

    capsule.arm(|_| {});
    assert!(capsule.is_armed());

    capsule.trigger();
    assert!(capsule.is_armed());

    capsule.disarm();
    assert!(!capsule.is_armed());
}

#[test]
fn capsule_drop_releases_without_touching_captured_context() {
    let hits = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&hits);
    {
        let mut capsule = Capsule::new(Value::default());
        capsule.arm(move |_| *sink.borrow_mut() += 1);
        capsule.trigger();
    }
    assert_eq!(*hits.borrow(), 1);
    assert_eq!(Rc::strong_count(&hits), 1);
}

#[test]
fn fill_indices_contract() {
    let mut buffer = [0i64; 8];
    fill_indices(&mut buffer, 5).expect("fill");
    assert_eq!(buffer, [0, 1, 2, 3, 4, 0, 0, 0]);

    let err = fill_indices(&mut buffer, 9).expect_err("should fail");
    assert_eq!(err.kind(), ErrorKind::Bounds);
    assert_eq!(buffer, [0, 1, 2, 3, 4, 0, 0, 0]);
}

#[test]
fn value_serialization_preserves_fields_in_order() {
    let value = Value::new(7, true);
    let json = serde_json::to_string(&value).expect("serialize");
    assert_eq!(json, r#"{"integer":7,"boolean":true}"#);

    let back: Value = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, value);
}
