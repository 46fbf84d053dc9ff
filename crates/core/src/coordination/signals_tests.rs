// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn open_creates_every_gate_empty() {
    let ns = SignalNamespace::new();
    let signals = SignalSet::open(&ns, "test").unwrap();

    for kind in SignalKind::ALL {
        let gate = signals.gate(kind);
        assert_eq!(gate.name(), kind.name("test"));
        assert_eq!(gate.available(), 0);
        assert!(ns.contains(gate.name()));
    }
    assert_eq!(ns.names().len(), 5);
}

#[test]
fn names_use_prefix() {
    assert_eq!(SignalKind::Ask.name("santa"), "santa_ask");
    assert_eq!(SignalKind::Vacation.name("x"), "x_vacation");
}

#[test]
fn second_open_with_same_prefix_fails() {
    let ns = SignalNamespace::new();
    let _first = SignalSet::open(&ns, "test").unwrap();

    let err = SignalSet::open(&ns, "test").unwrap_err();
    assert!(matches!(err, ResourceError::SignalExists(name) if name == "test_finish"));
    assert_eq!(ns.names().len(), 5);
}

#[test]
fn failure_on_third_signal_releases_first_two() {
    let ns = SignalNamespace::new();
    // Third in creation order is "ask"
    assert_eq!(SignalKind::ALL[2], SignalKind::Ask);
    ns.create("test_ask").unwrap();

    let err = SignalSet::open(&ns, "test").unwrap_err();

    assert!(matches!(err, ResourceError::SignalExists(name) if name == "test_ask"));
    assert!(!ns.contains("test_finish"));
    assert!(!ns.contains("test_got"));
    // Only the pre-existing name remains
    assert_eq!(ns.names(), vec!["test_ask".to_string()]);
}

#[test]
fn close_unlinks_all_names() {
    let ns = SignalNamespace::new();
    let signals = SignalSet::open(&ns, "test").unwrap();

    assert!(signals.close());

    assert!(signals.is_closed());
    assert!(ns.is_empty());
    for kind in SignalKind::ALL {
        assert!(signals.gate(kind).is_closed());
    }
}

#[test]
fn close_twice_is_a_no_op() {
    let ns = SignalNamespace::new();
    let signals = SignalSet::open(&ns, "test").unwrap();

    assert!(signals.close());
    assert!(!signals.close());
    assert!(ns.is_empty());
}

#[test]
fn close_leaves_other_sets_alone() {
    let ns = SignalNamespace::new();
    let a = SignalSet::open(&ns, "a").unwrap();
    let _b = SignalSet::open(&ns, "b").unwrap();

    a.close();

    assert_eq!(ns.names().len(), 5);
    assert!(ns.contains("b_ask"));
}

#[test]
fn drop_releases_names() {
    let ns = SignalNamespace::new();
    {
        let _signals = SignalSet::open(&ns, "test").unwrap();
        assert!(!ns.is_empty());
    }
    assert!(ns.is_empty());
}

#[test]
fn reopen_after_close_succeeds() {
    let ns = SignalNamespace::new();
    let first = SignalSet::open(&ns, "test").unwrap();
    first.close();
    SignalSet::open(&ns, "test").unwrap();
}
