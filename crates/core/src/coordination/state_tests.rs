// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[parameterized(
    none_active = { 0, 1 },
    one_active = { 1, 1 },
    three_active = { 3, 1 },
    four_active = { 4, 3 },
    many_active = { 100, 3 },
)]
fn quorum_size_degrades_to_one(active: u32, expected: u32) {
    assert_eq!(quorum_size(active), expected);
}

#[test]
fn new_state_starts_idle() {
    let state = CoordinationState::new(5);
    assert_eq!(state.retired, 0);
    assert_eq!(state.waiting, 0);
    assert_eq!(state.quorum, 3);
    assert_eq!(state.active(), 5);
    assert!(state.agents.is_empty());
}

#[test]
fn admit_reports_quorum_on_equality() {
    let mut state = CoordinationState::new(5);

    assert!(!state.admit().quorum_reached());
    assert!(!state.admit().quorum_reached());
    let third = state.admit();

    assert!(third.quorum_reached());
    assert_eq!(third.waiting, 3);
    assert_eq!(third.active, 5);
    assert_eq!(state.quorums_served, 1);
    assert_eq!(state.help_granted, 3);
}

#[test]
fn small_workshop_serves_one_at_a_time() {
    let mut state = CoordinationState::new(2);
    let admission = state.admit();
    assert_eq!(admission.quorum, 1);
    assert!(admission.quorum_reached());
}

#[test]
fn release_reopens_only_when_group_drained() {
    let mut state = CoordinationState::new(5);
    for _ in 0..3 {
        state.admit();
    }

    assert_eq!(state.release(false).reopen, None);
    assert_eq!(state.release(false).reopen, None);
    assert_eq!(state.release(false).reopen, Some(3));
    assert_eq!(state.waiting, 0);
}

#[test]
fn retirement_shrinks_quorum() {
    let mut state = CoordinationState::new(4);
    for _ in 0..3 {
        state.admit();
    }

    let release = state.release(true);

    assert_eq!(release.retired, 1);
    assert_eq!(state.quorum, 1);
    assert!(!release.last_to_retire);
}

#[test]
fn reopen_uses_quorum_after_retirement() {
    let mut state = CoordinationState::new(4);
    for _ in 0..3 {
        state.admit();
    }
    state.release(true);
    state.release(false);
    let last = state.release(false);

    assert_eq!(last.reopen, Some(1));
}

#[test]
fn only_final_retirement_is_last() {
    let mut state = CoordinationState::new(2);

    state.admit();
    assert!(!state.release(true).last_to_retire);
    state.admit();
    let release = state.release(true);

    assert!(release.last_to_retire);
    assert_eq!(state.retired, 2);
    assert_eq!(state.active(), 0);
}

#[test]
fn register_appends_agents_in_order() {
    let mut state = CoordinationState::new(2);
    state.register(AgentId::Elf(1));
    state.register(AgentId::Elf(2));
    state.register(AgentId::Santa);
    assert_eq!(
        state.agents,
        vec![AgentId::Elf(1), AgentId::Elf(2), AgentId::Santa]
    );
}

#[test]
fn shared_state_mutations_are_visible() {
    let shared = SharedState::new(3);
    shared.with(|state| {
        state.admit();
    });
    assert_eq!(shared.snapshot().waiting, 1);
}

proptest! {
    #[test]
    fn quorum_is_always_one_or_three(elf_count in 1u32..64, retirements in 0u32..64) {
        let mut state = CoordinationState::new(elf_count);
        for _ in 0..retirements.min(elf_count) {
            state.admit();
            state.release(true);
            prop_assert!(state.quorum == 1 || state.quorum == 3);
            prop_assert_eq!(state.quorum == 3, state.active() > 3);
        }
    }

    #[test]
    fn last_to_retire_happens_exactly_once(elf_count in 1u32..64) {
        let mut state = CoordinationState::new(elf_count);
        let mut last = 0;
        for _ in 0..elf_count {
            state.admit();
            if state.release(true).last_to_retire {
                last += 1;
            }
        }
        prop_assert_eq!(last, 1);
        prop_assert_eq!(state.retired, elf_count);
    }
}
