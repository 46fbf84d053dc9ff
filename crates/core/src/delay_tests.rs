// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn draw(source: &mut impl Delay, count: usize, max: Duration) -> Vec<Duration> {
    (0..count).map(|_| source.next(max)).collect()
}

#[test]
fn random_delay_stays_within_bound() {
    let mut source = RandomDelay::new(7).for_agent(AgentId::Elf(1));
    let max = Duration::from_millis(25);
    for pause in draw(&mut source, 500, max) {
        assert!(pause <= max);
    }
}

#[test]
fn zero_bound_yields_zero() {
    let mut source = RandomDelay::new(7);
    assert_eq!(source.next(Duration::ZERO), Duration::ZERO);
}

#[test]
fn same_seed_and_agent_is_reproducible() {
    let max = Duration::from_millis(1000);
    let mut a = RandomDelay::new(42).for_agent(AgentId::Elf(3));
    let mut b = RandomDelay::new(42).for_agent(AgentId::Elf(3));
    assert_eq!(draw(&mut a, 20, max), draw(&mut b, 20, max));
}

#[test]
fn different_agents_get_different_sequences() {
    let max = Duration::from_millis(1000);
    let base = RandomDelay::new(42);
    let mut elf1 = base.for_agent(AgentId::Elf(1));
    let mut elf2 = base.for_agent(AgentId::Elf(2));
    assert_ne!(draw(&mut elf1, 20, max), draw(&mut elf2, 20, max));
}

#[test]
fn agent_source_keeps_base_seed() {
    let source = RandomDelay::new(99).for_agent(AgentId::Santa);
    assert_eq!(source.seed(), 99);
}

#[test]
fn no_delay_is_always_zero() {
    let mut source = NoDelay.for_agent(AgentId::Santa);
    assert_eq!(source.next(Duration::from_secs(5)), Duration::ZERO);
}
