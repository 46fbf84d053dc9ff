// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Delay abstraction for simulated work
//!
//! Every agent draws its pauses from its own source, derived from a shared
//! seed and the agent's identity. Runs with the same seed are reproducible
//! per agent; different agents get different sequences.

use crate::agent::AgentId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// A source of simulated work durations
pub trait Delay: Sized + Send + 'static {
    /// Independent source for one agent
    fn for_agent(&self, agent: AgentId) -> Self;

    /// Next pause in `[0, max]`, at millisecond granularity
    fn next(&mut self, max: Duration) -> Duration;
}

/// Seeded pseudo-random delays
#[derive(Clone, Debug)]
pub struct RandomDelay {
    seed: u64,
    rng: StdRng,
}

impl RandomDelay {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed from the current process id
    pub fn from_process_id() -> Self {
        Self::new(u64::from(std::process::id()))
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Delay for RandomDelay {
    fn for_agent(&self, agent: AgentId) -> Self {
        // Spread consecutive elf ids across the seed space
        let salt = agent.ordinal().wrapping_mul(0x9E37_79B9_7F4A_7C15);
        let mut source = Self::new(self.seed ^ salt);
        source.seed = self.seed;
        source
    }

    fn next(&mut self, max: Duration) -> Duration {
        let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
        if max_ms == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.rng.gen_range(0..=max_ms))
    }
}

/// Zero-length delays for deterministic tests
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Delay for NoDelay {
    fn for_agent(&self, _agent: AgentId) -> Self {
        NoDelay
    }

    fn next(&mut self, _max: Duration) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
#[path = "delay_tests.rs"]
mod tests;
