// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared coordination state and quorum rules
//!
//! Every read and write goes through [`SharedState::with`], which holds the
//! shared-state lock for the duration of a plain field update. Nothing in
//! here suspends.

use crate::agent::AgentId;
use serde::Serialize;
use std::sync::Mutex;

/// Group size Santa serves while enough elves are active
pub const QUORUM: u32 = 3;

/// Quorum for a given number of active elves
pub fn quorum_size(active: u32) -> u32 {
    if active > QUORUM {
        QUORUM
    } else {
        1
    }
}

/// Counters shared by Santa and the elves
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CoordinationState {
    pub elf_count: u32,
    /// Elves that finished their final cycle
    pub retired: u32,
    /// Waiting elves needed before Santa serves
    pub quorum: u32,
    /// Elves admitted by Santa and not yet released
    pub waiting: u32,
    /// Quorums Santa has served
    pub quorums_served: u64,
    /// Elves released by those quorums
    pub help_granted: u64,
    /// Spawned agents, in spawn order
    pub agents: Vec<AgentId>,
}

/// Santa's view right after admitting one request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Admission {
    pub waiting: u32,
    pub quorum: u32,
    pub active: u32,
}

impl Admission {
    pub fn quorum_reached(&self) -> bool {
        self.waiting == self.quorum
    }
}

/// An elf's view right after being released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Release {
    /// Request slots to reopen, set when the last waiting elf left
    pub reopen: Option<u32>,
    /// Retirements so far, including this one
    pub retired: u32,
    /// This elf completed the retirement of everyone
    pub last_to_retire: bool,
}

impl CoordinationState {
    pub fn new(elf_count: u32) -> Self {
        Self {
            elf_count,
            retired: 0,
            quorum: quorum_size(elf_count),
            waiting: 0,
            quorums_served: 0,
            help_granted: 0,
            agents: Vec::new(),
        }
    }

    /// Elves that have not retired
    pub fn active(&self) -> u32 {
        self.elf_count.saturating_sub(self.retired)
    }

    /// Santa admits one more waiting elf
    pub fn admit(&mut self) -> Admission {
        self.waiting += 1;
        let admission = Admission {
            waiting: self.waiting,
            quorum: self.quorum,
            active: self.active(),
        };
        if admission.quorum_reached() {
            self.quorums_served += 1;
            self.help_granted += u64::from(admission.waiting);
        }
        admission
    }

    /// An elf leaves the waiting group, retiring on its final cycle
    pub fn release(&mut self, retiring: bool) -> Release {
        self.waiting = self.waiting.saturating_sub(1);

        let mut last_to_retire = false;
        if retiring {
            self.retired += 1;
            self.quorum = quorum_size(self.active());
            last_to_retire = self.retired == self.elf_count;
        }

        Release {
            reopen: (self.waiting == 0).then_some(self.quorum),
            retired: self.retired,
            last_to_retire,
        }
    }

    /// Record a spawned agent
    pub fn register(&mut self, agent: AgentId) {
        self.agents.push(agent);
    }
}

/// Coordination state behind the shared-state lock
#[derive(Debug)]
pub struct SharedState {
    inner: Mutex<CoordinationState>,
}

impl SharedState {
    pub fn new(elf_count: u32) -> Self {
        Self {
            inner: Mutex::new(CoordinationState::new(elf_count)),
        }
    }

    /// Run `f` while holding the lock
    pub fn with<R>(&self, f: impl FnOnce(&mut CoordinationState) -> R) -> R {
        let mut state = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut state)
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> CoordinationState {
        self.with(|state| state.clone())
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
