// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Santa and elf agents
//!
//! Agents interact only through the gates of a [`SignalSet`] and the
//! counters of a [`SharedState`]. Each agent checks the cancellation token
//! before taking either lock and after waking from any gate, and never
//! suspends while holding a lock.

pub mod elf;
mod error;
pub mod santa;

pub use error::AgentError;

use crate::config::SimulationConfig;
use crate::coordination::{SharedState, SignalSet};
use crate::log::{Action, ActionLog};
use serde::Serialize;
use std::fmt;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Identity of an agent
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentId {
    Santa,
    /// 1-based elf number
    Elf(u32),
}

impl AgentId {
    /// Stable number for seeding: Santa is 0, elves their id
    pub fn ordinal(self) -> u64 {
        match self {
            AgentId::Santa => 0,
            AgentId::Elf(id) => u64::from(id),
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentId::Santa => write!(f, "santa"),
            AgentId::Elf(id) => write!(f, "elf {}", id),
        }
    }
}

/// Everything the agents of one simulation share
#[derive(Debug)]
pub struct Workshop {
    pub config: SimulationConfig,
    pub state: SharedState,
    pub signals: SignalSet,
    pub log: ActionLog,
}

impl Workshop {
    pub fn new(config: SimulationConfig, signals: SignalSet, log: ActionLog) -> Self {
        let state = SharedState::new(config.elf_count);
        Self {
            config,
            state,
            signals,
            log,
        }
    }

    /// Close the gates and flush the log
    ///
    /// Safe to call more than once; returns false if already torn down.
    pub fn teardown(&self) -> bool {
        if !self.signals.close() {
            return false;
        }
        if let Err(e) = self.log.flush() {
            tracing::warn!(error = %e, "failed to flush action log");
        }
        true
    }

    /// Log an action unless the run has been aborted
    pub(crate) fn emit(
        &self,
        cancel: &CancellationToken,
        agent: AgentId,
        action: Action,
    ) -> Result<u64, AgentError> {
        ensure_live(cancel)?;
        self.log.emit(agent, action).map_err(AgentError::Log)
    }
}

/// Fail fast once the run has been aborted
pub(crate) fn ensure_live(cancel: &CancellationToken) -> Result<(), AgentError> {
    if cancel.is_cancelled() {
        return Err(AgentError::Aborted);
    }
    Ok(())
}

/// Simulated work; an abort cuts it short
pub(crate) async fn pause(duration: Duration, cancel: &CancellationToken) -> Result<(), AgentError> {
    if duration.is_zero() {
        return ensure_live(cancel);
    }
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AgentError::Aborted),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
