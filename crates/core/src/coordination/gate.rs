// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Counting gate for rendezvous between agents
//!
//! A gate is a counting semaphore whose units are produced by one role and
//! consumed by another. Waiters are admitted in FIFO order. Closing a gate
//! fails every pending and future wait, which is how teardown unblocks
//! agents that would otherwise never be signaled.

use thiserror::Error;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Failure of a gate operation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("gate '{0}' is closed")]
    Closed(String),
    #[error("wait on gate '{0}' was cancelled")]
    Cancelled(String),
}

/// Counting gate
#[derive(Debug)]
pub struct Gate {
    name: String,
    semaphore: Semaphore,
}

impl Gate {
    /// Create a gate holding `initial` units
    pub fn new(name: impl Into<String>, initial: usize) -> Self {
        Self {
            name: name.into(),
            semaphore: Semaphore::new(initial),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Units currently available to waiters
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }

    /// Release `units` units, waking up to that many waiters
    pub fn post(&self, units: u32) -> Result<(), GateError> {
        if self.is_closed() {
            return Err(GateError::Closed(self.name.clone()));
        }
        self.semaphore.add_permits(units as usize);
        Ok(())
    }

    /// Take one unit, suspending until one is posted
    ///
    /// Cancellation wins over an available unit, and is checked again
    /// after waking so a cancelled agent never proceeds past the gate.
    pub async fn wait(&self, cancel: &CancellationToken) -> Result<(), GateError> {
        let acquired = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(GateError::Cancelled(self.name.clone())),
            acquired = self.semaphore.acquire() => acquired,
        };

        let permit = acquired.map_err(|_| GateError::Closed(self.name.clone()))?;
        permit.forget();

        if cancel.is_cancelled() {
            return Err(GateError::Cancelled(self.name.clone()));
        }
        Ok(())
    }

    /// Fail all pending and future waits
    pub fn close(&self) {
        self.semaphore.close();
    }
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
