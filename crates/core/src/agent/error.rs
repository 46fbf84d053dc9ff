// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Agent termination reasons

use crate::coordination::GateError;
use crate::error::EXIT_ABORTED;
use thiserror::Error;

/// Why an agent stopped before finishing
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("aborted")]
    Aborted,
    #[error("gate failure: {0}")]
    Gate(GateError),
    #[error("failed to write action log: {0}")]
    Log(#[source] std::io::Error),
}

impl AgentError {
    /// Exit status an agent reports on this path
    pub fn exit_code(&self) -> u8 {
        EXIT_ABORTED
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, AgentError::Aborted)
    }
}

impl From<GateError> for AgentError {
    fn from(e: GateError) -> Self {
        match e {
            GateError::Cancelled(_) => AgentError::Aborted,
            closed @ GateError::Closed(_) => AgentError::Gate(closed),
        }
    }
}
