// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for simulation setup and supervision

use crate::agent::{AgentError, AgentId};
use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for rejected parameters
pub const EXIT_CONFIG: u8 = 1;
/// Exit code for setup, launch, or sibling failures
pub const EXIT_RESOURCE: u8 = 2;
/// Exit code for runs ended through the abort path
pub const EXIT_ABORTED: u8 = 3;

/// Failure to create a shared resource
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("signal '{0}' already exists")]
    SignalExists(String),
    #[error("failed to open action log {}: {source}", path.display())]
    LogOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure to launch an agent
#[derive(Debug, Error)]
#[error("failed to launch {agent}: {reason}")]
pub struct SpawnError {
    pub agent: AgentId,
    pub reason: String,
}

/// Errors that end a simulation run
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("invalid parameters: {0}")]
    Config(#[from] ConfigError),
    #[error("resource creation failed: {0}")]
    Resource(#[from] ResourceError),
    #[error(transparent)]
    Spawn(#[from] SpawnError),
    #[error("{agent} failed: {source}")]
    AgentFailed {
        agent: AgentId,
        #[source]
        source: AgentError,
    },
    #[error("agent terminated abnormally: {0}")]
    AgentPanicked(String),
    #[error("simulation interrupted")]
    Interrupted,
}

impl SimulationError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            SimulationError::Config(_) => EXIT_CONFIG,
            SimulationError::Resource(_)
            | SimulationError::Spawn(_)
            | SimulationError::AgentFailed { .. }
            | SimulationError::AgentPanicked(_) => EXIT_RESOURCE,
            SimulationError::Interrupted => EXIT_ABORTED,
        }
    }
}
