// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! santa-core: the Santa Claus problem as a set of cooperating tasks
//!
//! This crate provides:
//! - Counting gates and a namespace for creating them exclusively
//! - The shared coordination state and quorum rules
//! - Elf and Santa agents that talk only through gates and shared state
//! - A globally numbered action log
//! - The simulation orchestrator: setup, spawn, join, abort, teardown

pub mod agent;
pub mod config;
pub mod coordination;
pub mod delay;
pub mod error;
pub mod log;
pub mod simulation;

pub use agent::{AgentError, AgentId, Workshop};
pub use config::{ConfigError, SimulationConfig, DEFAULT_OUTPUT};
pub use coordination::{
    quorum_size, CoordinationState, Gate, GateError, SharedState, SignalKind, SignalNamespace,
    SignalSet, QUORUM,
};
pub use delay::{Delay, NoDelay, RandomDelay};
pub use error::{
    ResourceError, SimulationError, SpawnError, EXIT_ABORTED, EXIT_CONFIG, EXIT_RESOURCE,
};
pub use log::{parse_log, Action, ActionLog, LogParseError, LogRecord, MemorySink};
pub use simulation::{
    AgentOutcome, AgentTask, LogTarget, RunSummary, RuntimeSpawner, Simulation, Spawner,
    DEFAULT_PREFIX,
};
