// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulation parameters

use crate::coordination::quorum_size;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Action log written when no path is given
pub const DEFAULT_OUTPUT: &str = "santa.out";

/// Rejected simulation parameters
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("number of cycles must be greater than zero")]
    ZeroCycles,
    #[error("number of elves must be greater than zero")]
    ZeroElves,
}

/// Immutable parameters of one simulation run
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimulationConfig {
    /// Work cycles each elf performs before retiring
    pub cycles: u32,
    /// Number of elves
    pub elf_count: u32,
    /// Upper bound for one elf's simulated work
    pub max_help_delay: Duration,
    /// Upper bound for Santa's simulated service
    pub max_serve_delay: Duration,
}

impl SimulationConfig {
    pub fn new(
        cycles: u32,
        elf_count: u32,
        max_help_delay_ms: u64,
        max_serve_delay_ms: u64,
    ) -> Result<Self, ConfigError> {
        if cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        if elf_count == 0 {
            return Err(ConfigError::ZeroElves);
        }

        Ok(Self {
            cycles,
            elf_count,
            max_help_delay: Duration::from_millis(max_help_delay_ms),
            max_serve_delay: Duration::from_millis(max_serve_delay_ms),
        })
    }

    /// Total individual help requests over the whole run
    pub fn help_events(&self) -> u64 {
        u64::from(self.cycles) * u64::from(self.elf_count)
    }

    /// Request slots Santa opens before anyone has asked
    pub fn initial_quorum(&self) -> u32 {
        quorum_size(self.elf_count)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
