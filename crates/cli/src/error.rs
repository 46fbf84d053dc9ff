// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-friendly error display with context and suggestions.
//!
//! Every error carries the process exit code it maps to, so `main` only
//! has to print it and exit.

use santa_core::{
    AgentError, ConfigError, ResourceError, SimulationError, EXIT_CONFIG, EXIT_RESOURCE,
};
use std::fmt;
use std::path::Path;

const USAGE: &str = "santa <CYCLES> <ELVES> <MAX_HELP_DELAY_MS> <MAX_SERVE_DELAY_MS>";

/// Error with context and recovery suggestions for user-friendly display.
#[derive(Debug)]
pub struct CliError {
    /// What went wrong
    pub message: String,
    /// Why it might have happened
    pub context: Vec<String>,
    /// How to fix it
    pub suggestions: Vec<String>,
    /// Process exit code
    pub exit_code: u8,
    /// Original error if any
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: u8) -> Self {
        Self {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            exit_code,
            source: None,
        }
    }

    /// Add context about why this error might have happened.
    pub fn with_context(mut self, ctx: impl Into<String>) -> Self {
        self.context.push(ctx.into());
        self
    }

    /// Add a suggestion for how to fix this error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Set the source error that caused this error.
    pub fn with_source<E: std::error::Error + Send + Sync + 'static>(mut self, source: E) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "error: {}", self.message)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            for ctx in &self.context {
                writeln!(f, "  -> {}", ctx)?;
            }
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            writeln!(f, "suggestions:")?;
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Builders for the failures the simulator can report.
impl CliError {
    pub fn invalid_parameters(err: ConfigError) -> Self {
        CliError::new(err.to_string(), EXIT_CONFIG)
            .with_context("cycles and elves must both be positive integers")
            .with_suggestion(format!("usage: {}", USAGE))
            .with_suggestion("example: santa 2 5 100 50")
            .with_source(err)
    }

    pub fn trace_file(path: &Path, err: std::io::Error) -> Self {
        CliError::new(
            format!("failed to open trace file {}", path.display()),
            EXIT_RESOURCE,
        )
        .with_context(err.to_string())
        .with_suggestion("check that the directory is writable")
        .with_source(err)
    }

    pub fn interrupt_handler(err: ctrlc::Error) -> Self {
        CliError::new("failed to install interrupt handler", EXIT_RESOURCE)
            .with_context(err.to_string())
            .with_source(err)
    }

    pub fn summary(err: serde_json::Error) -> Self {
        CliError::new("failed to encode run summary", EXIT_RESOURCE)
            .with_context(err.to_string())
            .with_source(err)
    }
}

impl From<SimulationError> for CliError {
    fn from(err: SimulationError) -> Self {
        let exit_code = err.exit_code();
        let base = CliError::new(err.to_string(), exit_code);

        let cli = match &err {
            SimulationError::Config(_) => base.with_suggestion(format!("usage: {}", USAGE)),
            SimulationError::Resource(ResourceError::SignalExists(name)) => base
                .with_context(format!("another simulation already owns '{}'", name))
                .with_suggestion("wait for the other run to finish"),
            SimulationError::Resource(ResourceError::LogOpen { path, .. }) => base
                .with_context(format!("could not write {}", path.display()))
                .with_suggestion("check that the directory exists and is writable")
                .with_suggestion("choose another file with --output"),
            SimulationError::Spawn(_) => {
                base.with_context("the system refused to start another task")
            }
            SimulationError::AgentFailed {
                source: AgentError::Log(_),
                ..
            } => base
                .with_context("the action log stopped accepting writes")
                .with_suggestion("check free disk space"),
            SimulationError::AgentFailed { .. } | SimulationError::AgentPanicked(_) => {
                base.with_context("all other agents were stopped")
            }
            SimulationError::Interrupted => {
                base.with_context("the action log holds every line written before the interrupt")
            }
        };
        cli.with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use santa_core::{AgentId, SpawnError, EXIT_ABORTED};

    #[test]
    fn error_display() {
        let err = CliError::new("Something went wrong", 2)
            .with_context("First context")
            .with_context("Second context")
            .with_suggestion("Try this")
            .with_suggestion("Or this");

        let output = format!("{}", err);
        assert!(output.contains("error: Something went wrong"));
        assert!(output.contains("-> First context"));
        assert!(output.contains("-> Second context"));
        assert!(output.contains("1. Try this"));
        assert!(output.contains("2. Or this"));
    }

    #[test]
    fn invalid_parameters_show_usage() {
        let err = CliError::invalid_parameters(ConfigError::ZeroElves);
        let output = format!("{}", err);
        assert_eq!(err.exit_code, EXIT_CONFIG);
        assert!(output.contains("number of elves must be greater than zero"));
        assert!(output.contains(USAGE));
    }

    #[test]
    fn simulation_errors_keep_their_exit_codes() {
        let spawn: CliError = SimulationError::Spawn(SpawnError {
            agent: AgentId::Elf(2),
            reason: "no threads".to_string(),
        })
        .into();
        assert_eq!(spawn.exit_code, EXIT_RESOURCE);
        assert!(spawn.message.contains("elf 2"));

        let interrupted: CliError = SimulationError::Interrupted.into();
        assert_eq!(interrupted.exit_code, EXIT_ABORTED);
    }

    #[test]
    fn taken_signal_names_the_owner() {
        let err: CliError =
            SimulationError::Resource(ResourceError::SignalExists("santa_got".to_string())).into();
        assert!(format!("{}", err).contains("another simulation already owns 'santa_got'"));
    }
}
