// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Simulation orchestrator
//!
//! Creates the gates, the action log and the shared state, launches one
//! task per elf plus Santa, and joins them. The first abnormal exit cancels
//! every other agent; resources are torn down on every path.

use crate::agent::{elf, santa, AgentError, AgentId, Workshop};
use crate::config::SimulationConfig;
use crate::coordination::{SignalNamespace, SignalSet};
use crate::delay::Delay;
use crate::error::{ResourceError, SimulationError, SpawnError};
use crate::log::ActionLog;
use serde::Serialize;
use std::future::Future;
use std::io::Write;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Signal name prefix used unless overridden
pub const DEFAULT_PREFIX: &str = "santa";

/// How one agent ended
#[derive(Debug)]
pub struct AgentOutcome {
    pub agent: AgentId,
    pub result: Result<(), AgentError>,
}

/// A launched agent's body
pub type AgentTask = Pin<Box<dyn Future<Output = AgentOutcome> + Send + 'static>>;

/// Launches agent tasks
pub trait Spawner: Send + Sync {
    fn spawn(
        &self,
        tasks: &mut JoinSet<AgentOutcome>,
        agent: AgentId,
        task: AgentTask,
    ) -> Result<(), SpawnError>;
}

/// Spawns onto the current tokio runtime
#[derive(Clone, Copy, Debug, Default)]
pub struct RuntimeSpawner;

impl Spawner for RuntimeSpawner {
    fn spawn(
        &self,
        tasks: &mut JoinSet<AgentOutcome>,
        agent: AgentId,
        task: AgentTask,
    ) -> Result<(), SpawnError> {
        let handle = Handle::try_current().map_err(|e| SpawnError {
            agent,
            reason: e.to_string(),
        })?;
        tasks.spawn_on(task, &handle);
        Ok(())
    }
}

/// Where the action log goes
pub enum LogTarget {
    File { path: PathBuf, append: bool },
    Writer(Box<dyn Write + Send>),
}

impl LogTarget {
    pub fn file(path: impl Into<PathBuf>, append: bool) -> Self {
        LogTarget::File {
            path: path.into(),
            append,
        }
    }

    pub fn writer(writer: impl Write + Send + 'static) -> Self {
        LogTarget::Writer(Box::new(writer))
    }

    fn open(self) -> Result<ActionLog, ResourceError> {
        match self {
            LogTarget::File { path, append } => ActionLog::create(&path, append),
            LogTarget::Writer(writer) => Ok(ActionLog::new(writer)),
        }
    }
}

/// Totals of a completed run
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub cycles: u32,
    pub elves: u32,
    pub log_lines: u64,
    pub quorums_served: u64,
    pub help_granted: u64,
    pub retired: u32,
}

/// One configured simulation run
pub struct Simulation<D: Delay> {
    config: SimulationConfig,
    delay: D,
    namespace: SignalNamespace,
    prefix: String,
    spawner: Box<dyn Spawner>,
    cancel: CancellationToken,
}

impl<D: Delay> Simulation<D> {
    pub fn new(config: SimulationConfig, delay: D) -> Self {
        Self {
            config,
            delay,
            namespace: SignalNamespace::new(),
            prefix: DEFAULT_PREFIX.to_string(),
            spawner: Box::new(RuntimeSpawner),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: SignalNamespace) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_spawner(mut self, spawner: impl Spawner + 'static) -> Self {
        self.spawner = Box::new(spawner);
        self
    }

    /// Token that aborts the run when cancelled
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run to completion, writing the action log to `target`
    pub async fn run(self, target: LogTarget) -> Result<RunSummary, SimulationError> {
        let signals = SignalSet::open(&self.namespace, &self.prefix)?;
        let log = match target.open() {
            Ok(log) => log,
            Err(e) => {
                signals.close();
                return Err(e.into());
            }
        };
        let workshop = Arc::new(Workshop::new(self.config.clone(), signals, log));

        tracing::info!(
            cycles = self.config.cycles,
            elves = self.config.elf_count,
            "simulation starting"
        );

        let mut tasks = JoinSet::new();
        if let Err(e) = self.launch(&workshop, &mut tasks) {
            tracing::error!(error = %e, "launch failed");
            self.abort(&workshop);
            while tasks.join_next().await.is_some() {}
            workshop.teardown();
            return Err(e.into());
        }

        let outcome = self.supervise(&workshop, &mut tasks).await;
        workshop.teardown();
        outcome?;

        let state = workshop.state.snapshot();
        let summary = RunSummary {
            cycles: self.config.cycles,
            elves: self.config.elf_count,
            log_lines: workshop.log.sequence(),
            quorums_served: state.quorums_served,
            help_granted: state.help_granted,
            retired: state.retired,
        };
        tracing::info!(?summary, "simulation finished");
        Ok(summary)
    }

    /// Spawn every elf, then Santa
    fn launch(
        &self,
        workshop: &Arc<Workshop>,
        tasks: &mut JoinSet<AgentOutcome>,
    ) -> Result<(), SpawnError> {
        for id in 1..=self.config.elf_count {
            let agent = AgentId::Elf(id);
            let body = elf::run(
                id,
                Arc::clone(workshop),
                self.delay.for_agent(agent),
                self.cancel.clone(),
            );
            let task = Box::pin(
                async move {
                    AgentOutcome {
                        agent,
                        result: body.await,
                    }
                }
                .instrument(tracing::info_span!("elf", id)),
            );
            self.spawn(workshop, tasks, agent, task)?;
        }

        let agent = AgentId::Santa;
        let body = santa::run(
            Arc::clone(workshop),
            self.delay.for_agent(agent),
            self.cancel.clone(),
        );
        let task = Box::pin(
            async move {
                AgentOutcome {
                    agent,
                    result: body.await,
                }
            }
            .instrument(tracing::info_span!("santa")),
        );
        self.spawn(workshop, tasks, agent, task)
    }

    fn spawn(
        &self,
        workshop: &Workshop,
        tasks: &mut JoinSet<AgentOutcome>,
        agent: AgentId,
        task: AgentTask,
    ) -> Result<(), SpawnError> {
        self.spawner.spawn(tasks, agent, task)?;
        workshop.state.with(|state| state.register(agent));
        tracing::debug!(%agent, "agent launched");
        Ok(())
    }

    /// Join every agent; the first abnormal exit aborts the rest
    async fn supervise(
        &self,
        workshop: &Workshop,
        tasks: &mut JoinSet<AgentOutcome>,
    ) -> Result<(), SimulationError> {
        let mut failure = None;

        while let Some(joined) = tasks.join_next().await {
            let error = match joined {
                Ok(AgentOutcome {
                    agent,
                    result: Ok(()),
                }) => {
                    tracing::debug!(%agent, "agent finished");
                    continue;
                }
                Ok(AgentOutcome {
                    agent,
                    result: Err(e),
                }) => {
                    tracing::warn!(
                        %agent,
                        exit_code = e.exit_code(),
                        error = %e,
                        "agent exited abnormally"
                    );
                    // An abort seen before we aborted anyone came from outside
                    if e.is_abort() {
                        SimulationError::Interrupted
                    } else {
                        SimulationError::AgentFailed { agent, source: e }
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "agent task failed");
                    SimulationError::AgentPanicked(e.to_string())
                }
            };

            if failure.is_none() {
                failure = Some(error);
                self.abort(workshop);
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Cancel every agent through the shared token
    ///
    /// The agent registry is read only to report which agents were running.
    fn abort(&self, workshop: &Workshop) {
        let agents = workshop.state.with(|state| state.agents.clone());
        tracing::debug!(?agents, "aborting agents");
        self.cancel.cancel();
    }
}

#[cfg(test)]
#[path = "simulation_tests.rs"]
mod tests;
