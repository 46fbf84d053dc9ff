// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! santa - Santa Claus problem simulator

mod error;

use clap::Parser;
use error::CliError;
use santa_core::{
    LogTarget, RandomDelay, SignalNamespace, Simulation, SimulationConfig, DEFAULT_OUTPUT,
    EXIT_CONFIG,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_appender::non_blocking::WorkerGuard;

#[derive(Parser, Debug)]
#[command(
    name = "santa",
    version,
    about = "Santa Claus problem simulator",
    long_about = "Runs Santa and a team of elves as concurrent tasks. Elves ask for help in \
                  groups of three while more than three are still working, then one at a \
                  time. Every action is appended to a numbered log."
)]
struct Cli {
    /// Help cycles each elf completes before retiring
    cycles: u32,

    /// Number of elves
    elves: u32,

    /// Upper bound in milliseconds for an elf's work between requests
    max_help_delay: u64,

    /// Upper bound in milliseconds for Santa's help
    max_serve_delay: u64,

    /// Action log path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Append to the action log instead of replacing it
    #[arg(long)]
    append: bool,

    /// Seed for the random delays (defaults to the process id)
    #[arg(long)]
    seed: Option<u64>,

    /// Print a JSON summary of the run on stdout
    #[arg(long)]
    summary: bool,

    /// Write diagnostics to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    trace_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::from(EXIT_CONFIG)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprint!("{}", e);
            ExitCode::from(e.exit_code)
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config =
        SimulationConfig::new(cli.cycles, cli.elves, cli.max_help_delay, cli.max_serve_delay)
            .map_err(CliError::invalid_parameters)?;

    let _guard = setup_logging(cli.trace_file.as_deref())?;

    let delay = match cli.seed {
        Some(seed) => RandomDelay::new(seed),
        None => RandomDelay::from_process_id(),
    };
    tracing::info!(
        seed = delay.seed(),
        output = %cli.output.display(),
        append = cli.append,
        "configured"
    );

    let simulation =
        Simulation::new(config, delay).with_namespace(SignalNamespace::global().clone());

    let cancel = simulation.cancel_token();
    ctrlc::set_handler(move || {
        tracing::warn!("interrupt received, stopping agents");
        cancel.cancel();
    })
    .map_err(CliError::interrupt_handler)?;

    let summary = simulation
        .run(LogTarget::file(cli.output, cli.append))
        .await?;

    if cli.summary {
        let json = serde_json::to_string_pretty(&summary).map_err(CliError::summary)?;
        println!("{}", json);
    }

    Ok(())
}

/// Diagnostics go to stderr unless a trace file is given
fn setup_logging(trace_file: Option<&Path>) -> Result<Option<WorkerGuard>, CliError> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let Some(path) = trace_file else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
        return Ok(None);
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| CliError::trace_file(path, e))?;
    }
    let file = std::fs::File::create(path).map_err(|e| CliError::trace_file(path, e))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .init();

    Ok(Some(guard))
}
