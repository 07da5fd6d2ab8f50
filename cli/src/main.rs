//! liquidity-sim: run the liquidity route simulator from the command line
//!
//! Loads a scenario (JSON file or the built-in three-venue reference),
//! runs it for a number of ticks, and logs every engine event through
//! `tracing`. Set `RUST_LOG=liquidity_sim=debug` to see individual
//! settlements and executions.

mod report;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use liquidity_simulator_core_rs::{Orchestrator, OrchestratorConfig, RunSummary, StrategyConfig};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Discrete-time liquidity route simulator")]
struct Cli {
    /// Scenario JSON file (default: built-in three-venue reference scenario)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strategy JSON file (default: reference threshold rules)
    #[arg(long)]
    strategy: Option<PathBuf>,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 1000)]
    ticks: usize,

    /// Emit a periodic report every N ticks (overrides the scenario file)
    #[arg(long)]
    report_interval: Option<usize>,

    /// Write the run summary and full event log as JSON to this path
    #[arg(long)]
    events_out: Option<PathBuf>,

    /// Log as JSON lines instead of human-readable text
    #[arg(long, default_value_t = false)]
    log_json: bool,
}

/// Everything written by `--events-out`
#[derive(Serialize)]
struct RunExport<'a> {
    config_hash: &'a str,
    final_digest: String,
    summary: &'a RunSummary,
    events: &'a liquidity_simulator_core_rs::EventLog,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_json);

    let mut config = match &cli.config {
        Some(path) => load_json::<OrchestratorConfig>(path).context("loading scenario")?,
        None => scenario::reference_config(Some(100)),
    };
    if cli.report_interval.is_some() {
        config.report_interval = cli.report_interval;
    }

    let strategy = match &cli.strategy {
        Some(path) => load_json::<StrategyConfig>(path).context("loading strategy")?,
        None => scenario::reference_strategy(),
    };

    let mut orchestrator =
        Orchestrator::from_config(config, &strategy).context("building simulation from scenario")?;
    info!(
        venues = orchestrator.registry().num_venues(),
        routes = orchestrator.registry().routes().len(),
        strategy = orchestrator.strategy_name(),
        config_hash = orchestrator.config_hash(),
        "Simulation configured"
    );

    let summary = run(&mut orchestrator, cli.ticks);

    let final_digest = orchestrator.state_digest()?;
    info!(digest = %final_digest, "Final state digest");

    if let Some(path) = &cli.events_out {
        let export = RunExport {
            config_hash: orchestrator.config_hash(),
            final_digest,
            summary: &summary,
            events: orchestrator.event_log(),
        };
        let json = serde_json::to_string_pretty(&export).context("serializing event log")?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), events = orchestrator.event_count(), "Event log written");
    }

    Ok(())
}

/// Run the orchestrator, then render its event log and summary
fn run(orchestrator: &mut Orchestrator, ticks: usize) -> RunSummary {
    let logged_before = orchestrator.event_count();
    info!(ticks, "Starting simulation");
    let summary = orchestrator.run(ticks);

    report::log_state_report("Initial state", &summary.initial);
    for event in &orchestrator.event_log().events()[logged_before..] {
        report::log_event(event);
    }
    report::log_state_report("Final state", &summary.final_state);
    report::log_run_summary(&summary);
    summary
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}

/// Initialise the `tracing` subscriber.
fn init_logging(json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("liquidity_sim=info"));

    if json {
        fmt().json().with_env_filter(env_filter).with_target(true).init();
    } else {
        fmt().with_env_filter(env_filter).with_target(false).init();
    }
}
