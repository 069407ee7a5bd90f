//! Cycle-accurate out-of-order core / banked-DRAM co-simulator CLI.
//!
//! This binary provides a single entry point for running a trace through
//! the simulator. It performs:
//! 1. **Run:** read a trace file, simulate it against a configurable
//!    DRAM/core topology, and print the resulting cycle/IPC summary.
//! 2. **Config loading:** an optional JSON config file layers on top of the
//!    reference defaults; CLI flags layer on top of that.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use oosim_core::config::Config;
use oosim_core::sim::Simulator;

#[derive(Parser, Debug)]
#[command(
    name = "oosim",
    author,
    version,
    about = "Cycle-accurate out-of-order core / banked-DRAM co-simulator",
    long_about = "Simulates a trace-driven out-of-order core against a banked, multi-channel DRAM model.\n\nExamples:\n  oosim --trace traces/comm1.trace\n  oosim --trace traces/comm1.trace --config oosim.json\n  oosim --trace traces/comm1.trace --bank-bits 3 --cycle-budget 1000000"
)]
struct Cli {
    /// Memory-reference trace file (whitespace-separated `prec type addr` lines).
    #[arg(long, short)]
    trace: PathBuf,

    /// Optional JSON config file; unset fields fall back to the reference defaults.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Address bits selecting the DRAM channel. Overrides the config file.
    #[arg(long)]
    channel_bits: Option<u32>,

    /// Address bits selecting the bank within a channel. Overrides the config file.
    #[arg(long)]
    bank_bits: Option<u32>,

    /// Instructions the core may issue or retire per cycle. Overrides the config file.
    #[arg(long)]
    superscalar_width: Option<usize>,

    /// Reorder buffer capacity. Overrides the config file.
    #[arg(long)]
    rob_size: Option<usize>,

    /// Simulator cycles to run before stopping. Overrides the config file.
    #[arg(long)]
    cycle_budget: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), oosim_core::SimError> {
    let mut config = load_config(cli.config.as_deref())?;

    if let Some(bits) = cli.channel_bits {
        config.dram.channel_bits = bits;
    }
    if let Some(bits) = cli.bank_bits {
        config.dram.bank_bits = bits;
    }
    if let Some(width) = cli.superscalar_width {
        config.core.superscalar_width = width;
    }
    if let Some(size) = cli.rob_size {
        config.core.rob_size = size;
    }
    if let Some(budget) = cli.cycle_budget {
        config.cycle_budget = budget;
    }

    info!(trace = ?cli.trace, "loading trace");
    let mut sim = Simulator::from_trace_file(&config, &cli.trace)?;
    let stats = sim.run()?;
    stats.print();
    Ok(())
}

/// Loads config from `path` if given, otherwise the reference defaults.
fn load_config(path: Option<&std::path::Path>) -> Result<Config, oosim_core::SimError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| oosim_core::SimError::invariant(format!("invalid config {path:?}: {e}")))
}
