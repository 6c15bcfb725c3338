use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// BENCH-SIM: Benchmark Simulation & Scoring Engine
///
/// Simulates benchmark-suite executions for agent evaluation dashboards
/// and scores arbitrary prompts with a deterministic heuristic.
#[derive(Parser, Debug)]
#[command(name = "bench-sim")]
#[command(version = "0.1.0")]
#[command(about = "Simulate benchmark suites and score prompt quality")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Directory for snapshots and run records
    #[arg(long, default_value = "./bench-data", global = true)]
    pub data_dir: PathBuf,

    /// Path to an optional YAML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a suite run and persist it
    Simulate(SimulateArgs),

    /// Show the current snapshot for a suite (generates one if absent)
    Snapshot(SnapshotArgs),

    /// Score a prompt with the heuristic quality analysis
    Score(ScoreArgs),

    /// List persisted run records, newest first
    Runs(RunsArgs),

    /// List the suite catalog
    Suites,

    /// Generate a sample config file
    Init(InitArgs),

    /// Start the web API server
    Ui(UiArgs),
}

#[derive(Parser, Debug)]
pub struct SimulateArgs {
    /// Suite id: output, custom, crisis, or all
    pub suite: String,

    /// Pass/fail threshold recorded on the payload
    #[arg(short, long)]
    pub threshold: Option<f64>,

    /// Seed the noise generator for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print the full payload as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct SnapshotArgs {
    /// Suite id: output, custom, crisis, or all
    pub suite: String,
}

#[derive(Parser, Debug)]
pub struct ScoreArgs {
    /// Prompt text to score
    pub prompt: String,

    /// Print the breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct RunsArgs {
    /// Limit number of records
    #[arg(short, long, default_value = "20")]
    pub limit: usize,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for the config file
    #[arg(short, long, default_value = "bench-sim.yaml")]
    pub output: PathBuf,
}

#[derive(Parser, Debug)]
pub struct UiArgs {
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
}
