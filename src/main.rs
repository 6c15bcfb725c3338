use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use bench_sim::catalog::SuiteCatalog;
use bench_sim::cli::{self, AppConfig, Args, Command};
use bench_sim::sim::{self, RunPayload, SuiteSimulator};
use bench_sim::storage::{JsonFileStore, RunRecord, SnapshotStore};
use bench_sim::{scoring, web};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let _subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig {
            data_dir: args.data_dir.clone(),
            ..AppConfig::default()
        },
    };

    match args.command {
        Command::Simulate(simulate_args) => {
            simulate_suite(&config, simulate_args)?;
        }
        Command::Snapshot(snapshot_args) => {
            show_snapshot(&config, snapshot_args)?;
        }
        Command::Score(score_args) => {
            score_text(score_args)?;
        }
        Command::Runs(runs_args) => {
            list_runs(&config, runs_args)?;
        }
        Command::Suites => {
            list_suites();
        }
        Command::Init(init_args) => {
            generate_sample_config(init_args)?;
        }
        Command::Ui(ui_args) => {
            start_ui_server(&config, ui_args).await?;
        }
    }

    Ok(())
}

fn simulate_suite(config: &AppConfig, args: cli::SimulateArgs) -> Result<()> {
    let catalog = SuiteCatalog::builtin();
    let simulator = SuiteSimulator::new(&catalog);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let threshold = args.threshold.or(config.default_threshold);
    let as_of = Utc::now();

    info!("Simulating suite '{}'", args.suite);
    let payload = simulator.simulate(&args.suite, threshold, &mut rng, as_of);

    let store = JsonFileStore::new(&config.data_dir);
    store.upsert_snapshot(&args.suite, &payload)?;
    store.append_run(&RunRecord::from_payload(
        &args.suite,
        &catalog.label(&args.suite),
        &payload,
        as_of,
    ))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        print_run_summary(&args.suite, &catalog.label(&args.suite), &payload);
        println!("\nPersisted to: {:?}", config.data_dir);
    }

    Ok(())
}

fn show_snapshot(config: &AppConfig, args: cli::SnapshotArgs) -> Result<()> {
    let store = JsonFileStore::new(&config.data_dir);

    let record = match store.get_snapshot(&args.suite)? {
        Some(record) => record,
        None => {
            info!("No snapshot for suite '{}', generating one", args.suite);
            let catalog = SuiteCatalog::builtin();
            let simulator = SuiteSimulator::new(&catalog);
            let mut rng = StdRng::from_entropy();
            let as_of = Utc::now();
            let payload = simulator.simulate(&args.suite, config.default_threshold, &mut rng, as_of);

            store.upsert_snapshot(&args.suite, &payload)?;
            store.append_run(&RunRecord::from_payload(
                &args.suite,
                &catalog.label(&args.suite),
                &payload,
                as_of,
            ))?;

            store
                .get_snapshot(&args.suite)?
                .expect("snapshot just written")
        }
    };

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

fn score_text(args: cli::ScoreArgs) -> Result<()> {
    let result = scoring::score_prompt(&args.prompt);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Score: {:.3}", result.score);
    println!("  Length:        {:.2}", result.length_score);
    println!("  Structure:     {:.2}", result.structure_score);
    println!("  Clarity:       {:.2}", result.clarity_score);
    println!("  Actionability: {:.2}", result.actionability_score);
    println!("Feedback: {}", result.feedback);

    Ok(())
}

fn list_runs(config: &AppConfig, args: cli::RunsArgs) -> Result<()> {
    let store = JsonFileStore::new(&config.data_dir);
    let runs = store.list_runs()?;

    if runs.is_empty() {
        println!("No runs recorded in {:?}", config.data_dir);
        return Ok(());
    }

    println!("Recent runs (showing up to {}):", args.limit);
    for record in runs.iter().take(args.limit) {
        println!(
            "  {} [{}] {} - {}/{} succeeded, {} failed",
            record.requested_at.format("%Y-%m-%d %H:%M:%S"),
            record.suite,
            record.suite_label,
            record.success,
            record.benchmark_count,
            record.failed,
        );
    }

    Ok(())
}

fn list_suites() {
    let catalog = SuiteCatalog::builtin();
    println!("Available suites:");
    for id in catalog.suite_ids() {
        println!(
            "  {:8} {} ({} benchmarks)",
            id,
            catalog.label(id),
            catalog.templates_for(id).len()
        );
    }
    println!(
        "  {:8} {} ({} benchmarks)",
        "all",
        catalog.label("all"),
        catalog.templates_for("all").len()
    );
}

fn print_run_summary(suite: &str, label: &str, payload: &RunPayload) {
    println!("\n{}", "=".repeat(60));
    println!("SIMULATION COMPLETE: {} ({})", label, suite);
    println!("{}", "=".repeat(60));
    println!("\nSummary:");
    println!("  Total benchmarks: {}", payload.summary.total);
    println!("  Succeeded: {}", payload.summary.success);
    println!("  Failed: {}", payload.summary.failed);
    if let Some(threshold) = payload.threshold {
        println!("  Threshold (display only): {:.2}", threshold);
    }

    println!("\nBenchmarks:");
    for result in &payload.benchmarks {
        println!(
            "  [{}] {} - rate {:.3}, latency {:.3}s, {} tokens, ${:.5}",
            match result.status {
                sim::BenchmarkStatus::Success => "ok  ",
                sim::BenchmarkStatus::Failed => "FAIL",
            },
            result.name,
            result.success_rate,
            result.latency_seconds,
            result.tokens_used,
            result.cost_usd,
        );
    }

    if !payload.failure_insights.is_empty() {
        println!("\nFailure insights:");
        for insight in &payload.failure_insights {
            println!(
                "  {} - failure rate {:.3}: {}",
                insight.benchmark_name, insight.failure_rate, insight.top_issues[0]
            );
        }
    }
}

fn generate_sample_config(args: cli::InitArgs) -> Result<()> {
    let config = AppConfig::sample();

    config.save(&args.output)?;
    println!("Generated sample config at: {:?}", args.output);

    Ok(())
}

async fn start_ui_server(config: &AppConfig, args: cli::UiArgs) -> Result<()> {
    let port = args.port.unwrap_or(config.port);

    info!("Starting web API server on port {}", port);
    info!("Data directory: {:?}", config.data_dir);

    println!("\nBENCH-SIM API listening on http://localhost:{}", port);
    println!("  GET  /api/health");
    println!("  GET  /api/suites");
    println!("  GET  /api/benchmarks/:suite");
    println!("  POST /api/benchmarks/:suite/run");
    println!("  POST /api/score");
    println!("  GET  /api/runs");
    println!("\nPress Ctrl+C to stop the server\n");

    web::start_server(port, config.data_dir.clone(), config.default_threshold).await?;

    Ok(())
}
