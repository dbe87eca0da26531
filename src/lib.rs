// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod outcome;
pub mod scenario;
pub mod types;
pub mod union;
pub mod worker;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, warn};

use crate::cli::CliArgs;
use crate::config::{ScenarioFile, load_and_validate};
use crate::scenario::{ScenarioReport, ScenarioRunner};

pub use crate::errors::WorkerUnionError;
pub use crate::outcome::{OutcomeLog, OutcomeRecord, WorkerFailure};
pub use crate::union::{UnionState, WorkerUnion};
pub use crate::worker::{CancelSignal, Worker, WorkerState};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - scenario loading
/// - the scenario runner (union, workers, shutdown, termination)
/// - Ctrl-C handling (early shutdown)
/// - printing the outcome report
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let scenario = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&scenario);
        return Ok(());
    }

    let shutdown_after = args
        .shutdown_after_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| scenario.shutdown_after());

    let runner = ScenarioRunner::new(&scenario);
    let report = runner.run(shutdown_after, ctrl_c()).await?;

    print_report(&report);
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}

fn print_report(report: &ScenarioReport) {
    println!(
        "union {}: {} workers, {} failed, finished = {}",
        report.union,
        report.total,
        report.failures(),
        report.finished
    );
    for record in &report.results {
        println!("  {record}");
    }
}

/// Simple dry-run output: print the union and its workers.
fn print_dry_run(scenario: &ScenarioFile) {
    println!("worker-union dry-run");
    println!("  union.name = {}", scenario.union_name());
    println!("  union.shutdown_after = {:?}", scenario.shutdown_after());
    println!();

    println!("workers ({}):", scenario.workers().len());
    for (sequence, spec) in scenario.workers().iter().enumerate() {
        let name = union::worker_name(scenario.union_name(), sequence);
        match spec.label.as_deref() {
            Some(label) => println!("  - {name} ({label})"),
            None => println!("  - {name}"),
        }
        println!("      behaviour: {:?}", spec.behaviour);
    }

    debug!("dry-run complete (no workers started)");
}
