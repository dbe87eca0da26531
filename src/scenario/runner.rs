// src/scenario/runner.rs

//! Runs a validated scenario end to end.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::{ScenarioFile, WorkerSpec};
use crate::errors::Result;
use crate::outcome::OutcomeRecord;
use crate::union::WorkerUnion;

use super::behaviour::perform;

/// What a scenario run produced.
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub union: String,
    pub total: usize,
    pub finished: bool,
    pub results: Vec<OutcomeRecord>,
}

impl ScenarioReport {
    pub fn failures(&self) -> usize {
        self.results.iter().filter(|r| !r.is_success()).count()
    }
}

/// Creates a union from a scenario, starts its workers, shuts it down and
/// waits for it to drain.
#[derive(Debug)]
pub struct ScenarioRunner {
    union: Arc<WorkerUnion>,
    workers: Vec<WorkerSpec>,
}

impl ScenarioRunner {
    pub fn new(scenario: &ScenarioFile) -> Self {
        Self {
            union: Arc::new(WorkerUnion::new(scenario.union_name())),
            workers: scenario.workers().to_vec(),
        }
    }

    /// The union this runner drives, e.g. for an external shutdown trigger.
    pub fn union(&self) -> Arc<WorkerUnion> {
        Arc::clone(&self.union)
    }

    /// Run the scenario.
    ///
    /// Shutdown is requested `shutdown_after` the last worker started, or as
    /// soon as `interrupt` resolves, whichever comes first.
    pub async fn run<I>(self, shutdown_after: Duration, interrupt: I) -> Result<ScenarioReport>
    where
        I: Future<Output = ()>,
    {
        let union = self.union;

        for spec in self.workers {
            let behaviour = spec.behaviour;
            let worker = union.new_worker(move |signal| perform(behaviour, signal))?;
            info!(
                union = %union.name(),
                worker = %worker.name(),
                label = spec.label.as_deref().unwrap_or("-"),
                "starting scenario worker"
            );
            worker.start()?;
        }

        tokio::select! {
            _ = tokio::time::sleep(shutdown_after) => {
                info!(union = %union.name(), ?shutdown_after, "shutdown delay elapsed");
            }
            _ = interrupt => {
                info!(union = %union.name(), "interrupted; shutting down early");
            }
        }

        union.shutdown();
        union.await_termination().await;

        let report = ScenarioReport {
            union: union.name().to_string(),
            total: union.total_size(),
            finished: union.is_finished(),
            results: union.results(),
        };

        info!(
            union = %report.union,
            total = report.total,
            failures = report.failures(),
            "scenario finished"
        );

        Ok(report)
    }
}
