// src/config/model.rs

use serde::Deserialize;
use std::time::Duration;

use crate::types::WorkerBehaviour;

/// Scenario file as read from TOML, before validation.
///
/// ```toml
/// [union]
/// name = "U"
/// shutdown_after_ms = 50
///
/// [[worker]]
/// label = "sleeper"
/// behaviour = "sleep"
/// duration_ms = 100
///
/// [[worker]]
/// behaviour = "fail"
/// message = "boom"
/// ```
///
/// Workers are created in file order.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScenarioFile {
    pub union: UnionSection,

    #[serde(default)]
    pub worker: Vec<RawWorkerSpec>,
}

/// `[union]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct UnionSection {
    /// Union name, used as the prefix of every worker name.
    pub name: String,

    /// Delay between starting the last worker and requesting shutdown.
    #[serde(default)]
    pub shutdown_after_ms: u64,
}

/// One `[[worker]]` entry, unvalidated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawWorkerSpec {
    /// Free-form label shown in logs and dry-run output.
    #[serde(default)]
    pub label: Option<String>,

    /// `"sleep"`, `"fail"`, `"panic"`, `"wait_for_shutdown"` or
    /// `"ignore_shutdown"`.
    pub behaviour: String,

    #[serde(default)]
    pub duration_ms: Option<u64>,

    #[serde(default)]
    pub message: Option<String>,
}

/// A validated worker entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkerSpec {
    pub label: Option<String>,
    pub behaviour: WorkerBehaviour,
}

/// A validated scenario. Build it with `ScenarioFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ScenarioFile {
    union: UnionSection,
    workers: Vec<WorkerSpec>,
}

impl ScenarioFile {
    pub(crate) fn new_unchecked(union: UnionSection, workers: Vec<WorkerSpec>) -> Self {
        Self { union, workers }
    }

    pub fn union_name(&self) -> &str {
        &self.union.name
    }

    pub fn shutdown_after(&self) -> Duration {
        Duration::from_millis(self.union.shutdown_after_ms)
    }

    pub fn workers(&self) -> &[WorkerSpec] {
        &self.workers
    }
}
