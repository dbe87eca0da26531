// src/config/validate.rs

use std::collections::HashSet;
use std::time::Duration;

use crate::config::model::{RawScenarioFile, RawWorkerSpec, ScenarioFile, WorkerSpec};
use crate::errors::{Result, WorkerUnionError};
use crate::types::{BehaviourKind, WorkerBehaviour};

const DEFAULT_FAIL_MESSAGE: &str = "worker failed";
const DEFAULT_PANIC_MESSAGE: &str = "worker panicked";

impl TryFrom<RawScenarioFile> for ScenarioFile {
    type Error = WorkerUnionError;

    fn try_from(raw: RawScenarioFile) -> std::result::Result<Self, Self::Error> {
        validate_union_name(&raw.union.name)?;
        validate_labels(&raw.worker)?;

        let workers = raw
            .worker
            .iter()
            .enumerate()
            .map(|(index, spec)| validate_worker(index, spec))
            .collect::<Result<Vec<_>>>()?;

        Ok(ScenarioFile::new_unchecked(raw.union, workers))
    }
}

fn validate_union_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(WorkerUnionError::ConfigError(
            "[union].name must not be empty".to_string(),
        ));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(WorkerUnionError::ConfigError(format!(
            "[union].name must not contain whitespace (got '{name}')"
        )));
    }
    Ok(())
}

fn validate_labels(workers: &[RawWorkerSpec]) -> Result<()> {
    let mut seen = HashSet::new();
    for label in workers.iter().filter_map(|w| w.label.as_deref()) {
        if !seen.insert(label) {
            return Err(WorkerUnionError::ConfigError(format!(
                "duplicate worker label '{label}'"
            )));
        }
    }
    Ok(())
}

fn validate_worker(index: usize, spec: &RawWorkerSpec) -> Result<WorkerSpec> {
    let describe = || match spec.label.as_deref() {
        Some(label) => format!("worker '{label}'"),
        None => format!("worker #{index}"),
    };

    let kind: BehaviourKind = spec
        .behaviour
        .parse()
        .map_err(|e| WorkerUnionError::ConfigError(format!("{}: {e}", describe())))?;

    if kind.takes_duration() && spec.duration_ms.is_none() {
        return Err(WorkerUnionError::ConfigError(format!(
            "{}: behaviour '{}' requires `duration_ms`",
            describe(),
            spec.behaviour
        )));
    }
    if !kind.takes_duration() && spec.duration_ms.is_some() {
        return Err(WorkerUnionError::ConfigError(format!(
            "{}: `duration_ms` is not used by behaviour '{}'",
            describe(),
            spec.behaviour
        )));
    }
    if !kind.takes_message() && spec.message.is_some() {
        return Err(WorkerUnionError::ConfigError(format!(
            "{}: `message` is not used by behaviour '{}'",
            describe(),
            spec.behaviour
        )));
    }

    let duration = Duration::from_millis(spec.duration_ms.unwrap_or_default());
    let message = |default: &str| spec.message.clone().unwrap_or_else(|| default.to_string());

    let behaviour = match kind {
        BehaviourKind::Sleep => WorkerBehaviour::Sleep { duration },
        BehaviourKind::Fail => WorkerBehaviour::Fail {
            message: message(DEFAULT_FAIL_MESSAGE),
        },
        BehaviourKind::Panic => WorkerBehaviour::Panic {
            message: message(DEFAULT_PANIC_MESSAGE),
        },
        BehaviourKind::WaitForShutdown => WorkerBehaviour::WaitForShutdown,
        BehaviourKind::IgnoreShutdown => WorkerBehaviour::IgnoreShutdown { duration },
    };

    Ok(WorkerSpec {
        label: spec.label.clone(),
        behaviour,
    })
}
