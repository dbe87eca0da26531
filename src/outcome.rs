// src/outcome.rs

//! Outcome records and the shared, append-only outcome log.
//!
//! Every worker contributes exactly one [`OutcomeRecord`] when it terminates.
//! Records land in an [`OutcomeLog`] shared by all members of a union, in
//! the order the workers actually finished.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;

/// Why a worker did not complete normally.
#[derive(Error, Debug, Clone)]
pub enum WorkerFailure {
    /// The unit of work returned an error.
    #[error("{0:#}")]
    Error(Arc<anyhow::Error>),

    /// The unit of work panicked.
    #[error("worker panicked: {0}")]
    Panicked(String),

    /// The worker's task was dropped by the runtime before the unit of work
    /// finished.
    #[error("worker task was dropped before completing")]
    Abandoned,
}

impl WorkerFailure {
    /// Build a `Panicked` failure from a caught panic payload.
    pub(crate) fn from_panic(payload: Box<dyn Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        WorkerFailure::Panicked(message)
    }

    /// The error returned by the unit of work, if that is how it failed.
    pub fn error(&self) -> Option<&anyhow::Error> {
        match self {
            WorkerFailure::Error(err) => Some(&**err),
            _ => None,
        }
    }

    pub fn is_panic(&self) -> bool {
        matches!(self, WorkerFailure::Panicked(_))
    }
}

impl From<anyhow::Error> for WorkerFailure {
    fn from(err: anyhow::Error) -> Self {
        WorkerFailure::Error(Arc::new(err))
    }
}

/// How one worker finished.
///
/// Immutable once constructed; `failure` is present iff the worker ended
/// through an unhandled error or panic.
#[derive(Debug, Clone)]
pub struct OutcomeRecord {
    worker_name: String,
    failure: Option<WorkerFailure>,
}

impl OutcomeRecord {
    pub fn success(worker_name: impl Into<String>) -> Self {
        Self {
            worker_name: worker_name.into(),
            failure: None,
        }
    }

    pub fn failed(worker_name: impl Into<String>, failure: WorkerFailure) -> Self {
        Self {
            worker_name: worker_name.into(),
            failure: Some(failure),
        }
    }

    pub fn worker_name(&self) -> &str {
        &self.worker_name
    }

    pub fn failure(&self) -> Option<&WorkerFailure> {
        self.failure.as_ref()
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

impl fmt::Display for OutcomeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            None => write!(f, "{}: ok", self.worker_name),
            Some(failure) => write!(f, "{}: failed: {failure}", self.worker_name),
        }
    }
}

/// Append-only log of outcome records shared by a union and its workers.
///
/// Cloning the log clones the handle, not the records.
#[derive(Debug, Clone, Default)]
pub struct OutcomeLog {
    records: Arc<Mutex<Vec<OutcomeRecord>>>,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, record: OutcomeRecord) {
        // No critical section on this mutex can panic, so a poisoned lock
        // still guards a consistent vector.
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Copy of the records appended so far, in termination order.
    pub fn snapshot(&self) -> Vec<OutcomeRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
