// src/worker/mod.rs

//! Workers: named, union-registered units of concurrent execution.
//!
//! - [`Worker`] is the handle shared between the owning union (membership,
//!   liveness, shutdown signalling) and the caller (start, join).
//! - [`runner`] executes the caller's unit of work and records its outcome.
//! - [`signal`] provides the cooperative [`CancelSignal`].
//!
//! A worker is created unstarted. Nothing runs until [`Worker::start`] is
//! called.

pub mod runner;
pub mod signal;

use std::fmt;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::BoxFuture;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tracing::debug;

use crate::errors::{Result, WorkerUnionError};
use crate::outcome::OutcomeLog;

pub use signal::CancelSignal;

/// The caller's logic, boxed so members with different closures can share
/// one membership list.
pub type UnitOfWork =
    Box<dyn FnOnce(CancelSignal) -> BoxFuture<'static, anyhow::Result<()>> + Send>;

/// Box a closure into a [`UnitOfWork`].
pub fn boxed_unit<F, Fut>(work: F) -> UnitOfWork
where
    F: FnOnce(CancelSignal) -> Fut + Send + 'static,
    Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    Box::new(move |signal| Box::pin(work(signal)))
}

/// Lifecycle of a worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    /// Registered with the union, not started yet.
    Created,
    /// Started; the unit of work has not finished.
    Running,
    /// Finished, and its outcome record is in the union's log.
    Terminated,
}

impl WorkerState {
    pub fn is_terminated(&self) -> bool {
        matches!(self, WorkerState::Terminated)
    }
}

pub(crate) struct WorkerCore {
    name: String,
    signal: CancelSignal,
    unit: Mutex<Option<UnitOfWork>>,
    state: watch::Sender<WorkerState>,
    log: OutcomeLog,
}

impl WorkerCore {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn signal(&self) -> &CancelSignal {
        &self.signal
    }

    pub(crate) fn log(&self) -> &OutcomeLog {
        &self.log
    }

    pub(crate) fn set_state(&self, state: WorkerState) {
        self.state.send_replace(state);
    }
}

/// Handle to one member of a union.
///
/// Cheap to clone; all clones refer to the same worker.
#[derive(Clone)]
pub struct Worker {
    core: Arc<WorkerCore>,
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("name", &self.core.name)
            .field("state", &self.state())
            .field("interrupted", &self.is_interrupted())
            .finish_non_exhaustive()
    }
}

impl Worker {
    pub(crate) fn new(name: String, unit: UnitOfWork, log: OutcomeLog) -> Self {
        let (state, _) = watch::channel(WorkerState::Created);
        Self {
            core: Arc::new(WorkerCore {
                name,
                signal: CancelSignal::new(),
                unit: Mutex::new(Some(unit)),
                state,
                log,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.core.name
    }

    pub fn state(&self) -> WorkerState {
        *self.core.state.borrow()
    }

    /// True while the unit of work is executing.
    ///
    /// A worker that was never started is not alive.
    pub fn is_alive(&self) -> bool {
        self.state() == WorkerState::Running
    }

    /// Raise this worker's cancellation signal.
    ///
    /// Harmless on a worker that already terminated. A worker interrupted
    /// before it starts sees the signal already raised once it runs.
    pub fn interrupt(&self) {
        self.core.signal.cancel();
    }

    pub fn is_interrupted(&self) -> bool {
        self.core.signal.is_cancelled()
    }

    /// Start executing the unit of work on the current Tokio runtime.
    ///
    /// Fails if the worker was already started, or if called outside a
    /// runtime.
    ///
    /// Errors and panics from the unit of work end up in the union's outcome
    /// log. A panic still passes through the process-wide panic hook first,
    /// so the default hook prints its message to stderr.
    pub fn start(&self) -> Result<()> {
        let handle = Handle::try_current()
            .map_err(|_| WorkerUnionError::NoRuntime(self.core.name.clone()))?;

        let unit = self
            .core
            .unit
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| WorkerUnionError::AlreadyStarted(self.core.name.clone()))?;

        // Mark running before spawning so `is_alive` holds as soon as
        // `start` returns.
        self.core.set_state(WorkerState::Running);
        debug!(worker = %self.core.name, "starting worker");

        handle.spawn(runner::run_worker(Arc::clone(&self.core), unit));
        Ok(())
    }

    /// Wait until this worker has terminated.
    ///
    /// Returns immediately for a worker that was never started.
    pub async fn join(&self) {
        let mut rx = self.core.state.subscribe();
        if *rx.borrow_and_update() == WorkerState::Created {
            return;
        }
        // The sender lives in `self.core`, so the channel cannot close while
        // we wait.
        let _ = rx.wait_for(WorkerState::is_terminated).await;
    }
}
