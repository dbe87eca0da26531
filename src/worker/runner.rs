// src/worker/runner.rs

//! Executes one unit of work and records how it ended.

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use tracing::{debug, info, warn};

use crate::outcome::{OutcomeRecord, WorkerFailure};

use super::{UnitOfWork, WorkerCore, WorkerState};

/// Appends the worker's outcome record and marks it terminated when dropped.
///
/// Doing both in `Drop` means every way out of [`run_worker`] (normal
/// return, caught panic, or the task being dropped by the runtime) produces
/// exactly one record, and the worker only stops being alive after that
/// record is in the log.
struct TerminationGuard {
    core: Arc<WorkerCore>,
    outcome: Option<OutcomeRecord>,
}

impl Drop for TerminationGuard {
    fn drop(&mut self) {
        let record = self.outcome.take().unwrap_or_else(|| {
            warn!(
                worker = %self.core.name(),
                "worker task dropped before its unit of work finished"
            );
            OutcomeRecord::failed(self.core.name(), WorkerFailure::Abandoned)
        });

        self.core.log().append(record);
        self.core.set_state(WorkerState::Terminated);
        debug!(worker = %self.core.name(), "worker terminated");
    }
}

/// Run `unit` to completion and record its outcome in the worker's log.
///
/// A returned error or a panic becomes a failure record; neither escapes
/// the returned future. The guard is created before the future is first
/// polled, so a task dropped without ever running is recorded too.
///
/// A caught panic is still reported to the process-wide panic hook, which by
/// default prints it to stderr before it is turned into a record. Install a
/// hook with [`std::panic::set_hook`] to silence that.
pub(crate) fn run_worker(
    core: Arc<WorkerCore>,
    unit: UnitOfWork,
) -> impl Future<Output = ()> + Send + 'static {
    let name = core.name().to_string();
    let signal = core.signal().clone();
    let mut guard = TerminationGuard {
        core,
        outcome: None,
    };

    async move {
        debug!(worker = %name, "worker running");

        // The unit is invoked inside the async block so a panic while
        // building its future is caught as well.
        let work = signal.clone().scope(async move { unit(signal).await });

        let record = match AssertUnwindSafe(work).catch_unwind().await {
            Ok(Ok(())) => {
                info!(worker = %name, "worker completed");
                OutcomeRecord::success(name)
            }
            Ok(Err(err)) => {
                warn!(worker = %name, error = %err, "worker failed");
                OutcomeRecord::failed(name, WorkerFailure::from(err))
            }
            Err(payload) => {
                let failure = WorkerFailure::from_panic(payload);
                warn!(worker = %name, error = %failure, "worker panicked");
                OutcomeRecord::failed(name, failure)
            }
        };

        guard.outcome = Some(record);
    }
}
