// src/union/mod.rs

//! The union manager.
//!
//! A [`WorkerUnion`] owns a named group of workers:
//! - creates them (unstarted) with unique `<name>-worker-<n>` names,
//! - tracks how many exist and how many are alive,
//! - shuts the group down by signalling every member,
//! - waits for the members to terminate,
//! - exposes the log of outcome records they produced.
//!
//! Creation and shutdown are serialized by the lock in [`membership`]; the
//! outcome log is a separate append-only structure written by the workers
//! themselves.

pub mod membership;

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::outcome::{OutcomeLog, OutcomeRecord};
use crate::worker::{self, CancelSignal, Worker};

use membership::Membership;

pub use membership::worker_name;

/// Coarse lifecycle of a union.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnionState {
    /// Accepting new workers.
    Active,
    /// Shutdown requested, some members still alive.
    Draining,
    /// Shutdown requested and no member alive.
    Quiesced,
}

/// A named group of workers with shared bookkeeping.
#[derive(Debug)]
pub struct WorkerUnion {
    name: String,
    membership: Mutex<Membership>,
    outcomes: OutcomeLog,
}

impl WorkerUnion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            membership: Mutex::new(Membership::default()),
            outcomes: OutcomeLog::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn membership(&self) -> MutexGuard<'_, Membership> {
        // Membership operations never panic while holding the lock.
        self.membership
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new, unstarted worker running `work`.
    ///
    /// The caller starts it with [`Worker::start`]. Fails with
    /// [`crate::errors::WorkerUnionError::ShutDown`] once
    /// [`shutdown`](Self::shutdown) has been called; in that case no name is
    /// consumed.
    pub fn new_worker<F, Fut>(&self, work: F) -> Result<Worker>
    where
        F: FnOnce(CancelSignal) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let unit = worker::boxed_unit(work);
        let log = self.outcomes.clone();

        self.membership()
            .admit(&self.name, move |name| Worker::new(name, unit, log))
    }

    /// Number of workers ever created by this union.
    pub fn total_size(&self) -> usize {
        self.membership().total()
    }

    /// Number of members currently running.
    ///
    /// A snapshot; members may terminate while it is being computed.
    pub fn active_size(&self) -> usize {
        self.members().iter().filter(|m| m.is_alive()).count()
    }

    pub fn is_shutdown(&self) -> bool {
        self.membership().is_shutdown()
    }

    /// Signal every member to stop and refuse new workers from now on.
    ///
    /// Members are signalled in creation order. Calling it again re-signals
    /// the same members and has no other effect.
    pub fn shutdown(&self) {
        let (first, members) = {
            let mut membership = self.membership();
            let first = membership.request_shutdown();
            (first, membership.total())
        };

        if first {
            info!(union = %self.name, members, "union shutdown requested");
        }
    }

    /// Wait until every member that exists now has terminated.
    ///
    /// Members are awaited in creation order; members that never started, or
    /// already finished, are skipped. If this is called from inside a worker
    /// and that worker's own signal is raised during the wait, the signal is
    /// logged and left raised, and the wait carries on. A signal that was
    /// already raised when the wait began is not reported again.
    pub async fn await_termination(&self) {
        let members = self.members();
        let own_signal = CancelSignal::current();

        // A signal raised before the wait began is not news; only one that
        // arrives mid-wait is reported.
        let mut own_signal_seen = own_signal.as_ref().is_some_and(CancelSignal::is_cancelled);
        if own_signal_seen {
            debug!(
                union = %self.name,
                "own cancellation signal already raised; awaiting termination regardless"
            );
        }

        for member in &members {
            if !member.is_alive() {
                continue;
            }

            let terminated = match own_signal.as_ref() {
                Some(own) if !own_signal_seen => tokio::select! {
                    _ = member.join() => true,
                    _ = own.cancelled() => false,
                },
                _ => {
                    member.join().await;
                    true
                }
            };

            if !terminated {
                own_signal_seen = true;
                warn!(
                    union = %self.name,
                    waiting_on = %member.name(),
                    "cancellation signal received while awaiting termination; still waiting"
                );
                member.join().await;
            }
        }
    }

    /// True once shutdown was requested and no member is alive.
    ///
    /// A member stops being alive only after its outcome record is in the
    /// log, so when this returns `true` every started member is in
    /// [`results`](Self::results).
    pub fn is_finished(&self) -> bool {
        self.is_shutdown() && self.active_size() == 0
    }

    pub fn state(&self) -> UnionState {
        if !self.is_shutdown() {
            UnionState::Active
        } else if self.active_size() > 0 {
            UnionState::Draining
        } else {
            UnionState::Quiesced
        }
    }

    /// Copy of the outcome log, in termination order.
    pub fn results(&self) -> Vec<OutcomeRecord> {
        self.outcomes.snapshot()
    }

    /// Handles to every member, in creation order.
    pub fn members(&self) -> Vec<Worker> {
        self.membership().members()
    }
}
