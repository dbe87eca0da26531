// src/union/membership.rs

//! The state a union guards under a single lock: the name counter, the
//! member list and the shutdown flag.
//!
//! Admission has to check the flag and take a sequence number as one step,
//! and shutdown has to signal the members it sees before anyone can be
//! admitted after it, so the three live behind one mutex.

use tracing::debug;

use crate::errors::{Result, WorkerUnionError};
use crate::worker::Worker;

/// Name given to the `sequence`-th worker of the union `union_name`.
pub fn worker_name(union_name: &str, sequence: usize) -> String {
    format!("{union_name}-worker-{sequence}")
}

#[derive(Debug, Default)]
pub(crate) struct Membership {
    next_sequence: usize,
    members: Vec<Worker>,
    shutdown_requested: bool,
}

impl Membership {
    /// Admit a new member, unless shutdown was requested.
    ///
    /// `build` receives the assigned name. On refusal nothing changes and
    /// `build` is never called.
    pub(crate) fn admit(
        &mut self,
        union_name: &str,
        build: impl FnOnce(String) -> Worker,
    ) -> Result<Worker> {
        if self.shutdown_requested {
            return Err(WorkerUnionError::ShutDown(union_name.to_string()));
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let worker = build(worker_name(union_name, sequence));
        debug!(union = %union_name, worker = %worker.name(), sequence, "registered worker");

        self.members.push(worker.clone());
        Ok(worker)
    }

    /// Interrupt every member in creation order, then set the shutdown flag.
    ///
    /// Returns `true` the first time only.
    pub(crate) fn request_shutdown(&mut self) -> bool {
        for member in &self.members {
            member.interrupt();
        }

        let first = !self.shutdown_requested;
        self.shutdown_requested = true;
        first
    }

    pub(crate) fn is_shutdown(&self) -> bool {
        self.shutdown_requested
    }

    pub(crate) fn total(&self) -> usize {
        self.next_sequence
    }

    pub(crate) fn members(&self) -> Vec<Worker> {
        self.members.clone()
    }
}
