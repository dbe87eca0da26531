// src/scenario/mod.rs

//! Scenario execution used by the `worker-union` binary.
//!
//! - [`behaviour`] turns a configured `WorkerBehaviour` into a unit of work.
//! - [`runner`] builds a union from a `ScenarioFile`, starts every worker,
//!   shuts the union down and collects the outcome log.

pub mod behaviour;
pub mod runner;

pub use behaviour::perform;
pub use runner::{ScenarioReport, ScenarioRunner};
