#![allow(dead_code)]

use worker_union::config::{RawScenarioFile, RawWorkerSpec, ScenarioFile, UnionSection};

/// Builder for `ScenarioFile` to simplify test setup.
pub struct ScenarioBuilder {
    scenario: RawScenarioFile,
}

impl ScenarioBuilder {
    pub fn new(union: &str) -> Self {
        Self {
            scenario: RawScenarioFile {
                union: UnionSection {
                    name: union.to_string(),
                    shutdown_after_ms: 0,
                },
                worker: Vec::new(),
            },
        }
    }

    pub fn shutdown_after_ms(mut self, ms: u64) -> Self {
        self.scenario.union.shutdown_after_ms = ms;
        self
    }

    pub fn with_worker(mut self, worker: RawWorkerSpec) -> Self {
        self.scenario.worker.push(worker);
        self
    }

    pub fn build_raw(self) -> RawScenarioFile {
        self.scenario
    }

    pub fn build(self) -> ScenarioFile {
        ScenarioFile::try_from(self.scenario).expect("Failed to build valid scenario from builder")
    }
}

/// Builder for `RawWorkerSpec`.
pub struct WorkerSpecBuilder {
    spec: RawWorkerSpec,
}

impl WorkerSpecBuilder {
    pub fn new(behaviour: &str) -> Self {
        Self {
            spec: RawWorkerSpec {
                label: None,
                behaviour: behaviour.to_string(),
                duration_ms: None,
                message: None,
            },
        }
    }

    pub fn sleep(ms: u64) -> Self {
        Self::new("sleep").duration_ms(ms)
    }

    pub fn fail(message: &str) -> Self {
        Self::new("fail").message(message)
    }

    pub fn wait_for_shutdown() -> Self {
        Self::new("wait_for_shutdown")
    }

    pub fn label(mut self, label: &str) -> Self {
        self.spec.label = Some(label.to_string());
        self
    }

    pub fn duration_ms(mut self, ms: u64) -> Self {
        self.spec.duration_ms = Some(ms);
        self
    }

    pub fn message(mut self, message: &str) -> Self {
        self.spec.message = Some(message.to_string());
        self
    }

    pub fn build(self) -> RawWorkerSpec {
        self.spec
    }
}
