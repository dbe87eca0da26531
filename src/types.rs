use std::str::FromStr;
use std::time::Duration;

/// The kinds of worker a scenario file can describe.
///
/// Parsed from the `behaviour` key of a `[[worker]]` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BehaviourKind {
    Sleep,
    Fail,
    Panic,
    WaitForShutdown,
    IgnoreShutdown,
}

impl BehaviourKind {
    /// Whether `duration_ms` is required (and allowed) for this kind.
    pub fn takes_duration(&self) -> bool {
        matches!(self, BehaviourKind::Sleep | BehaviourKind::IgnoreShutdown)
    }

    /// Whether `message` is allowed for this kind.
    pub fn takes_message(&self) -> bool {
        matches!(self, BehaviourKind::Fail | BehaviourKind::Panic)
    }
}

impl FromStr for BehaviourKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "sleep" => Ok(BehaviourKind::Sleep),
            "fail" => Ok(BehaviourKind::Fail),
            "panic" => Ok(BehaviourKind::Panic),
            "wait_for_shutdown" => Ok(BehaviourKind::WaitForShutdown),
            "ignore_shutdown" => Ok(BehaviourKind::IgnoreShutdown),
            other => Err(format!(
                "invalid behaviour: {other} (expected \"sleep\", \"fail\", \"panic\", \
                 \"wait_for_shutdown\" or \"ignore_shutdown\")"
            )),
        }
    }
}

/// What a scenario worker does once started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerBehaviour {
    /// Sleep for `duration`, returning early (successfully) when signalled.
    Sleep { duration: Duration },
    /// Return an error immediately.
    Fail { message: String },
    /// Panic immediately.
    Panic { message: String },
    /// Block until signalled, then return successfully.
    WaitForShutdown,
    /// Sleep for the full `duration` whether signalled or not.
    IgnoreShutdown { duration: Duration },
}

impl WorkerBehaviour {
    pub fn kind(&self) -> BehaviourKind {
        match self {
            WorkerBehaviour::Sleep { .. } => BehaviourKind::Sleep,
            WorkerBehaviour::Fail { .. } => BehaviourKind::Fail,
            WorkerBehaviour::Panic { .. } => BehaviourKind::Panic,
            WorkerBehaviour::WaitForShutdown => BehaviourKind::WaitForShutdown,
            WorkerBehaviour::IgnoreShutdown { .. } => BehaviourKind::IgnoreShutdown,
        }
    }
}
