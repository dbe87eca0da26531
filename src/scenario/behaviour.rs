// src/scenario/behaviour.rs

//! Units of work for the behaviours a scenario file can name.

use anyhow::anyhow;
use tracing::debug;

use crate::types::WorkerBehaviour;
use crate::worker::CancelSignal;

/// Carry out `behaviour` as a unit of work observing `signal`.
pub async fn perform(behaviour: WorkerBehaviour, signal: CancelSignal) -> anyhow::Result<()> {
    match behaviour {
        WorkerBehaviour::Sleep { duration } => {
            tokio::select! {
                _ = tokio::time::sleep(duration) => {}
                _ = signal.cancelled() => {
                    debug!(?duration, "sleep cut short by cancellation signal");
                }
            }
            Ok(())
        }
        WorkerBehaviour::Fail { message } => Err(anyhow!(message)),
        WorkerBehaviour::Panic { message } => panic!("{message}"),
        WorkerBehaviour::WaitForShutdown => {
            signal.cancelled().await;
            Ok(())
        }
        WorkerBehaviour::IgnoreShutdown { duration } => {
            tokio::time::sleep(duration).await;
            if signal.is_cancelled() {
                debug!(?duration, "finished despite cancellation signal");
            }
            Ok(())
        }
    }
}
