// src/worker/signal.rs

//! Cooperative cancellation signal handed to every unit of work.

use std::future::Future;

use tokio_util::sync::CancellationToken;

tokio::task_local! {
    static CURRENT_SIGNAL: CancelSignal;
}

/// Advisory cancellation signal for one worker.
///
/// Raised by [`crate::WorkerUnion::shutdown`] or [`crate::Worker::interrupt`].
/// Once raised it stays raised. Whether the unit of work reacts to it is up
/// to the unit of work.
#[derive(Debug, Clone, Default)]
pub struct CancelSignal {
    token: CancellationToken,
}

impl CancelSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once the signal has been raised.
    pub async fn cancelled(&self) {
        self.token.cancelled().await
    }

    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }

    /// Signal of the worker whose unit of work is currently executing, if any.
    ///
    /// Lets code deep inside a unit of work (or a nested union's
    /// `await_termination`) observe its own worker's signal without having it
    /// passed down explicitly.
    pub fn current() -> Option<CancelSignal> {
        CURRENT_SIGNAL.try_with(|signal| signal.clone()).ok()
    }

    /// Run `fut` with this signal installed as the current one.
    pub(crate) fn scope<F: Future>(self, fut: F) -> impl Future<Output = F::Output> {
        CURRENT_SIGNAL.scope(self, fut)
    }
}
