#![allow(dead_code)]

pub use worker_union_test_utils::builders;
pub use worker_union_test_utils::gate::Gate;
pub use worker_union_test_utils::{init_tracing, with_timeout};

use worker_union::{CancelSignal, OutcomeRecord};

/// Unit of work that returns successfully straight away.
pub async fn idle(_signal: CancelSignal) -> anyhow::Result<()> {
    Ok(())
}

/// Records in `results` produced by the worker called `name`.
pub fn records_for<'a>(results: &'a [OutcomeRecord], name: &str) -> Vec<&'a OutcomeRecord> {
    results.iter().filter(|r| r.worker_name() == name).collect()
}
