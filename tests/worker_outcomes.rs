// tests/worker_outcomes.rs

mod common;
use crate::common::{idle, init_tracing, records_for, with_timeout, Gate};

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use worker_union::{CancelSignal, WorkerFailure, WorkerState, WorkerUnion, WorkerUnionError};

type TestResult = Result<(), Box<dyn Error>>;

#[derive(Debug, thiserror::Error)]
#[error("disk on fire")]
struct DiskOnFire;

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_normal_return_records_one_success() -> TestResult {
    init_tracing();

    let union = WorkerUnion::new("ok");
    let worker = union.new_worker(idle)?;
    worker.start()?;
    with_timeout(worker.join()).await;

    let results = union.results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].worker_name(), "ok-worker-0");
    assert!(results[0].is_success());
    assert!(results[0].failure().is_none());
    assert_eq!(worker.state(), WorkerState::Terminated);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_returned_error_is_captured_as_failure() -> TestResult {
    init_tracing();

    let union = WorkerUnion::new("err");
    let worker = union.new_worker(|_signal| async {
        Err::<(), _>(anyhow::Error::new(DiskOnFire))
    })?;
    worker.start()?;
    with_timeout(worker.join()).await;

    let results = union.results();
    let records = records_for(&results, "err-worker-0");
    assert_eq!(records.len(), 1);

    let failure = records[0].failure().expect("failure record");
    let err = failure.error().expect("error failure");
    assert!(err.downcast_ref::<DiskOnFire>().is_some());
    assert_eq!(failure.to_string(), "disk on fire");
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_panic_is_captured_as_failure() -> TestResult {
    init_tracing();

    let union = WorkerUnion::new("panic");
    let worker = union.new_worker(|_signal| async {
        if true {
            panic!("worker exploded");
        }
        Ok::<(), anyhow::Error>(())
    })?;
    worker.start()?;
    with_timeout(worker.join()).await;

    let results = union.results();
    assert_eq!(results.len(), 1);
    match results[0].failure() {
        Some(WorkerFailure::Panicked(message)) => assert_eq!(message, "worker exploded"),
        other => panic!("expected Panicked failure, got {:?}", other),
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_panic_while_building_future_is_captured() -> TestResult {
    init_tracing();

    let union = WorkerUnion::new("eager");
    let worker = union.new_worker(|_signal: CancelSignal| -> std::future::Ready<anyhow::Result<()>> {
        panic!("panicked before returning a future")
    })?;
    worker.start()?;
    with_timeout(worker.join()).await;

    let results = union.results();
    assert_eq!(results.len(), 1);
    assert!(results[0].failure().is_some_and(WorkerFailure::is_panic));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_each_worker_records_exactly_once() -> TestResult {
    init_tracing();

    let union = WorkerUnion::new("many");
    let runs = Arc::new(AtomicUsize::new(0));
    let mut workers = Vec::new();

    for i in 0..50 {
        let runs = Arc::clone(&runs);
        let worker = union.new_worker(move |_signal| async move {
            runs.fetch_add(1, Ordering::SeqCst);
            tokio::task::yield_now().await;
            if i % 3 == 0 {
                Err(anyhow!("worker {i} failed"))
            } else {
                Ok(())
            }
        })?;
        worker.start()?;
        workers.push(worker);
    }

    for worker in &workers {
        with_timeout(worker.join()).await;
    }

    let results = union.results();
    assert_eq!(runs.load(Ordering::SeqCst), 50);
    assert_eq!(results.len(), 50);
    for (i, worker) in workers.iter().enumerate() {
        let records = records_for(&results, worker.name());
        assert_eq!(records.len(), 1, "worker {} has {} records", worker.name(), records.len());
        assert_eq!(records[0].is_success(), i % 3 != 0);
    }
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_results_are_a_snapshot() -> TestResult {
    init_tracing();

    let union = WorkerUnion::new("snap");
    let gate = Gate::new();

    let first = union.new_worker(idle)?;
    first.start()?;
    with_timeout(first.join()).await;

    let snapshot = union.results();

    let g = gate.clone();
    let second = union.new_worker(move |_signal| async move {
        g.wait().await;
        Ok::<(), anyhow::Error>(())
    })?;
    second.start()?;
    gate.open();
    with_timeout(second.join()).await;

    assert_eq!(snapshot.len(), 1);
    assert_eq!(union.results().len(), 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_starting_twice_is_rejected() -> TestResult {
    init_tracing();

    let union = WorkerUnion::new("twice");
    let worker = union.new_worker(idle)?;
    worker.start()?;

    match worker.start() {
        Err(WorkerUnionError::AlreadyStarted(name)) => assert_eq!(name, "twice-worker-0"),
        other => panic!("expected AlreadyStarted, got {:?}", other),
    }

    with_timeout(worker.join()).await;
    assert_eq!(union.results().len(), 1);
    Ok(())
}

#[test]
fn test_start_outside_runtime_fails_without_consuming_the_worker() {
    init_tracing();

    let union = WorkerUnion::new("bare");
    let worker = union.new_worker(idle).unwrap();

    match worker.start() {
        Err(WorkerUnionError::NoRuntime(name)) => assert_eq!(name, "bare-worker-0"),
        other => panic!("expected NoRuntime, got {:?}", other),
    }
    assert_eq!(worker.state(), WorkerState::Created);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    rt.block_on(async {
        worker.start().unwrap();
        with_timeout(worker.join()).await;
    });

    assert_eq!(union.results().len(), 1);
    assert!(union.results()[0].is_success());
}

#[test]
fn test_task_dropped_by_runtime_is_recorded_as_abandoned() {
    init_tracing();

    let union = WorkerUnion::new("dropped");
    let worker = union
        .new_worker(|_signal| std::future::pending::<anyhow::Result<()>>())
        .unwrap();

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    {
        let _enter = rt.enter();
        worker.start().unwrap();
    }
    assert!(worker.is_alive());

    // Shutting the runtime down drops the never-polled task.
    drop(rt);

    assert_eq!(worker.state(), WorkerState::Terminated);
    let results = union.results();
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0].failure(), Some(WorkerFailure::Abandoned)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_current_signal_is_visible_inside_the_unit() -> TestResult {
    init_tracing();

    assert!(CancelSignal::current().is_none());

    let union = WorkerUnion::new("current");
    let worker = union.new_worker(|_signal| async {
        let own = CancelSignal::current().ok_or_else(|| anyhow!("no current signal"))?;
        own.cancelled().await;
        Ok::<(), anyhow::Error>(())
    })?;
    worker.start()?;

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    assert!(worker.is_alive());

    worker.interrupt();
    with_timeout(worker.join()).await;

    assert!(union.results()[0].is_success());
    Ok(())
}

#[tokio::test]
async fn test_join_on_unstarted_worker_returns_immediately() -> TestResult {
    init_tracing();

    let union = WorkerUnion::new("idle");
    let worker = union.new_worker(idle)?;
    with_timeout(worker.join()).await;
    assert_eq!(worker.state(), WorkerState::Created);
    Ok(())
}
