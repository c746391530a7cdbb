use std::sync::{Arc, Mutex};
use std::time::Duration;

use yieldpoint::event_loop::{EventLoop, MemoryTrace, ScheduleError};
use yieldpoint::sinks::SinkRegistry;

#[test]
fn deferred_tasks_run_in_fifo_order() {
    let event_loop = EventLoop::new(SinkRegistry::new());
    let handle = event_loop.handle();

    let order: Arc<Mutex<Vec<u32>>> = Arc::new(Mutex::new(Vec::new()));
    for n in 0..5u32 {
        let order = order.clone();
        handle
            .defer(format!("task-{n}"), move || {
                order.lock().unwrap().push(n);
            })
            .expect("defer");
    }

    assert_eq!(handle.pending(), 5);
    let ran = event_loop.run_until_idle();
    assert_eq!(ran, 5);
    assert_eq!(*order.lock().unwrap(), vec![0, 1, 2, 3, 4]);
    assert_eq!(handle.pending(), 0);
}

#[test]
fn sequence_numbers_are_monotonic_across_handles() {
    let event_loop = EventLoop::new(SinkRegistry::new());
    let a = event_loop.handle();
    let b = event_loop.handle();

    let s1 = a.defer("first", || {}).expect("defer");
    let s2 = b.defer("second", || {}).expect("defer");
    let s3 = a.defer("third", || {}).expect("defer");
    assert!(s1 < s2 && s2 < s3);
}

#[test]
fn turn_runs_exactly_one_task_then_repaints() {
    let registry = SinkRegistry::new();
    registry.register("status");

    let trace = MemoryTrace::new();
    let event_loop = EventLoop::with_trace_sink(registry, trace.clone());
    let handle = event_loop.handle();

    handle.defer("one", || {}).expect("defer");
    handle.defer("two", || {}).expect("defer");

    assert!(event_loop.turn());
    let kinds: Vec<&str> = trace.snapshot().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec!["scheduled", "scheduled", "started", "completed", "repaint"]);
    assert_eq!(handle.pending(), 1);

    assert!(event_loop.turn());
    assert!(!event_loop.turn(), "queue should be drained");
}

#[test]
fn run_until_idle_repaints_even_when_queue_is_empty() {
    let trace = MemoryTrace::new();
    let event_loop = EventLoop::with_trace_sink(SinkRegistry::new(), trace.clone());

    assert_eq!(event_loop.run_until_idle(), 0);
    let kinds: Vec<&str> = trace.snapshot().iter().map(|e| e.kind()).collect();
    assert_eq!(kinds, vec!["repaint"]);
}

#[test]
fn defer_after_loop_dropped_reports_closed() {
    let event_loop = EventLoop::new(SinkRegistry::new());
    let handle = event_loop.handle();
    drop(event_loop);

    let err = handle.defer("late", || {}).unwrap_err();
    assert!(matches!(err, ScheduleError::LoopClosed));
}

#[tokio::test]
async fn listener_drains_queue_in_background() {
    let registry = SinkRegistry::new();
    let sink = registry.register("status");

    let trace = MemoryTrace::new();
    let event_loop = EventLoop::with_trace_sink(registry.clone(), trace.clone());
    event_loop.listen();

    let handle = event_loop.handle();
    let registry_for_task = registry.clone();
    handle
        .defer("write", move || {
            registry_for_task.write_status("status", "painted");
        })
        .expect("defer");

    tokio::time::sleep(Duration::from_millis(20)).await;
    event_loop.stop_listener().await;

    assert_eq!(sink.text(), "painted");
    assert_eq!(trace.painted_texts("status"), vec!["painted"]);
}

#[tokio::test]
async fn multiple_listen_calls_are_idempotent() {
    let trace = MemoryTrace::new();
    let event_loop = EventLoop::with_trace_sink(SinkRegistry::new(), trace.clone());

    event_loop.listen();
    event_loop.listen();
    event_loop.listen();

    event_loop.handle().defer("once", || {}).expect("defer");

    tokio::time::sleep(Duration::from_millis(20)).await;
    event_loop.stop_listener().await;

    let started = trace
        .snapshot()
        .iter()
        .filter(|e| e.kind() == "started")
        .count();
    assert_eq!(started, 1, "only one listener should run tasks");
}

#[tokio::test]
async fn scheduled_trace_precedes_started_under_listener() {
    let trace = MemoryTrace::new();
    let event_loop = EventLoop::with_trace_sink(SinkRegistry::new(), trace.clone());
    event_loop.listen();

    // The drain races each enqueue; the scheduled record must still land
    // first because it is broadcast before the task enters the queue.
    let handle = event_loop.handle();
    for n in 0..20u32 {
        handle.defer(format!("quick-{n}"), || {}).expect("defer");
    }

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    while handle.pending() > 0 {
        assert!(tokio::time::Instant::now() < deadline, "queue never drained");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    event_loop.stop_listener().await;

    let events = trace.snapshot();
    for n in 0..20u32 {
        let label = format!("quick-{n}");
        let position = |kind: &str| {
            events
                .iter()
                .position(|e| e.kind() == kind && e.task().is_some_and(|t| t.label == label))
        };
        let scheduled = position("scheduled").expect("scheduled recorded");
        let started = position("started").expect("started recorded");
        assert!(
            scheduled < started,
            "{label}: scheduling must be traced before execution"
        );
    }
}

#[tokio::test]
async fn stopping_without_tasks_is_noop() {
    let event_loop = EventLoop::new(SinkRegistry::new());
    event_loop.listen();
    event_loop.stop_listener().await;
}
