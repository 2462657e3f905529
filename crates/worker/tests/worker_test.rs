use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lrt_core::{LatencyMetric, NegativeLatencyPolicy, NoDelay, ProcessingDelay, RouterError, WorkerSpec};
use lrt_worker::{Worker, WorkerSettings};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn settings(window_size: usize, jitter: f64) -> WorkerSettings {
    WorkerSettings {
        window_size,
        jitter,
        negative_latency: NegativeLatencyPolicy::Accept,
    }
}

fn create_test_worker(id: &str, baseline: f64, window_size: usize, jitter: f64) -> Worker {
    Worker::new(
        WorkerSpec::new(id, baseline),
        settings(window_size, jitter),
        StdRng::seed_from_u64(42),
        Arc::new(NoDelay),
    )
    .unwrap()
}

/// 只记录调用次数的延迟实现
#[derive(Default)]
struct CountingDelay {
    calls: AtomicUsize,
}

#[async_trait]
impl ProcessingDelay for CountingDelay {
    async fn wait(&self, _latency: f64) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &str {
        "Counting"
    }
}

/// 每次处理都让出执行权，迫使并发请求在采样与写窗口之间交错
struct YieldingDelay;

#[async_trait]
impl ProcessingDelay for YieldingDelay {
    async fn wait(&self, _latency: f64) {
        tokio::task::yield_now().await;
    }

    fn name(&self) -> &str {
        "Yielding"
    }
}

#[tokio::test]
async fn test_new_worker_has_no_data() {
    let worker = create_test_worker("w1", 0.1, 10, 0.05);
    assert_eq!(worker.id(), "w1");
    assert_eq!(worker.baseline_latency(), 0.1);
    assert_eq!(worker.average_latency().await, LatencyMetric::NoData);
    assert_eq!(worker.history_len().await, 0);
    assert_eq!(worker.processed_count(), 0);
}

#[tokio::test]
async fn test_history_length_is_min_of_calls_and_window() {
    let window = 10;
    let worker = create_test_worker("w1", 0.1, window, 0.05);
    for n in 1..=25usize {
        worker.process().await;
        assert_eq!(worker.history_len().await, n.min(window));
    }
    assert_eq!(worker.processed_count(), 25);
    assert_eq!(worker.window_size(), window);
}

#[tokio::test]
async fn test_average_matches_window_contents() {
    let worker = create_test_worker("w1", 0.2, 4, 0.05);
    let mut returned = Vec::new();
    for _ in 0..7 {
        returned.push(worker.process().await);
    }

    let history = worker.history().await;
    // 窗口中保留的是最后4个返回值，顺序从旧到新
    assert_eq!(history, returned[3..].to_vec());

    let expected = history.iter().sum::<f64>() / history.len() as f64;
    match worker.average_latency().await {
        LatencyMetric::Average(avg) => assert!((avg - expected).abs() < 1e-12),
        LatencyMetric::NoData => panic!("expected average"),
    }
}

#[tokio::test]
async fn test_zero_jitter_saturated_window_reads_exact_baseline() {
    let worker = create_test_worker("w1", 0.1, 10, 0.0);
    for _ in 0..10 {
        assert_eq!(worker.process().await, 0.1);
    }
    assert_eq!(worker.history().await, vec![0.1; 10]);
    assert_eq!(worker.average_latency().await, LatencyMetric::Average(0.1));
}

#[tokio::test]
async fn test_delay_is_invoked_per_request() {
    let delay = Arc::new(CountingDelay::default());
    let worker = Worker::new(
        WorkerSpec::new("w1", 0.1),
        settings(10, 0.0),
        StdRng::seed_from_u64(1),
        delay.clone(),
    )
    .unwrap();

    worker.process().await;
    worker.process().await;
    assert_eq!(delay.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_processing_respects_window_bound() {
    let worker = Arc::new(
        Worker::new(
            WorkerSpec::new("w1", 0.1),
            settings(5, 0.05),
            StdRng::seed_from_u64(42),
            Arc::new(YieldingDelay),
        )
        .unwrap(),
    );
    let mut handles = Vec::new();
    for _ in 0..500 {
        let worker = Arc::clone(&worker);
        handles.push(tokio::spawn(async move {
            worker.process().await;
            assert!(worker.history_len().await <= 5);
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }
    assert_eq!(worker.history_len().await, 5);
    assert_eq!(worker.processed_count(), 500);
}

#[test]
fn test_invalid_worker_rejected() {
    let result = Worker::new(
        WorkerSpec::new("bad", -0.1),
        settings(10, 0.05),
        StdRng::seed_from_u64(1),
        Arc::new(NoDelay),
    );
    assert!(matches!(result, Err(RouterError::InvalidWorker { .. })));

    let result = Worker::new(
        WorkerSpec::new("w1", 0.1),
        settings(0, 0.05),
        StdRng::seed_from_u64(1),
        Arc::new(NoDelay),
    );
    assert!(matches!(result, Err(RouterError::Configuration(_))));
}
