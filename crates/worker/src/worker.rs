use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lrt_core::{
    DispatcherConfig, LatencyMetric, NegativeLatencyPolicy, ProcessingDelay, RouterError,
    RouterResult, WorkerSpec,
};
use rand::rngs::StdRng;
use tokio::sync::{Mutex, RwLock};
use tracing::trace;

use crate::components::{LatencySampler, LatencyWindow};

/// 所有Worker共享的采样参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkerSettings {
    pub window_size: usize,
    pub jitter: f64,
    pub negative_latency: NegativeLatencyPolicy,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self::from(&DispatcherConfig::default())
    }
}

impl From<&DispatcherConfig> for WorkerSettings {
    fn from(config: &DispatcherConfig) -> Self {
        Self {
            window_size: config.window_size,
            jitter: config.jitter,
            negative_latency: config.negative_latency,
        }
    }
}

/// 模拟的后端处理单元
///
/// 窗口与采样器各自加锁，`process()` 在等待延迟期间不持有任何锁，
/// 因此多个并发请求落到同一个Worker时窗口长度仍不超过容量。
pub struct Worker {
    spec: WorkerSpec,
    window_size: usize,
    history: RwLock<LatencyWindow>,
    sampler: Mutex<LatencySampler>,
    delay: Arc<dyn ProcessingDelay>,
    processed: AtomicU64,
}

impl Worker {
    pub fn new(
        spec: WorkerSpec,
        settings: WorkerSettings,
        rng: StdRng,
        delay: Arc<dyn ProcessingDelay>,
    ) -> RouterResult<Self> {
        spec.validate().map_err(|e| RouterError::InvalidWorker {
            id: spec.id.clone(),
            message: e.to_string(),
        })?;

        if settings.window_size == 0 {
            return Err(RouterError::Configuration(
                "延迟窗口大小必须大于0".to_string(),
            ));
        }

        if !settings.jitter.is_finite() || settings.jitter < 0.0 {
            return Err(RouterError::Configuration(format!(
                "抖动上界必须是非负有限数: {}",
                settings.jitter
            )));
        }

        let sampler = LatencySampler::new(
            spec.baseline_latency,
            settings.jitter,
            settings.negative_latency,
            rng,
        );

        Ok(Self {
            window_size: settings.window_size,
            history: RwLock::new(LatencyWindow::new(settings.window_size)),
            sampler: Mutex::new(sampler),
            spec,
            delay,
            processed: AtomicU64::new(0),
        })
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn baseline_latency(&self) -> f64 {
        self.spec.baseline_latency
    }

    pub fn spec(&self) -> &WorkerSpec {
        &self.spec
    }

    /// 模拟处理一个请求：采样延迟、等待、写入窗口，返回样本
    pub async fn process(&self) -> f64 {
        let latency = self.sampler.lock().await.sample();
        self.delay.wait(latency).await;

        let evicted = self.history.write().await.push(latency);
        self.processed.fetch_add(1, Ordering::Relaxed);

        trace!(
            worker_id = %self.spec.id,
            latency,
            evicted = ?evicted,
            "Worker完成请求处理"
        );

        latency
    }

    /// 窗口内样本的算术平均值，窗口为空时为 `NoData`
    pub async fn average_latency(&self) -> LatencyMetric {
        self.history.read().await.average()
    }

    /// 从旧到新的窗口内容
    pub async fn history(&self) -> Vec<f64> {
        self.history.read().await.to_vec()
    }

    pub async fn history_len(&self) -> usize {
        self.history.read().await.len()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// 生命周期内处理过的请求总数（不受窗口淘汰影响）
    pub fn processed_count(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for Worker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Worker")
            .field("id", &self.spec.id)
            .field("baseline_latency", &self.spec.baseline_latency)
            .field("delay", &self.delay.name())
            .field("processed", &self.processed_count())
            .finish()
    }
}
