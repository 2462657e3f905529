use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use lrt_core::{
    AppConfig, MetricsSnapshot, ProcessingDelay, RequestOutcome, RouterError, RouterResult,
    RoutingEntry, SelectionStrategy, WorkerReport,
};
use lrt_worker::{Worker, WorkerSettings};
use metrics::{counter, histogram};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::ledger::RoutingLedger;
use crate::strategies::strategy_from_name;

/// `select_worker` 的结果：被选中的Worker以及本轮采集到的指标快照
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub index: usize,
    pub worker_id: String,
    pub snapshot: MetricsSnapshot,
    /// 冷启动时退化为随机选择
    pub fallback: bool,
}

/// 请求调度器
///
/// 独占持有固定、非空的Worker集合，每个Worker对应一本路由账本（下标一致）。
pub struct Dispatcher {
    workers: Vec<Worker>,
    ledgers: Vec<Mutex<RoutingLedger>>,
    strategy: Box<dyn SelectionStrategy>,
    rng: Mutex<StdRng>,
    metrics_enabled: bool,
}

impl Dispatcher {
    /// 由已构造的Worker创建调度器，Worker集合为空或ID重复时立即失败
    pub fn new(
        workers: Vec<Worker>,
        strategy: Box<dyn SelectionStrategy>,
        rng: StdRng,
    ) -> RouterResult<Self> {
        if workers.is_empty() {
            return Err(RouterError::EmptyWorkerSet);
        }

        {
            let mut seen = HashSet::new();
            for worker in &workers {
                if !seen.insert(worker.id()) {
                    return Err(RouterError::DuplicateWorker {
                        id: worker.id().to_string(),
                    });
                }
            }
        }

        let ledgers = workers
            .iter()
            .map(|_| Mutex::new(RoutingLedger::new()))
            .collect();

        info!(
            "创建调度器: {} 个Worker, 策略: {}",
            workers.len(),
            strategy.name()
        );

        Ok(Self {
            workers,
            ledgers,
            strategy,
            rng: Mutex::new(rng),
            metrics_enabled: true,
        })
    }

    /// 按配置构建Worker与调度器
    ///
    /// 所有随机源都从同一个主种子派生：先为每个Worker派生一个，再留给调度器。
    pub fn from_config(config: &AppConfig, delay: Arc<dyn ProcessingDelay>) -> RouterResult<Self> {
        if config.workers.is_empty() {
            return Err(RouterError::EmptyWorkerSet);
        }

        let mut master = match config.simulation.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        };

        let settings = WorkerSettings::from(&config.dispatcher);
        let workers = config
            .workers
            .iter()
            .map(|spec| {
                Worker::new(
                    spec.clone(),
                    settings,
                    StdRng::from_rng(&mut master),
                    Arc::clone(&delay),
                )
            })
            .collect::<RouterResult<Vec<_>>>()?;

        let strategy = strategy_from_name(&config.dispatcher.strategy)?;
        let rng = StdRng::from_rng(&mut master);

        Ok(Self::new(workers, strategy, rng)?.with_metrics(config.observability.metrics_enabled))
    }

    pub fn with_metrics(mut self, enabled: bool) -> Self {
        self.metrics_enabled = enabled;
        self
    }

    /// 采集所有Worker的当前平均延迟并交给策略选择
    ///
    /// 快照作为返回值的一部分显式输出，调度器自身不缓存它。
    pub async fn select_worker(&self) -> Selection {
        let snapshot = self.metrics_snapshot().await;

        let choice = {
            let mut rng = self.rng.lock().await;
            self.strategy.select_worker(&snapshot, &mut *rng)
        };

        debug_assert!(
            choice.index < self.workers.len(),
            "策略 {} 返回了越界下标 {}",
            self.strategy.name(),
            choice.index
        );
        let index = if choice.index < self.workers.len() {
            choice.index
        } else {
            warn!(
                "策略 {} 返回了越界下标 {}，截断到最后一个Worker",
                self.strategy.name(),
                choice.index
            );
            self.workers.len() - 1
        };

        if choice.fallback && self.metrics_enabled {
            counter!("lrt_selection_fallback_total").increment(1);
        }

        Selection {
            index,
            worker_id: self.workers[index].id().to_string(),
            snapshot,
            fallback: choice.fallback,
        }
    }

    /// 处理一个请求：选择Worker、模拟处理、记录结果
    pub async fn handle_request(&self, request_id: u64) -> RequestOutcome {
        let selection = self.select_worker().await;
        let worker = &self.workers[selection.index];

        let latency = worker.process().await;
        self.ledgers[selection.index]
            .lock()
            .await
            .record(request_id, latency);

        if self.metrics_enabled {
            counter!("lrt_requests_total", "worker" => selection.worker_id.clone()).increment(1);
            histogram!("lrt_request_latency_seconds", "worker" => selection.worker_id.clone())
                .record(latency);
        }

        debug!(
            request_id,
            worker_id = %selection.worker_id,
            latency,
            fallback = selection.fallback,
            "请求已路由"
        );

        RequestOutcome {
            worker_id: selection.worker_id,
            latency,
        }
    }

    /// 按构造顺序的当前平均延迟快照，每次调用都重新计算
    pub async fn metrics_snapshot(&self) -> MetricsSnapshot {
        let mut snapshot = MetricsSnapshot::with_capacity(self.workers.len());
        for worker in &self.workers {
            snapshot.push(worker.id(), worker.average_latency().await);
        }
        snapshot
    }

    pub async fn routing_records(&self) -> HashMap<String, Vec<RoutingEntry>> {
        let mut records = HashMap::with_capacity(self.workers.len());
        for (worker, ledger) in self.workers.iter().zip(&self.ledgers) {
            records.insert(worker.id().to_string(), ledger.lock().await.entries().to_vec());
        }
        records
    }

    pub async fn routing_record(&self, worker_id: &str) -> Option<Vec<RoutingEntry>> {
        let index = self.position(worker_id)?;
        Some(self.ledgers[index].lock().await.entries().to_vec())
    }

    pub async fn request_counts(&self) -> HashMap<String, u64> {
        let mut counts = HashMap::with_capacity(self.workers.len());
        for (worker, ledger) in self.workers.iter().zip(&self.ledgers) {
            counts.insert(worker.id().to_string(), ledger.lock().await.request_count());
        }
        counts
    }

    pub async fn request_count(&self, worker_id: &str) -> Option<u64> {
        let index = self.position(worker_id)?;
        Some(self.ledgers[index].lock().await.request_count())
    }

    /// 所有Worker请求计数之和
    pub async fn total_requests(&self) -> u64 {
        let mut total = 0;
        for ledger in &self.ledgers {
            total += ledger.lock().await.request_count();
        }
        total
    }

    /// 按构造顺序汇总每个Worker的指标与路由记录
    pub async fn worker_reports(&self) -> Vec<WorkerReport> {
        let mut reports = Vec::with_capacity(self.workers.len());
        for (worker, ledger) in self.workers.iter().zip(&self.ledgers) {
            let average_latency = worker.average_latency().await;
            let ledger = ledger.lock().await;
            reports.push(WorkerReport {
                worker_id: worker.id().to_string(),
                baseline_latency: worker.baseline_latency(),
                average_latency,
                request_count: ledger.request_count(),
                entries: ledger.entries().to_vec(),
            });
        }
        reports
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn worker(&self, worker_id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id() == worker_id)
    }

    pub fn strategy_name(&self) -> &str {
        self.strategy.name()
    }

    fn position(&self, worker_id: &str) -> Option<usize> {
        self.workers.iter().position(|w| w.id() == worker_id)
    }
}
