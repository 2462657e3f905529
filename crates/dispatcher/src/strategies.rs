use std::sync::atomic::{AtomicUsize, Ordering};

use lrt_core::{
    LatencyMetric, MetricsSnapshot, RouterError, RouterResult, SelectionStrategy,
    StrategyChoice,
};
use rand::{Rng, RngCore};
use tracing::debug;

pub struct LeastResponseTimeStrategy;

pub struct RoundRobinStrategy {
    counter: AtomicUsize,
}

pub struct RandomStrategy;

impl LeastResponseTimeStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LeastResponseTimeStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for LeastResponseTimeStrategy {
    fn select_worker(&self, snapshot: &MetricsSnapshot, rng: &mut dyn RngCore) -> StrategyChoice {
        // 严格小于才替换，平均延迟相同时保留顺序靠前的Worker
        let mut best: Option<(usize, LatencyMetric)> = None;
        for (index, (_, metric)) in snapshot.iter().enumerate() {
            if metric.is_no_data() {
                continue;
            }
            let better = match best {
                Some((_, current)) => metric.selection_cmp(&current).is_lt(),
                None => true,
            };
            if better {
                best = Some((index, metric));
            }
        }

        match best {
            Some((index, metric)) => {
                debug!(
                    "最小响应时间策略选择Worker下标: {} (平均延迟: {})",
                    index, metric
                );
                StrategyChoice::chosen(index)
            }
            None => {
                let index = rng.random_range(0..snapshot.len());
                debug!(
                    "所有Worker都没有延迟数据，随机选择下标: {}/{}",
                    index,
                    snapshot.len()
                );
                StrategyChoice::fallback(index)
            }
        }
    }

    fn name(&self) -> &str {
        "LeastResponseTime"
    }
}

impl RoundRobinStrategy {
    pub fn new() -> Self {
        Self {
            counter: AtomicUsize::new(0),
        }
    }
}

impl Default for RoundRobinStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for RoundRobinStrategy {
    fn select_worker(&self, snapshot: &MetricsSnapshot, _rng: &mut dyn RngCore) -> StrategyChoice {
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % snapshot.len();

        debug!("轮询策略选择Worker下标: {}/{}", index, snapshot.len());

        StrategyChoice::chosen(index)
    }

    fn name(&self) -> &str {
        "RoundRobin"
    }
}

impl RandomStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionStrategy for RandomStrategy {
    fn select_worker(&self, snapshot: &MetricsSnapshot, rng: &mut dyn RngCore) -> StrategyChoice {
        let index = rng.random_range(0..snapshot.len());

        debug!("随机策略选择Worker下标: {}/{}", index, snapshot.len());

        StrategyChoice::chosen(index)
    }

    fn name(&self) -> &str {
        "Random"
    }
}

/// 按配置名称创建策略
pub fn strategy_from_name(name: &str) -> RouterResult<Box<dyn SelectionStrategy>> {
    match name {
        "least_response_time" => Ok(Box::new(LeastResponseTimeStrategy::new())),
        "round_robin" => Ok(Box::new(RoundRobinStrategy::new())),
        "random" => Ok(Box::new(RandomStrategy::new())),
        other => Err(RouterError::Configuration(format!(
            "不支持的调度策略: {other}"
        ))),
    }
}
