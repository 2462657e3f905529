use std::sync::Arc;

use anyhow::{Context, Result};
use lrt_core::{AppConfig, NoDelay, ProcessingDelay, RequestOutcome, ScaledSleep, SimulationReport};
use lrt_dispatcher::Dispatcher;
use tracing::{debug, info};

const MAX_PREALLOCATED_OUTCOMES: u64 = 4096;

/// 模拟应用：按配置组装Worker与调度器并驱动请求循环
pub struct Application {
    config: AppConfig,
    dispatcher: Dispatcher,
}

impl Application {
    pub fn new(config: AppConfig) -> Result<Self> {
        let delay = create_delay(&config);
        info!(
            "初始化模拟应用: {} 个Worker, 策略: {}, 延迟实现: {}",
            config.workers.len(),
            config.dispatcher.strategy,
            delay.name()
        );

        let dispatcher =
            Dispatcher::from_config(&config, delay).context("创建调度器失败")?;

        Ok(Self { config, dispatcher })
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// 依次处理 `simulation.requests` 个请求，请求ID从0开始
    pub async fn run(&self) -> Vec<(u64, RequestOutcome)> {
        let requests = self.config.simulation.requests;
        info!("开始模拟 {} 个请求（最小响应时间调度）", requests);

        let mut outcomes = Vec::with_capacity(preallocated_capacity(requests));
        for request_id in 0..requests {
            let outcome = self.dispatcher.handle_request(request_id).await;
            debug!(
                "请求 {} 路由到 {}, 响应时间: {:.3}s",
                request_id + 1,
                outcome.worker_id,
                outcome.latency
            );
            outcomes.push((request_id, outcome));
        }

        info!(
            "模拟完成，共处理 {} 个请求",
            self.dispatcher.total_requests().await
        );
        outcomes
    }

    pub async fn report(&self) -> SimulationReport {
        SimulationReport {
            strategy: self.dispatcher.strategy_name().to_string(),
            total_requests: self.dispatcher.total_requests().await,
            seed: self.config.simulation.seed,
            workers: self.dispatcher.worker_reports().await,
        }
    }
}

/// 预分配容量不超过上限，请求数很大时由 `Vec` 按需增长
pub fn preallocated_capacity(requests: u64) -> usize {
    requests.min(MAX_PREALLOCATED_OUTCOMES) as usize
}

fn create_delay(config: &AppConfig) -> Arc<dyn ProcessingDelay> {
    if config.simulation.delay_enabled && config.simulation.delay_scale > 0.0 {
        Arc::new(ScaledSleep::new(config.simulation.delay_scale))
    } else {
        Arc::new(NoDelay)
    }
}
