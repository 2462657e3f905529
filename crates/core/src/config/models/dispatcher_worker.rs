use serde::{Deserialize, Serialize};

use crate::models::NegativeLatencyPolicy;

pub const VALID_STRATEGIES: [&str; 3] = ["least_response_time", "round_robin", "random"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub strategy: String, // "least_response_time", "round_robin", "random"
    /// 每个Worker保留的最近延迟样本数 (W)
    pub window_size: usize,
    /// 抖动上界 δ，采样值为 baseline + U(-δ, +δ)
    pub jitter: f64,
    pub negative_latency: NegativeLatencyPolicy,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            strategy: "least_response_time".to_string(),
            window_size: 10,
            jitter: 0.05,
            negative_latency: NegativeLatencyPolicy::Accept,
        }
    }
}

impl DispatcherConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !VALID_STRATEGIES.contains(&self.strategy.as_str()) {
            return Err(anyhow::anyhow!(
                "无效的调度策略: {}，支持的策略: {:?}",
                self.strategy,
                VALID_STRATEGIES
            ));
        }

        if self.window_size == 0 {
            return Err(anyhow::anyhow!("延迟窗口大小必须大于0"));
        }

        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(anyhow::anyhow!("抖动上界必须是非负有限数: {}", self.jitter));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub requests: u64,
    /// 主随机种子；为空时使用系统熵
    pub seed: Option<u64>,
    pub delay_enabled: bool,
    /// 休眠时长 = 延迟 × delay_scale
    pub delay_scale: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            requests: 50,
            seed: None,
            delay_enabled: true,
            delay_scale: 0.1,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.delay_scale.is_finite() || self.delay_scale < 0.0 {
            return Err(anyhow::anyhow!(
                "延迟缩放比例必须是非负有限数: {}",
                self.delay_scale
            ));
        }

        Ok(())
    }
}
