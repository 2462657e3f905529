use serde::{Deserialize, Serialize};

/// Worker节点定义：标识与基线延迟，创建后不可变
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerSpec {
    pub id: String,
    /// 基线延迟（秒），用于参数化模拟采样
    pub baseline_latency: f64,
}

impl WorkerSpec {
    pub fn new(id: impl Into<String>, baseline_latency: f64) -> Self {
        Self {
            id: id.into(),
            baseline_latency,
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.id.trim().is_empty() {
            return Err(anyhow::anyhow!("Worker ID不能为空"));
        }

        if !self.baseline_latency.is_finite() || self.baseline_latency < 0.0 {
            return Err(anyhow::anyhow!(
                "Worker {} 的基线延迟必须是非负有限数: {}",
                self.id,
                self.baseline_latency
            ));
        }

        Ok(())
    }
}

/// 负延迟处理策略
///
/// 抖动公式在基线较小时可能产生负值，由此开关显式决定是否截断。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeLatencyPolicy {
    /// 原样接受负值，视为退化但合法的模拟结果
    #[default]
    Accept,
    /// 截断到0
    ClampToZero,
}

impl NegativeLatencyPolicy {
    pub fn apply(self, latency: f64) -> f64 {
        match self {
            NegativeLatencyPolicy::Accept => latency,
            NegativeLatencyPolicy::ClampToZero => latency.max(0.0),
        }
    }
}
