use serde::{Deserialize, Serialize};

use super::{LatencyMetric, RoutingEntry};

/// 单个Worker的路由汇总，供报表与绘图使用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerReport {
    pub worker_id: String,
    pub baseline_latency: f64,
    pub average_latency: LatencyMetric,
    pub request_count: u64,
    pub entries: Vec<RoutingEntry>,
}

/// 一次模拟运行的完整报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub strategy: String,
    pub total_requests: u64,
    pub seed: Option<u64>,
    pub workers: Vec<WorkerReport>,
}

impl SimulationReport {
    pub fn to_json(&self) -> crate::RouterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 所有Worker的请求计数之和
    pub fn counted_requests(&self) -> u64 {
        self.workers.iter().map(|w| w.request_count).sum()
    }
}
