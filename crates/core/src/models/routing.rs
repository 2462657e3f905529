use serde::{Deserialize, Serialize};

/// 路由记录中的一条：请求ID与观测到的延迟
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoutingEntry {
    pub request_id: u64,
    pub latency: f64,
}

/// `handle_request` 返回给调用方的处理结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestOutcome {
    pub worker_id: String,
    pub latency: f64,
}
