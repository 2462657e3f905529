use lrt_core::RoutingEntry;

/// 单个Worker的路由账本：按到达顺序追加的记录与请求计数
///
/// 计数与记录在同一次 `record` 中更新，二者始终相等。
#[derive(Debug, Clone, Default)]
pub struct RoutingLedger {
    entries: Vec<RoutingEntry>,
    request_count: u64,
}

impl RoutingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, request_id: u64, latency: f64) {
        self.entries.push(RoutingEntry {
            request_id,
            latency,
        });
        self.request_count += 1;
    }

    pub fn entries(&self) -> &[RoutingEntry] {
        &self.entries
    }

    pub fn request_count(&self) -> u64 {
        self.request_count
    }
}
