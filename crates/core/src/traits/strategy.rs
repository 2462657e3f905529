use rand::RngCore;

use crate::models::MetricsSnapshot;

/// 一次策略选择的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyChoice {
    /// 被选Worker在构造顺序中的下标
    pub index: usize,
    /// 是否因为缺少可比较的指标而退化为随机选择
    pub fallback: bool,
}

impl StrategyChoice {
    pub fn chosen(index: usize) -> Self {
        Self {
            index,
            fallback: false,
        }
    }

    pub fn fallback(index: usize) -> Self {
        Self {
            index,
            fallback: true,
        }
    }
}

/// Worker选择策略接口
///
/// 调用方保证快照非空；随机源由调用方持有并注入，便于固定种子复现。
pub trait SelectionStrategy: Send + Sync {
    /// 根据指标快照选择Worker
    fn select_worker(&self, snapshot: &MetricsSnapshot, rng: &mut dyn RngCore) -> StrategyChoice;

    /// 获取策略名称
    fn name(&self) -> &str;
}
