use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Worker的平均延迟指标
///
/// `NoData` 是"无数据"哨兵，语义上等价于正无穷：任何有真实样本的Worker
/// 都优先于尚未处理过请求的Worker。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LatencyMetric {
    NoData,
    Average(f64),
}

impl LatencyMetric {
    /// 由样本集合计算算术平均值，空集合返回 `NoData`
    pub fn from_samples<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
    {
        // 以首个样本为平移量累加偏差，相同样本的平均值精确等于样本本身
        let mut samples = samples.into_iter();
        let Some(&shift) = samples.next() else {
            return LatencyMetric::NoData;
        };

        let (deviation, count) = samples.fold((0.0_f64, 1_usize), |(sum, count), s| {
            (sum + (s - shift), count + 1)
        });
        LatencyMetric::Average(shift + deviation / count as f64)
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, LatencyMetric::NoData)
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            LatencyMetric::NoData => None,
            LatencyMetric::Average(v) => Some(*v),
        }
    }

    /// 以正无穷表示 `NoData` 的数值视图
    pub fn as_f64(&self) -> f64 {
        self.value().unwrap_or(f64::INFINITY)
    }

    /// 选择时使用的全序：任意 `Average` 小于 `NoData`
    pub fn selection_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LatencyMetric::NoData, LatencyMetric::NoData) => Ordering::Equal,
            (LatencyMetric::NoData, LatencyMetric::Average(_)) => Ordering::Greater,
            (LatencyMetric::Average(_), LatencyMetric::NoData) => Ordering::Less,
            (LatencyMetric::Average(a), LatencyMetric::Average(b)) => a.total_cmp(b),
        }
    }
}

impl fmt::Display for LatencyMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LatencyMetric::NoData => write!(f, "No data"),
            LatencyMetric::Average(v) => write!(f, "{v:.3}s"),
        }
    }
}

/// 一次选择过程中按构造顺序采集的各Worker指标
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    entries: Vec<(String, LatencyMetric)>,
}

impl MetricsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, worker_id: impl Into<String>, metric: LatencyMetric) {
        self.entries.push((worker_id.into(), metric));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, worker_id: &str) -> Option<LatencyMetric> {
        self.entries
            .iter()
            .find(|(id, _)| id == worker_id)
            .map(|(_, metric)| *metric)
    }

    pub fn metric_at(&self, index: usize) -> Option<LatencyMetric> {
        self.entries.get(index).map(|(_, metric)| *metric)
    }

    /// 是否所有Worker都没有数据（冷启动）
    pub fn all_no_data(&self) -> bool {
        self.entries.iter().all(|(_, metric)| metric.is_no_data())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, LatencyMetric)> {
        self.entries.iter().map(|(id, metric)| (id.as_str(), *metric))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_samples() {
        let empty: [f64; 0] = [];
        assert_eq!(LatencyMetric::from_samples(&empty), LatencyMetric::NoData);
        assert_eq!(
            LatencyMetric::from_samples(&[0.25, 0.75]),
            LatencyMetric::Average(0.5)
        );
        assert_eq!(
            LatencyMetric::from_samples(&[0.1; 10]),
            LatencyMetric::Average(0.1)
        );
    }

    #[test]
    fn test_no_data_sorts_after_any_average() {
        let no_data = LatencyMetric::NoData;
        let slow = LatencyMetric::Average(1e9);
        assert_eq!(slow.selection_cmp(&no_data), Ordering::Less);
        assert_eq!(no_data.selection_cmp(&slow), Ordering::Greater);
        assert_eq!(no_data.selection_cmp(&no_data), Ordering::Equal);
        assert!(no_data.as_f64().is_infinite());
    }

    #[test]
    fn test_snapshot_lookup() {
        let mut snapshot = MetricsSnapshot::new();
        snapshot.push("a", LatencyMetric::NoData);
        snapshot.push("b", LatencyMetric::Average(0.5));
        assert_eq!(snapshot.get("b"), Some(LatencyMetric::Average(0.5)));
        assert_eq!(snapshot.get("c"), None);
        assert!(!snapshot.all_no_data());
        assert_eq!(format!("{}", LatencyMetric::NoData), "No data");
    }
}
