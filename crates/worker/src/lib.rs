//! 模拟后端Worker：维护最近延迟窗口并按基线加抖动产生延迟样本。

pub mod components;
pub mod worker;

pub use components::{LatencySampler, LatencyWindow};
pub use worker::{Worker, WorkerSettings};
