//! # 数据模型
//!
//! 调度核心共享的数据结构：Worker定义、延迟指标快照、路由记录。
//! 所有模型都实现了 `serde` 序列化，模拟报告直接复用它们。

pub mod metric;
pub mod report;
pub mod routing;
pub mod worker;

pub use metric::*;
pub use report::*;
pub use routing::*;
pub use worker::*;
