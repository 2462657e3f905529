//! 配置管理
//!
//! 配置按 默认值 → TOML 文件 → 环境变量（`LRT_` 前缀，`__` 分隔嵌套键）
//! 的顺序叠加，最后统一校验。缺失的键回退到各结构体的 `Default`。
//!
//! ```toml
//! [simulation]
//! requests = 50
//! seed = 42
//!
//! [dispatcher]
//! strategy = "least_response_time"
//! window_size = 10
//! jitter = 0.05
//! negative_latency = "accept"
//!
//! [[workers]]
//! id = "Server1"
//! baseline_latency = 0.1
//! ```

pub mod models;

pub use models::*;
