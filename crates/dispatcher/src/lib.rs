//! 调度核心：在每次请求到达时选择最近平均延迟最低的Worker，并记录路由结果。

pub mod dispatcher;
pub mod ledger;
pub mod strategies;


pub use dispatcher::{Dispatcher, Selection};
pub use ledger::RoutingLedger;
pub use strategies::*;
