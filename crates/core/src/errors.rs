use thiserror::Error;

/// 调度器错误类型定义
///
/// 只有构造阶段会失败：请求处理、Worker 采样、延迟统计都是全函数。
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("配置错误: {0}")]
    Configuration(String),

    #[error("Worker集合不能为空")]
    EmptyWorkerSet,

    #[error("Worker ID重复: {id}")]
    DuplicateWorker { id: String },

    #[error("无效的Worker {id}: {message}")]
    InvalidWorker { id: String, message: String },

    #[error("序列化错误: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RouterError {
    fn from(err: serde_json::Error) -> Self {
        RouterError::Serialization(err.to_string())
    }
}

/// 统一的Result类型
pub type Result<T> = std::result::Result<T, RouterError>;
