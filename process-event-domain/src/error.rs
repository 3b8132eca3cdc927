//! 领域层统一错误定义
//!
//! 批次聚合本身不会失败（未识别事件静默丢弃、缺失数据映射为空字段），
//! 错误只出现在边界：状态码解析、信封序列化与发布通道。
//!
use thiserror::Error;

/// 统一错误类型（基础库最小必要集）
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum DomainError {
    // --- 序列化 ---
    #[error("serialization error: {source}")]
    Serde {
        #[from]
        source: serde_json::Error,
    },
    #[error("invalid value: {reason}")]
    InvalidValue { reason: String },

    // --- 发布 ---
    #[error("event publisher error: publisher={publisher}, reason={reason}")]
    Publisher { publisher: String, reason: String },
}

impl DomainError {
    pub fn invalid_value(reason: impl Into<String>) -> Self {
        DomainError::InvalidValue {
            reason: reason.into(),
        }
    }

    pub fn publisher(publisher: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::Publisher {
            publisher: publisher.into(),
            reason: reason.into(),
        }
    }
}

/// 统一 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;

impl From<std::num::ParseIntError> for DomainError {
    fn from(err: std::num::ParseIntError) -> Self {
        DomainError::InvalidValue {
            reason: err.to_string(),
        }
    }
}
