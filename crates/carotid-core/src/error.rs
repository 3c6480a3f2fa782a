//! 错误定义模块

use thiserror::Error;

/// 分析套件统一错误类型
///
/// 核心分析函数对缺失或非数值的指标总是静默降级，不会返回错误；
/// 这里的错误只在 I/O 边界（读取、解析输入文档）产生。
#[derive(Error, Debug)]
pub enum CarotidError {
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("验证错误: {0}")]
    Validation(String),
}

/// 分析套件统一结果类型
pub type Result<T> = std::result::Result<T, CarotidError>;
