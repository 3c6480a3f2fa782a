//! # Carotid Core
//!
//! 颈动脉多普勒分析套件的核心模块，提供基础数据结构、错误定义和
//! 指标访问工具。

pub mod error;
pub mod metrics;
pub mod models;

pub use error::{CarotidError, Result};
pub use models::*;
