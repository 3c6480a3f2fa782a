//! # 颈动脉分析模块
//!
//! 提供套件中全部真实决策逻辑，包括：
//! - 描述统计：各指标的 min/max/mean 与最高峰值流速血管，不做阈值判断
//! - 发现引擎：按不可变规则表逐级评估阈值，产生有序的文本发现
//! - 风险分级：由发现的严重度标签归并为粗粒度风险等级
//!
//! 所有函数均为纯同步函数，对不完整输入总是降级而非报错。

pub mod findings;
pub mod risk;
pub mod stats;

// 重新导出主要类型
pub use findings::{Band, BandGroup, Comparator, Finding, RuleTable, Severity};
pub use risk::RiskLevel;
pub use stats::{DescriptiveStats, StatTriple};
