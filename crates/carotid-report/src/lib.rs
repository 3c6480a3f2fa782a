//! # 报告组装模块
//!
//! 套件与展示层之间的协作边界：消费描述统计、发现列表与风险等级，
//! 构建展示模型并渲染 HTML。这里没有决策逻辑，只有字符串组织。

pub mod html;
pub mod model;

pub use html::render_html;
pub use model::{build_report_model, MetricRow, ReportModel, VesselSection};
