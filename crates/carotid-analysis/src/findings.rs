//! 阈值发现引擎
//!
//! 按固定顺序的不可变规则表评估各血管指标，产生有序的文本发现。
//! 每组阈值带从高到低以 elif 链方式检查，最多命中一条，最高档优先。
//! 严重度标签在规则定义时就附在阈值带上，供风险分级直接使用，
//! 不再依赖对消息文本的关键字搜索。

use carotid_core::metrics;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 规则严重度标签
///
/// 附在每条阈值带上，是风险分级的唯一结构化依据。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Severity {
    Normal,    // 正常（仅详尽档位输出）
    Increased, // 偏高趋势（临界档）
    Mild,      // 轻度
    Elevated,  // 升高
    Moderate,  // 中度
    Severe,    // 重度
}

/// 阈值比较方式
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Comparator {
    Greater,        // 严格大于
    GreaterOrEqual, // 大于等于（IMT 类阈值）
}

impl Comparator {
    fn matches(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparator::Greater => value > threshold,
            Comparator::GreaterOrEqual => value >= threshold,
        }
    }
}

/// 单条阈值带
#[derive(Debug, Clone, Serialize)]
pub struct Band {
    pub comparator: Comparator,
    pub threshold: f64,
    pub severity: Severity,
    pub message: String,
}

impl Band {
    fn new(comparator: Comparator, threshold: f64, severity: Severity, message: &str) -> Self {
        Self {
            comparator,
            threshold,
            severity,
            message: message.to_string(),
        }
    }
}

/// 同一血管同一指标的阈值带组（高→低排列）
#[derive(Debug, Clone, Serialize)]
pub struct BandGroup {
    pub vessel: String,
    pub metric: String,
    pub bands: Vec<Band>,
    pub normal_message: Option<String>, // 详尽档位在未命中任何带时输出
}

/// 不可变规则表
///
/// 作为配置值由调用方传入引擎，没有任何模块级可变状态；测试可以注入
/// 替代规则表。派生比值不是血管，单独持有自己的阈值带。
#[derive(Debug, Clone, Serialize)]
pub struct RuleTable {
    pub groups: Vec<BandGroup>,
    pub ratio_bands: Vec<Band>,
    pub ratio_normal: Option<String>,
}

/// 单条发现：通过阈值检验的规则产出的文本及其严重度标签
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl RuleTable {
    /// 规范规则表（稀疏档位）：只输出异常发现
    ///
    /// 阈值与消息文本是需要原样保留的固定常量，不是可改进的医学知识。
    pub fn standard() -> Self {
        use Comparator::{Greater, GreaterOrEqual};
        use Severity::{Elevated, Mild, Moderate, Severe};
        Self {
            groups: vec![
                group("ICA", metrics::PSV_KEY, vec![
                    Band::new(Greater, 200.0, Severe, "Severe ICA PSV, stenosis (>70%)"),
                    Band::new(Greater, 125.0, Moderate, "Moderate ICA PSV, stenosis (50-69%)"),
                ]),
                group("ICA", metrics::EDV_KEY, vec![
                    Band::new(Greater, 100.0, Severe, "Severe ICA EDV (>100 cm/s)"),
                    Band::new(Greater, 40.0, Moderate, "Moderate ICA EDV (40-100 cm/s)"),
                ]),
                group("ICA", metrics::IMT_KEY, vec![
                    Band::new(GreaterOrEqual, 1.1, Elevated, "Elevated ICA IMT (>1.0 mm)"),
                ]),
                group("CCA", metrics::PSV_KEY, vec![
                    Band::new(Greater, 125.0, Elevated, "Elevated CCA PSV (>125 cm/s)"),
                ]),
                group("CCA", metrics::EDV_KEY, vec![
                    Band::new(Greater, 40.0, Elevated, "Elevated CCA EDV (>40 cm/s)"),
                ]),
                group("CCA", metrics::IMT_KEY, vec![
                    Band::new(GreaterOrEqual, 1.0, Elevated, "Elevated CCA IMT (>1.0 mm)"),
                ]),
                group("ECA", metrics::PSV_KEY, vec![
                    Band::new(Greater, 150.0, Elevated, "Elevated ECA PSV (>150 cm/s)"),
                ]),
                group("ECA", metrics::EDV_KEY, vec![
                    Band::new(Greater, 40.0, Elevated, "Elevated ECA EDV (>40 cm/s)"),
                ]),
            ],
            ratio_bands: vec![
                Band::new(Greater, 4.0, Severe, "Severe ICA/CCA suggests stenosis (>70%)."),
                Band::new(Greater, 2.0, Elevated, "Elevated ICA/CCA suggest stenosis (>50%)."),
                Band::new(Greater, 1.5, Mild, "Mildly elevated ICA/CCA ratio."),
            ],
            ratio_normal: None,
        }
    }

    /// 分歧变体（详尽档位），作为显式配置暴露而非与规范表静默合并
    ///
    /// 与规范表的差异：每个适用字段恰好输出一条消息（未命中时为
    /// "within expected limits"）；比值最低档改为 Increased（临界）；
    /// ICA IMT 阈值为 ≥1.0，与其消息文本一致。
    pub fn verbose() -> Self {
        let mut table = Self::standard();
        for g in &mut table.groups {
            if g.vessel == "ICA" && g.metric == metrics::IMT_KEY {
                g.bands[0].threshold = 1.0;
            }
            g.normal_message = Some(format!(
                "{} {} within expected limits",
                g.vessel,
                metric_label(&g.metric)
            ));
        }
        if let Some(low) = table.ratio_bands.last_mut() {
            low.severity = Severity::Increased;
            low.message = "Increased ICA/CCA ratio.".to_string();
        }
        table.ratio_normal = Some("ICA/CCA ratio within expected limits".to_string());
        table
    }

    /// 对 vitals 映射评估规则表，返回有序的发现列表
    ///
    /// 对缺失血管/指标不报错：缺失只意味着对应规则不产出消息。
    /// 幂等：同一输入两次评估给出完全相同的有序输出。
    pub fn evaluate(&self, vitals: &Map<String, Value>) -> Vec<Finding> {
        let mut findings = Vec::new();
        for g in &self.groups {
            let value = metrics::metric_value(vitals, &g.vessel, &g.metric);
            apply_bands(value, &g.bands, g.normal_message.as_deref(), &mut findings);
        }
        apply_bands(
            metrics::ratio_value(vitals),
            &self.ratio_bands,
            self.ratio_normal.as_deref(),
            &mut findings,
        );
        tracing::debug!("Rule evaluation produced {} finding(s)", findings.len());
        findings
    }
}

fn group(vessel: &str, metric: &str, bands: Vec<Band>) -> BandGroup {
    BandGroup {
        vessel: vessel.to_string(),
        metric: metric.to_string(),
        bands,
        normal_message: None,
    }
}

fn metric_label(metric: &str) -> &'static str {
    match metric {
        metrics::PSV_KEY => "PSV",
        metrics::EDV_KEY => "EDV",
        metrics::IMT_KEY => "IMT",
        _ => "value",
    }
}

/// 对一个阈值带组评估单个指标值
///
/// 真值式存在性检查：值恰好为 0 与字段缺失同样视为"规则不适用"，
/// 不输出任何消息（包括详尽档位的正常消息）。这是对原始行为的刻意
/// 保留，见已记录的已知怪癖，不要当作缺陷修掉。
fn apply_bands(value: Option<f64>, bands: &[Band], normal: Option<&str>, out: &mut Vec<Finding>) {
    let value = match value {
        Some(v) if v != 0.0 => v,
        _ => return,
    };
    for band in bands {
        if band.comparator.matches(value, band.threshold) {
            out.push(Finding {
                severity: band.severity,
                message: band.message.clone(),
            });
            // elif 链：每组最多一条消息，更高档位优先
            return;
        }
    }
    if let Some(message) = normal {
        out.push(Finding {
            severity: Severity::Normal,
            message: message.to_string(),
        });
    }
}
