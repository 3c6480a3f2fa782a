//! 风险分级
//!
//! 将发现列表归并为单一粗粒度风险等级。首选路径按规则定义时附带的
//! 严重度标签判定；另保留对纯文本消息的关键字扫描路径，供只持有
//! 字符串的外部调用方使用。两条路径对规则表能产出的所有消息必须给出
//! 一致结果（见测试）。

use crate::findings::{Finding, Severity};
use serde::{Deserialize, Serialize};

/// 粗粒度风险等级
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Normal,
    Borderline, // 仅详尽档位的 Increased 档可达
    Moderate,
    High,
}

impl RiskLevel {
    /// 由严重度标签判定风险等级（结构化路径）
    ///
    /// 优先级：任一 Severe → High；否则任一 Moderate/Elevated/Mild →
    /// Moderate；否则任一 Increased → Borderline；否则 Normal。
    pub fn from_findings(findings: &[Finding]) -> Self {
        if findings.iter().any(|f| f.severity == Severity::Severe) {
            return RiskLevel::High;
        }
        if findings.iter().any(|f| {
            matches!(
                f.severity,
                Severity::Moderate | Severity::Elevated | Severity::Mild
            )
        }) {
            return RiskLevel::Moderate;
        }
        if findings.iter().any(|f| f.severity == Severity::Increased) {
            return RiskLevel::Borderline;
        }
        RiskLevel::Normal
    }

    /// 对未带标签的纯文本消息做关键字扫描（兼容路径）
    ///
    /// 拼接全部消息后不区分大小写做子串搜索，按固定优先级取第一个
    /// 命中类别。子串匹配的脆弱性被原样保留：消息中任何位置出现
    /// "severe"（哪怕嵌在无关词里）都会抬高风险。
    pub fn classify_messages<S: AsRef<str>>(messages: &[S]) -> Self {
        let text = messages
            .iter()
            .map(|m| m.as_ref())
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        if text.contains("severe") {
            return RiskLevel::High;
        }
        if text.contains("moderate") || text.contains("elevated") || text.contains("mildly") {
            return RiskLevel::Moderate;
        }
        if text.contains("increased") {
            return RiskLevel::Borderline;
        }
        RiskLevel::Normal
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            RiskLevel::Normal => "Normal",
            RiskLevel::Borderline => "Borderline",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::findings::RuleTable;
    use serde_json::json;

    fn finding(severity: Severity, message: &str) -> Finding {
        Finding {
            severity,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_keyword_classification() {
        assert_eq!(
            RiskLevel::classify_messages(&["Severe ICA PSV, stenosis (>70%)"]),
            RiskLevel::High
        );
        assert_eq!(
            RiskLevel::classify_messages(&["Elevated CCA PSV (>125 cm/s)"]),
            RiskLevel::Moderate
        );
        assert_eq!(
            RiskLevel::classify_messages::<&str>(&[]),
            RiskLevel::Normal
        );
        assert_eq!(
            RiskLevel::classify_messages(&["Increased ICA/CCA ratio."]),
            RiskLevel::Borderline
        );
    }

    #[test]
    fn test_keyword_scan_is_substring_based() {
        // 刻意保留的脆弱性：嵌在句中的关键字同样抬高风险
        assert_eq!(
            RiskLevel::classify_messages(&["Findings are not severe at all"]),
            RiskLevel::High
        );
    }

    #[test]
    fn test_tag_classification() {
        assert_eq!(
            RiskLevel::from_findings(&[finding(Severity::Mild, "Mildly elevated ICA/CCA ratio.")]),
            RiskLevel::Moderate
        );
        assert_eq!(
            RiskLevel::from_findings(&[
                finding(Severity::Normal, "CCA PSV within expected limits"),
                finding(Severity::Increased, "Increased ICA/CCA ratio."),
            ]),
            RiskLevel::Borderline
        );
        assert_eq!(RiskLevel::from_findings(&[]), RiskLevel::Normal);
    }

    #[test]
    fn test_tag_and_keyword_paths_agree_on_table_messages() {
        // 两条路径对规则表能产出的每条消息必须一致
        for table in [RuleTable::standard(), RuleTable::verbose()] {
            let mut cases: Vec<Finding> = Vec::new();
            for g in &table.groups {
                for b in &g.bands {
                    cases.push(finding(b.severity, &b.message));
                }
                if let Some(msg) = &g.normal_message {
                    cases.push(finding(Severity::Normal, msg));
                }
            }
            for b in &table.ratio_bands {
                cases.push(finding(b.severity, &b.message));
            }
            if let Some(msg) = &table.ratio_normal {
                cases.push(finding(Severity::Normal, msg));
            }

            for case in cases {
                assert_eq!(
                    RiskLevel::from_findings(std::slice::from_ref(&case)),
                    RiskLevel::classify_messages(&[case.message.as_str()]),
                    "divergence on message: {}",
                    case.message
                );
            }
        }
    }

    #[test]
    fn test_full_abnormal_record_is_high_risk() {
        let vitals = json!({
            "CCA": {"psv_cm_s": 130.0, "edv_cm_s": 45.0, "imt_mm": 1.2},
            "ICA": {"psv_cm_s": 210.0, "edv_cm_s": 110.0, "imt_mm": 1.2},
            "ECA": {"psv_cm_s": 160.0, "edv_cm_s": 45.0},
            "ica_cca_ratio": 4.2
        });
        let findings = RuleTable::standard().evaluate(vitals.as_object().unwrap());
        assert_eq!(RiskLevel::from_findings(&findings), RiskLevel::High);
    }
}
