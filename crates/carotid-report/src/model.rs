//! 报告展示模型

use carotid_analysis::{DescriptiveStats, Finding, RiskLevel};
use carotid_core::metrics::{EDV_KEY, IMT_KEY, PSV_KEY, RATIO_KEY};
use carotid_core::PatientRecord;
use serde::Serialize;

/// 报告中固定的血管展示顺序
const SECTION_ORDER: [&str; 3] = ["ICA", "CCA", "ECA"];

/// 单行指标展示
///
/// 展示模型只向外序列化，不从外部读回，因而 `unit` 可以持有静态串。
#[derive(Debug, Clone, Serialize)]
pub struct MetricRow {
    pub metric: String,
    pub value: String,
    pub unit: &'static str,
}

/// 单条血管的展示区块
#[derive(Debug, Clone, Serialize)]
pub struct VesselSection {
    pub vessel: String,
    pub rows: Vec<MetricRow>,
}

/// 完整报告展示模型
#[derive(Debug, Clone, Serialize)]
pub struct ReportModel {
    pub patient_id: String,
    pub patient_name: String,
    pub exam_date: String,
    pub vital_sections: Vec<VesselSection>,
    pub derived_metrics: Vec<MetricRow>,
    pub findings: Vec<Finding>,
    pub risk_level: RiskLevel,
    pub stats: DescriptiveStats,
}

/// 数值格式化：保留两位小数并去掉尾零
fn fmt_value(v: f64) -> String {
    let s = format!("{v:.2}");
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// 指标单位
fn unit_for(metric: &str) -> &'static str {
    if metric.contains("psv") || metric.contains("edv") {
        return "cm/s";
    }
    if metric.contains("imt") {
        return "mm";
    }
    ""
}

/// 构建报告展示模型
///
/// 缺失的血管或指标直接略过对应行，不报错。
pub fn build_report_model(
    record: &PatientRecord,
    findings: Vec<Finding>,
    risk_level: RiskLevel,
    stats: DescriptiveStats,
) -> ReportModel {
    let mut vital_sections = Vec::new();
    for vessel in SECTION_ORDER {
        let measurement = match record.vessel(vessel) {
            Some(m) => m,
            None => continue,
        };
        let mut rows = Vec::new();
        for (metric, value) in [
            (PSV_KEY, measurement.psv_cm_s),
            (EDV_KEY, measurement.edv_cm_s),
            (IMT_KEY, measurement.imt_mm),
        ] {
            if let Some(v) = value {
                rows.push(MetricRow {
                    metric: metric.to_string(),
                    value: fmt_value(v),
                    unit: unit_for(metric),
                });
            }
        }
        vital_sections.push(VesselSection {
            vessel: vessel.to_string(),
            rows,
        });
    }

    let derived_metrics = carotid_core::metrics::ratio_value(&record.vitals)
        .map(|ratio| {
            vec![MetricRow {
                metric: "ICA/CCA Ratio".to_string(),
                value: fmt_value(ratio),
                unit: unit_for(RATIO_KEY),
            }]
        })
        .unwrap_or_default();

    tracing::debug!(
        "Report model built: {} section(s), {} finding(s), risk {:?}",
        vital_sections.len(),
        findings.len(),
        risk_level
    );

    ReportModel {
        patient_id: record.patient_id.clone(),
        patient_name: record.name.clone(),
        exam_date: record.timestamp.clone(),
        vital_sections,
        derived_metrics,
        findings,
        risk_level,
        stats,
    }
}
