//! 描述统计聚合
//!
//! 对 PSV/EDV/IMT 做纯描述性汇总（min/max/mean、最高峰值流速血管、
//! 回显比值），不套用任何阈值，也不参与风险分级。

use carotid_core::metrics::{self, EDV_KEY, IMT_KEY, PSV_KEY};
use carotid_core::PatientRecord;
use serde::{Deserialize, Serialize};

/// 数值序列的 min/max/mean 汇总
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct StatTriple {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// 描述统计结果
///
/// 空序列或全部非数值的指标给出 `None` 而非 NaN。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptiveStats {
    pub psv: Option<StatTriple>,
    pub edv: Option<StatTriple>,
    pub imt: Option<StatTriple>,
    pub highest_psv_vessel: Option<String>,
    pub ica_cca_ratio: Option<f64>,
    pub notes: Vec<String>,
}

fn stat_triple(values: &[f64]) -> Option<StatTriple> {
    let first = *values.first()?;
    let mut min = first;
    let mut max = first;
    let mut sum = 0.0;
    for &v in values {
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
        sum += v;
    }
    Some(StatTriple {
        min,
        max,
        mean: sum / values.len() as f64,
    })
}

/// 对患者记录做描述性分析
///
/// 纯函数：相同记录给出相同结果，无副作用。
pub fn analyze(record: &PatientRecord) -> DescriptiveStats {
    let vitals = &record.vitals;
    let psv_pairs = metrics::collect_metric(vitals, PSV_KEY);
    let edv_values: Vec<f64> = metrics::collect_metric(vitals, EDV_KEY)
        .into_iter()
        .map(|(_, v)| v)
        .collect();
    let imt_values: Vec<f64> = metrics::collect_metric(vitals, IMT_KEY)
        .into_iter()
        .map(|(_, v)| v)
        .collect();
    let psv_values: Vec<f64> = psv_pairs.iter().map(|(_, v)| *v).collect();

    // 严格大于比较，数值相等时保留先出现的血管
    let mut highest_psv_vessel: Option<&(String, f64)> = None;
    for pair in &psv_pairs {
        match highest_psv_vessel {
            Some(best) if pair.1 <= best.1 => {}
            _ => highest_psv_vessel = Some(pair),
        }
    }
    let highest_psv_vessel = highest_psv_vessel.map(|(vessel, _)| vessel.clone());

    let ica_cca_ratio = metrics::ratio_value(vitals);

    let imt = stat_triple(&imt_values);
    let mut notes = Vec::new();
    if let Some(vessel) = &highest_psv_vessel {
        notes.push(format!("Highest PSV observed in: {vessel}."));
    }
    if let Some(ratio) = ica_cca_ratio {
        notes.push(format!("ICA/CCA PSV ratio (echoed): {ratio:.2}."));
    }
    if imt.is_some() {
        notes.push("IMT values summarized descriptively (no thresholds applied).".to_string());
    }

    DescriptiveStats {
        psv: stat_triple(&psv_values),
        edv: stat_triple(&edv_values),
        imt,
        highest_psv_vessel,
        ica_cca_ratio,
        notes,
    }
}
