//! 指标访问工具
//!
//! 从松散类型的 vitals 映射中安全提取命名数值指标。缺失、非数值或
//! 非对象的载荷一律静默跳过——这是整个套件唯一处理"输入不完整"的
//! 位置，上层组件必须经由这里读取指标，不得直接访问原始字段。

use serde_json::{Map, Value};

/// vitals 中存放派生比值的保留键（不是血管标识）
pub const RATIO_KEY: &str = "ica_cca_ratio";

/// 收缩期峰值流速指标键
pub const PSV_KEY: &str = "psv_cm_s";
/// 舒张末期流速指标键
pub const EDV_KEY: &str = "edv_cm_s";
/// 内膜中层厚度指标键
pub const IMT_KEY: &str = "imt_mm";

/// 收集指定指标的 (血管, 数值) 对
///
/// 跳过保留比值键、非对象载荷和缺失/非数值的指标值，按文档顺序返回。
pub fn collect_metric(vitals: &Map<String, Value>, metric: &str) -> Vec<(String, f64)> {
    let mut pairs = Vec::new();
    for (vessel, payload) in vitals {
        if vessel == RATIO_KEY {
            continue;
        }
        if let Some(obj) = payload.as_object() {
            if let Some(value) = obj.get(metric).and_then(Value::as_f64) {
                pairs.push((vessel.clone(), value));
            }
        }
    }
    pairs
}

/// 读取单个血管的单个指标，缺失或非数值返回 `None`
pub fn metric_value(vitals: &Map<String, Value>, vessel: &str, metric: &str) -> Option<f64> {
    if vessel == RATIO_KEY {
        return None;
    }
    vitals.get(vessel)?.as_object()?.get(metric)?.as_f64()
}

/// 读取保留键下的派生比值，非数值返回 `None`
pub fn ratio_value(vitals: &Map<String, Value>) -> Option<f64> {
    vitals.get(RATIO_KEY)?.as_f64()
}

/// 由 ICA/CCA 峰值流速计算派生比值
///
/// 分母缺失或为零时返回 `None`，不会除零。
pub fn derive_ratio(vitals: &Map<String, Value>) -> Option<f64> {
    let ica_psv = metric_value(vitals, "ICA", PSV_KEY)?;
    let cca_psv = metric_value(vitals, "CCA", PSV_KEY)?;
    if cca_psv == 0.0 {
        return None;
    }
    Some(ica_psv / cca_psv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vitals(value: Value) -> Map<String, Value> {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_collect_metric_skips_ratio_and_non_numeric() {
        let v = vitals(json!({
            "CCA": {"psv_cm_s": 100.0, "edv_cm_s": "bad"},
            "ICA": {"psv_cm_s": 150},
            "ECA": {"edv_cm_s": 25.0},
            "ica_cca_ratio": 1.5,
            "comment": "free text"
        }));
        let pairs = collect_metric(&v, PSV_KEY);
        assert_eq!(
            pairs,
            vec![("CCA".to_string(), 100.0), ("ICA".to_string(), 150.0)]
        );
        // 非数值的 EDV 被跳过
        assert_eq!(collect_metric(&v, EDV_KEY), vec![("ECA".to_string(), 25.0)]);
    }

    #[test]
    fn test_metric_value_missing() {
        let v = vitals(json!({"ECA": {"psv_cm_s": 60.0}}));
        assert_eq!(metric_value(&v, "ECA", PSV_KEY), Some(60.0));
        assert_eq!(metric_value(&v, "ECA", IMT_KEY), None);
        assert_eq!(metric_value(&v, "ICA", PSV_KEY), None);
        assert_eq!(metric_value(&v, RATIO_KEY, PSV_KEY), None);
    }

    #[test]
    fn test_ratio_value_non_numeric() {
        let v = vitals(json!({"ica_cca_ratio": "n/a"}));
        assert_eq!(ratio_value(&v), None);
        let v = vitals(json!({"ica_cca_ratio": 2.25}));
        assert_eq!(ratio_value(&v), Some(2.25));
    }

    #[test]
    fn test_derive_ratio_zero_denominator() {
        let v = vitals(json!({
            "CCA": {"psv_cm_s": 0.0},
            "ICA": {"psv_cm_s": 150.0}
        }));
        assert_eq!(derive_ratio(&v), None);

        let v = vitals(json!({
            "CCA": {"psv_cm_s": 100.0},
            "ICA": {"psv_cm_s": 150.0}
        }));
        assert_eq!(derive_ratio(&v), Some(1.5));
    }
}
