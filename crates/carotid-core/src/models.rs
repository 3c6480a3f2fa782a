//! 核心数据模型定义

use crate::error::{CarotidError, Result};
use crate::metrics::{self, EDV_KEY, IMT_KEY, PSV_KEY};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::Path;

/// 患者测量记录
///
/// `vitals` 保持松散类型：血管标识（"CCA"、"ICA"、"ECA"）映射到命名
/// 数值指标的对象，保留键 `ica_cca_ratio` 存放派生比值标量。外部来源
/// 的文档可能缺字段或含非数值，统一由 [`crate::metrics`] 容错读取。
/// 读入后视为不可变。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub patient_id: String,   // 医院内部患者ID
    pub name: String,         // 患者姓名
    pub timestamp: String,    // 检查时间（原样透传）
    #[serde(default)]
    pub context: HashMap<String, Value>, // 自由上下文（年龄、性别、备注等）
    pub vitals: Map<String, Value>,      // 血管 -> 指标对象，另含保留比值键
}

/// 单条血管测量的类型化视图
///
/// 并非所有血管都携带全部指标（例如 ECA 没有 IMT），缺失或非数值的
/// 字段读为 `None`。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VesselMeasurement {
    pub psv_cm_s: Option<f64>, // 收缩期峰值流速
    pub edv_cm_s: Option<f64>, // 舒张末期流速
    pub imt_mm: Option<f64>,   // 内膜中层厚度
}

impl PatientRecord {
    /// 从JSON文本解析患者记录
    pub fn from_json_str(text: &str) -> Result<Self> {
        let record: PatientRecord = serde_json::from_str(text)?;
        record.validate()?;
        Ok(record)
    }

    /// 从文件读取患者记录
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded patient document from {}", path.display());
        Self::from_json_str(&text)
    }

    /// I/O 边界上的最小验证
    ///
    /// 核心分析对缺失指标总是降级处理，这里只拦住完全无法分析的文档。
    fn validate(&self) -> Result<()> {
        if self.vitals.is_empty() {
            return Err(CarotidError::Validation(
                "vitals 为空，没有可分析的测量数据".to_string(),
            ));
        }
        Ok(())
    }

    /// 取指定血管的类型化测量视图
    ///
    /// 保留比值键不是血管，查询它返回 `None`。
    pub fn vessel(&self, name: &str) -> Option<VesselMeasurement> {
        if name == metrics::RATIO_KEY {
            return None;
        }
        self.vitals.get(name)?.as_object()?;
        Some(VesselMeasurement {
            psv_cm_s: metrics::metric_value(&self.vitals, name, PSV_KEY),
            edv_cm_s: metrics::metric_value(&self.vitals, name, EDV_KEY),
            imt_mm: metrics::metric_value(&self.vitals, name, IMT_KEY),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_json() -> String {
        json!({
            "patient_id": "12345",
            "name": "adam cook",
            "timestamp": "2025-01-01T00:00:00Z",
            "context": {"age_years": 60, "sex": "unknown"},
            "vitals": {
                "CCA": {"psv_cm_s": 100.0, "edv_cm_s": 30.0, "imt_mm": 0.8},
                "ICA": {"psv_cm_s": 150.0, "edv_cm_s": 35.0},
                "ica_cca_ratio": 1.5
            }
        })
        .to_string()
    }

    #[test]
    fn test_from_json_str() {
        let record = PatientRecord::from_json_str(&sample_json()).unwrap();
        assert_eq!(record.patient_id, "12345");
        assert_eq!(record.vitals.len(), 3);
    }

    #[test]
    fn test_empty_vitals_rejected() {
        let text = json!({
            "patient_id": "1", "name": "x", "timestamp": "t", "vitals": {}
        })
        .to_string();
        assert!(matches!(
            PatientRecord::from_json_str(&text),
            Err(CarotidError::Validation(_))
        ));
    }

    #[test]
    fn test_vessel_view() {
        let record = PatientRecord::from_json_str(&sample_json()).unwrap();
        let ica = record.vessel("ICA").unwrap();
        assert_eq!(ica.psv_cm_s, Some(150.0));
        assert_eq!(ica.imt_mm, None);
        // 保留比值键不是血管
        assert!(record.vessel("ica_cca_ratio").is_none());
    }
}
