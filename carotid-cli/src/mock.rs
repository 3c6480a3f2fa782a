//! 模拟记录生成
//!
//! 按合理但非医学指导意义的范围生成一条兼容输入模式的患者记录，
//! 供无输入文档时演示与测试使用。支持固定种子以复现。

use carotid_core::PatientRecord;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

const NAMES: [&str; 4] = ["alex martin", "casey lee", "jordan taylor", "morgan kim"];
const SEXES: [&str; 3] = ["unknown", "female", "male"];

/// 闭区间均匀采样并四舍五入到指定小数位
fn rand_range(rng: &mut StdRng, low: f64, high: f64, nd: i32) -> f64 {
    let factor = 10f64.powi(nd);
    (rng.gen_range(low..=high) * factor).round() / factor
}

/// 生成一条模拟患者记录
///
/// 范围：PSV cm/s：CCA 50–200、ICA 70–250、ECA 40–180；
/// EDV cm/s：CCA 10–40、ICA 15–60、ECA 5–35；IMT mm：CCA/ICA 0.4–1.2，
/// ECA 不携带 IMT。派生比值由 ICA/CCA PSV 计算，分母为零时置空。
pub fn generate_mock(seed: Option<u64>) -> PatientRecord {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let cca_psv = rand_range(&mut rng, 50.0, 200.0, 1);
    let cca = json!({
        "psv_cm_s": cca_psv,
        "edv_cm_s": rand_range(&mut rng, 10.0, 40.0, 1),
        "imt_mm": rand_range(&mut rng, 0.4, 1.2, 2),
    });
    let ica_psv = rand_range(&mut rng, 70.0, 250.0, 1);
    let ica = json!({
        "psv_cm_s": ica_psv,
        "edv_cm_s": rand_range(&mut rng, 15.0, 60.0, 1),
        "imt_mm": rand_range(&mut rng, 0.4, 1.2, 2),
    });
    let eca = json!({
        "psv_cm_s": rand_range(&mut rng, 40.0, 180.0, 1),
        "edv_cm_s": rand_range(&mut rng, 5.0, 35.0, 1),
    });
    // 除零防护：分母为零时比值置空
    let ratio = if cca_psv != 0.0 {
        json!((ica_psv / cca_psv * 100.0).round() / 100.0)
    } else {
        Value::Null
    };

    let mut vitals = Map::new();
    vitals.insert("CCA".to_string(), cca);
    vitals.insert("ICA".to_string(), ica);
    vitals.insert("ECA".to_string(), eca);
    vitals.insert("ica_cca_ratio".to_string(), ratio);

    let mut context = HashMap::new();
    context.insert("age_years".to_string(), json!(rng.gen_range(20..=85)));
    context.insert(
        "sex".to_string(),
        json!(SEXES[rng.gen_range(0..SEXES.len())]),
    );
    context.insert("notes".to_string(), json!("Mock record"));

    PatientRecord {
        patient_id: rng.gen_range(10000..=99999u32).to_string(),
        name: NAMES[rng.gen_range(0..NAMES.len())].to_string(),
        timestamp: Utc::now().to_rfc3339(),
        context,
        vitals,
    }
}
