//! HTML 渲染
//!
//! 用内联模板字符串拼装报告页面，不引入模板引擎。PDF 栅格化不在
//! 套件范围内，渲染到 HTML 为止。

use crate::model::ReportModel;

/// HTML 转义，仅处理进入标签文本的动态值
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// 将报告模型渲染为完整的 HTML 页面
pub fn render_html(model: &ReportModel) -> String {
    let mut html = String::new();
    html.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Carotid Doppler Report</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 2em; color: #222; }}
        h1 {{ border-bottom: 2px solid #336; padding-bottom: 0.2em; }}
        h2 {{ color: #336; margin-top: 1.2em; }}
        table {{ border-collapse: collapse; margin: 0.5em 0; }}
        th, td {{ border: 1px solid #aaa; padding: 0.3em 0.8em; text-align: left; }}
        th {{ background: #eef; }}
        .risk {{ font-weight: bold; font-size: 1.2em; }}
        .notes li {{ color: #555; }}
    </style>
</head>
<body>
    <h1>Carotid Doppler Report</h1>
    <p>Patient: {name} (ID: {id})<br>Exam date: {date}</p>
"#,
        name = escape(&model.patient_name),
        id = escape(&model.patient_id),
        date = escape(&model.exam_date),
    ));

    for section in &model.vital_sections {
        html.push_str(&format!("    <h2>{}</h2>\n    <table>\n        <tr><th>Metric</th><th>Value</th><th>Unit</th></tr>\n", escape(&section.vessel)));
        for row in &section.rows {
            html.push_str(&format!(
                "        <tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&row.metric),
                escape(&row.value),
                row.unit
            ));
        }
        html.push_str("    </table>\n");
    }

    if !model.derived_metrics.is_empty() {
        html.push_str("    <h2>Derived metrics</h2>\n    <table>\n        <tr><th>Metric</th><th>Value</th></tr>\n");
        for row in &model.derived_metrics {
            html.push_str(&format!(
                "        <tr><td>{}</td><td>{}</td></tr>\n",
                escape(&row.metric),
                escape(&row.value)
            ));
        }
        html.push_str("    </table>\n");
    }

    html.push_str("    <h2>Findings</h2>\n");
    if model.findings.is_empty() {
        html.push_str("    <p>No abnormal findings.</p>\n");
    } else {
        html.push_str("    <ul>\n");
        for finding in &model.findings {
            html.push_str(&format!("        <li>{}</li>\n", escape(&finding.message)));
        }
        html.push_str("    </ul>\n");
    }

    html.push_str(&format!(
        "    <p class=\"risk\">Risk level: {}</p>\n",
        model.risk_level
    ));

    if !model.stats.notes.is_empty() {
        html.push_str("    <h2>Descriptive notes</h2>\n    <ul class=\"notes\">\n");
        for note in &model.stats.notes {
            html.push_str(&format!("        <li>{}</li>\n", escape(note)));
        }
        html.push_str("    </ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
