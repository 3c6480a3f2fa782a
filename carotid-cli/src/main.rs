//! 颈动脉报告命令行主程序

mod mock;

use anyhow::{bail, Context, Result};
use carotid_analysis::{stats, RiskLevel, RuleTable};
use carotid_core::PatientRecord;
use carotid_report::{build_report_model, render_html};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "carotid-cli")]
#[command(about = "颈动脉多普勒描述性报告生成器 (HTML)")]
struct Args {
    /// 输入JSON文档路径
    #[arg(long = "in", value_name = "PATH")]
    in_path: Option<PathBuf>,

    /// 生成模拟记录代替读取输入
    #[arg(long)]
    generate_mock: bool,

    /// 模拟数据随机种子
    #[arg(long)]
    seed: Option<u64>,

    /// 输出目录
    #[arg(short, long, default_value = "out")]
    out_dir: PathBuf,

    /// 规则表档位
    #[arg(long, value_enum, default_value = "standard")]
    profile: Profile,

    /// 日志级别
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

/// 规则表档位选择
#[derive(ValueEnum, Clone, Copy, Debug)]
enum Profile {
    /// 稀疏档位：只输出异常发现
    Standard,
    /// 详尽档位：每个适用字段恰好一条消息
    Verbose,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(args.log_level.as_str())
        .init();

    let record = if args.generate_mock {
        let record = mock::generate_mock(args.seed);
        info!("Generated mock record for patient {}", record.patient_id);
        record
    } else {
        let path = match &args.in_path {
            Some(path) => path,
            None => bail!("请提供 --in <path> 或使用 --generate-mock"),
        };
        let record = PatientRecord::from_path(path)
            .with_context(|| format!("读取输入文档失败: {}", path.display()))?;
        info!("Loaded record for patient {}", record.patient_id);
        record
    };

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("创建输出目录失败: {}", args.out_dir.display()))?;

    // 回写规范化输入，便于核对
    let normalized = args.out_dir.join("normalized_input.json");
    fs::write(&normalized, serde_json::to_string_pretty(&record)?)?;

    let table = match args.profile {
        Profile::Standard => RuleTable::standard(),
        Profile::Verbose => RuleTable::verbose(),
    };
    let findings = table.evaluate(&record.vitals);
    let risk_level = RiskLevel::from_findings(&findings);
    let stats = stats::analyze(&record);
    info!("{} finding(s), risk level: {}", findings.len(), risk_level);

    let analysis_out = args.out_dir.join("analysis.json");
    let analysis = serde_json::json!({
        "stats": &stats,
        "findings": &findings,
        "risk_level": risk_level,
    });
    fs::write(&analysis_out, serde_json::to_string_pretty(&analysis)?)?;

    let model = build_report_model(&record, findings, risk_level, stats);
    let html = render_html(&model);
    let report_out = args.out_dir.join("report.html");
    fs::write(&report_out, html)?;

    info!("Wrote: {}", normalized.display());
    info!("Wrote: {}", analysis_out.display());
    info!("Wrote: {}", report_out.display());

    Ok(())
}
