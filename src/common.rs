use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use lrt_core::{RequestOutcome, SimulationReport};

/// 逐条请求的控制台输出
pub fn render_outcome(request_id: u64, outcome: &RequestOutcome) -> String {
    format!(
        "Request {} routed to {}, Response Time: {:.3}s",
        request_id + 1,
        outcome.worker_id,
        outcome.latency
    )
}

/// 最终指标与请求分布摘要
pub fn render_summary(report: &SimulationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Final Server Metrics (Avg Response Time):");
    for worker in &report.workers {
        let _ = writeln!(out, "{}: {}", worker.worker_id, worker.average_latency);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Request Distribution:");
    for worker in &report.workers {
        let _ = writeln!(out, "{}: {} requests", worker.worker_id, worker.request_count);
    }
    out
}

/// 将报告写为JSON，供外部绘图工具按Worker绘制 (request_id, latency) 散点
pub fn write_report(report: &SimulationReport, path: &Path) -> Result<()> {
    let json = report.to_json().context("序列化模拟报告失败")?;
    std::fs::write(path, json)
        .with_context(|| format!("写入模拟报告失败: {}", path.display()))?;
    Ok(())
}
