/// 日志工具模块
///
/// 提供启动信息与最终报告的输出
use tracing::info;

use crate::config::Config;
use crate::models::RunReport;

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 商品图片检查启动");
    info!("📂 输入目录: {}", config.input_folder.display());
    info!("🖼  输出目录: {}", config.images_folder.display());
    if config.extract_pdf_images {
        info!("📄 同时导出 PDF 内嵌图片");
    }
    info!("{}", "=".repeat(60));
}

/// 最终报告的各行内容，四类异常依次输出
pub fn report_lines(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!("缺少商品图片 ({}):", report.missing_images.len()));
    lines.extend(
        report
            .missing_images
            .iter()
            .map(|(stem, reason)| format!("  - {} ({})", stem, reason)),
    );

    lines.push(format!("图片高于容器 ({}):", report.too_tall.len()));
    lines.extend(report.too_tall.iter().map(|tall| format!("  - {}", tall)));

    lines.push(format!("单页多张图片 ({}):", report.multiple_images.len()));
    lines.extend(report.multiple_images.iter().map(|stem| format!("  - {}", stem)));

    lines.push(format!("未知场景 ({}):", report.unknown_scenarios.len()));
    lines.extend(
        report
            .unknown_scenarios
            .iter()
            .map(|(stem, detail)| format!("  - {}: {}", stem, detail)),
    );

    lines
}

/// 打印最终报告
pub fn print_final_report(report: &RunReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 检查完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("共处理 {} 个文件，发现 {} 条异常", report.processed, report.anomaly_count());
    info!("{}", "=".repeat(60));
    for line in report_lines(report) {
        info!("{}", line);
    }
    info!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MissingReason, StemOutcome};

    #[test]
    fn test_sections_in_order() {
        let mut report = RunReport::new();
        report.record("a", StemOutcome::MissingImage(MissingReason::AllFake));
        report.record("b", StemOutcome::Failed("超时".to_string()));

        let lines = report_lines(&report);
        assert_eq!(
            lines,
            vec![
                "缺少商品图片 (1):",
                "  - a (只有占位图)",
                "图片高于容器 (0):",
                "单页多张图片 (0):",
                "未知场景 (1):",
                "  - b: 超时",
            ]
        );
    }
}
