//! 文件检查流程 - 流程层
//!
//! 核心职责：定义"一个文件"的完整检查流程
//!
//! 流程顺序：
//! 1. 渲染 HTML
//! 2. 商品图片存在性检查（缺失则结束）
//! 3. 图片高度检查
//! 4. 导出图片截图
//! 5. 多图检查
//! 6. 导出 PDF 内嵌图片（可选）

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AppResult, AuditError};
use crate::infrastructure::PageDriver;
use crate::models::{StemFindings, StemOutcome};
use crate::services::{extract_pdf_images, HeightChecker, ImageClassifier, ImageExtractor, Presence};
use crate::workflow::StemCtx;

/// 文件检查流程
///
/// - 不持有任何资源（page），通过 `PageDriver` 访问页面
/// - 只依赖业务能力（services）
pub struct StemFlow {
    config: Config,
    classifier: ImageClassifier,
    height_checker: HeightChecker,
    extractor: ImageExtractor,
}

impl StemFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            classifier: ImageClassifier::new(config.selectors.clone()),
            height_checker: HeightChecker::new(config.selectors.clone()),
            extractor: ImageExtractor::new(config.selectors.clone()),
        }
    }

    /// 处理单个文件，任何错误都转换为 `StemOutcome::Failed`
    pub async fn run<D: PageDriver>(&self, driver: &D, ctx: &StemCtx) -> StemOutcome {
        match self.inspect(driver, ctx).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{} ❌ 未知场景: {}", ctx, e);
                StemOutcome::Failed(e.to_string())
            }
        }
    }

    async fn inspect<D: PageDriver>(&self, driver: &D, ctx: &StemCtx) -> AppResult<StemOutcome> {
        driver.open(ctx.html_url()?.as_str()).await?;

        // ========== 1. 存在性检查 ==========
        match self.classifier.check_presence(driver).await? {
            Presence::Missing(reason) => {
                warn!("{} ⚠️ 缺少商品图片: {}", ctx, reason);
                return Ok(StemOutcome::MissingImage(reason));
            }
            Presence::Present { real, fake } => {
                info!("{} 找到 {} 张商品图片 ({} 张占位图)", ctx, real, fake);
            }
        }

        let containers = driver.probe_containers(&self.config.selectors).await?;

        // ========== 2. 高度检查 ==========
        let too_tall = self.height_checker.check(driver, ctx, &containers).await?;

        // ========== 3. 导出截图 ==========
        let extracted = self.extractor.extract(driver, ctx, &containers).await?;

        let mut findings = StemFindings {
            too_tall,
            extracted,
            pdf_images: 0,
        };

        // ========== 4. 多图检查 ==========
        if findings.has_multiple_images() {
            warn!("{} ⚠️ 页面包含 {} 张图片", ctx, findings.extracted);
        } else if findings.is_clean() {
            info!("{} ✓ 检查通过", ctx);
        }

        // ========== 5. PDF 图片 ==========
        if self.config.extract_pdf_images {
            findings.pdf_images = self.extract_pdf(ctx).await?;
        }

        Ok(StemOutcome::Inspected(findings))
    }

    async fn extract_pdf(&self, ctx: &StemCtx) -> AppResult<usize> {
        let pdf_path = ctx.pdf_path.clone();
        let output_dir = ctx.pdf_images_dir();

        let written =
            tokio::task::spawn_blocking(move || extract_pdf_images(&pdf_path, &output_dir))
                .await
                .map_err(|e| AuditError::pdf(&ctx.pdf_path, e))??;

        info!("{} PDF 中导出 {} 张图片", ctx, written.len());
        Ok(written.len())
    }
}
