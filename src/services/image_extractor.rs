//! 图片导出服务 - 业务能力层

use tokio::fs;
use tracing::debug;

use crate::config::Selectors;
use crate::error::{AppResult, AuditError};
use crate::infrastructure::PageDriver;
use crate::models::ContainerProbe;
use crate::workflow::StemCtx;

/// 需要导出的容器序号（按容器顺序，跳过占位图）
pub fn plan_extraction(containers: &[ContainerProbe]) -> AppResult<Vec<usize>> {
    let mut planned = Vec::new();

    for (container_index, container) in containers.iter().enumerate() {
        let image = container
            .image
            .as_ref()
            .ok_or(AuditError::NestedImageMissing { container_index })?;
        if !image.is_fake() {
            planned.push(container_index);
        }
    }

    Ok(planned)
}

/// 图片导出服务
///
/// 真实图片依次保存为 `0.png`、`1.png`……
pub struct ImageExtractor {
    selectors: Selectors,
}

impl ImageExtractor {
    pub fn new(selectors: Selectors) -> Self {
        Self { selectors }
    }

    /// 导出所有真实图片的截图，返回导出数量
    pub async fn extract<D: PageDriver>(
        &self,
        driver: &D,
        ctx: &StemCtx,
        containers: &[ContainerProbe],
    ) -> AppResult<usize> {
        fs::create_dir_all(&ctx.images_dir)
            .await
            .map_err(|e| AuditError::io(&ctx.images_dir, e))?;

        let planned = plan_extraction(containers)?;
        for (image_number, container_index) in planned.iter().enumerate() {
            let path = ctx.image_path(image_number);
            driver
                .capture_image(&self.selectors, *container_index, &path)
                .await?;
            debug!("{} 已导出图片: {}", ctx, path.display());
        }

        Ok(planned.len())
    }
}
