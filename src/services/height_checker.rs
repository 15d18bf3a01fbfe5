//! 图片高度检查服务 - 业务能力层
//!
//! 检查商品图片是否被容器裁切（图片渲染高度大于容器高度）

use tokio::fs;
use tracing::{debug, warn};

use crate::config::Selectors;
use crate::error::{AppResult, AuditError};
use crate::infrastructure::PageDriver;
use crate::models::{ContainerProbe, TallImage};
use crate::workflow::StemCtx;

/// 找出所有高于容器的真实图片
///
/// 占位图跳过；容器内没有商品图片时返回错误。
/// 同一文件的多个容器可能分别产生记录。
pub fn find_too_tall(stem: &str, containers: &[ContainerProbe]) -> AppResult<Vec<TallImage>> {
    let mut too_tall = Vec::new();

    for (container_index, container) in containers.iter().enumerate() {
        let image = container
            .image
            .as_ref()
            .ok_or(AuditError::NestedImageMissing { container_index })?;

        if image.is_fake() {
            continue;
        }

        if image.offset_height > container.offset_height {
            too_tall.push(TallImage {
                stem: stem.to_string(),
                container_index,
                image_height: image.offset_height,
                container_height: container.offset_height,
            });
        }
    }

    Ok(too_tall)
}

/// 高度检查服务
pub struct HeightChecker {
    selectors: Selectors,
}

impl HeightChecker {
    pub fn new(selectors: Selectors) -> Self {
        Self { selectors }
    }

    /// 检查图片高度并保存容器截图
    ///
    /// 先完成高度检查，容器缺少商品图片时直接返回错误，不留下任何截图。
    /// 容器截图仅供人工核对，保存在 `<stem>/containers/<序号>.png`。
    pub async fn check<D: PageDriver>(
        &self,
        driver: &D,
        ctx: &StemCtx,
        containers: &[ContainerProbe],
    ) -> AppResult<Vec<TallImage>> {
        let too_tall = find_too_tall(&ctx.stem, containers)?;

        let container_dir = ctx.containers_dir();
        for (index, container) in containers.iter().enumerate() {
            if container.offset_height <= 0 {
                continue;
            }
            fs::create_dir_all(&container_dir)
                .await
                .map_err(|e| AuditError::io(&container_dir, e))?;
            let path = container_dir.join(format!("{}.png", index));
            driver.capture_container(&self.selectors, index, &path).await?;
            debug!("{} 容器截图: {}", ctx, path.display());
        }

        for tall in &too_tall {
            warn!("{} ⚠️ 图片高于容器: {}", ctx, tall);
        }

        Ok(too_tall)
    }
}
