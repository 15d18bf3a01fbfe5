use std::path::Path;

use crate::config::Selectors;
use crate::error::AppResult;
use crate::models::{ContainerProbe, ImageProbe};

/// 页面驱动
///
/// 流程层只依赖这个 trait，不直接接触浏览器。
/// 容器按 `querySelectorAll` 的顺序编号，截图时使用同一编号。
#[allow(async_fn_in_trait)]
pub trait PageDriver {
    /// 导航到指定 URL
    async fn open(&self, url: &str) -> AppResult<()>;

    /// 读取页面中所有匹配的商品图片
    async fn probe_images(&self, selectors: &Selectors) -> AppResult<Vec<ImageProbe>>;

    /// 读取所有容器及其内部的商品图片
    async fn probe_containers(&self, selectors: &Selectors) -> AppResult<Vec<ContainerProbe>>;

    /// 对第 `index` 个容器截图
    async fn capture_container(
        &self,
        selectors: &Selectors,
        index: usize,
        path: &Path,
    ) -> AppResult<()>;

    /// 对第 `index` 个容器内的商品图片截图
    async fn capture_image(
        &self,
        selectors: &Selectors,
        index: usize,
        path: &Path,
    ) -> AppResult<()>;
}
