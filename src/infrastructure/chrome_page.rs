//! 基于 chromiumoxide 的页面驱动

use std::path::Path;

use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::{Element, Page};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::Selectors;
use crate::error::{AppResult, AuditError};
use crate::infrastructure::PageDriver;
use crate::models::{ContainerProbe, ImageProbe};

/// 描述单个图片元素的 JS 函数，`src` 缺失按空字符串处理
const DESCRIBE_IMAGE_JS: &str = r#"
    (img) => img === null ? null : ({
        src: img.getAttribute('src') ?? '',
        offset_height: img.offsetHeight ?? 0,
    })
"#;

/// 持有整个运行期间复用的 Page
pub struct ChromePage {
    page: Page,
}

impl ChromePage {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行 JS 代码并反序列化为指定类型
    async fn eval_as<T: DeserializeOwned>(&self, js_code: String) -> AppResult<T> {
        let result = self.page.evaluate(js_code).await?;
        let typed_value = result.into_value()?;
        Ok(typed_value)
    }

    /// 按顺序取第 `index` 个容器
    async fn nth_container(&self, selectors: &Selectors, index: usize) -> AppResult<Element> {
        let containers = self.page.find_elements(selectors.image_container.as_str()).await?;
        let total = containers.len();
        containers.into_iter().nth(index).ok_or_else(|| {
            AuditError::Dom(format!(
                "容器 #{} 不存在 (页面共 {} 个 {})",
                index, total, selectors.image_container
            ))
        })
    }
}

impl PageDriver for ChromePage {
    async fn open(&self, url: &str) -> AppResult<()> {
        debug!("导航到: {}", url);
        self.page.goto(url).await.map_err(|source| AuditError::Navigation {
            url: url.to_string(),
            source,
        })?;
        Ok(())
    }

    async fn probe_images(&self, selectors: &Selectors) -> AppResult<Vec<ImageProbe>> {
        let js_code = format!(
            "(() => {{ const describe = {}; return Array.from(document.querySelectorAll({})).map(describe); }})()",
            DESCRIBE_IMAGE_JS,
            serde_json::to_string(&selectors.product_image)?
        );
        self.eval_as(js_code).await
    }

    async fn probe_containers(&self, selectors: &Selectors) -> AppResult<Vec<ContainerProbe>> {
        let js_code = format!(
            r#"(() => {{
                const describe = {};
                return Array.from(document.querySelectorAll({})).map((container) => ({{
                    offset_height: container.offsetHeight ?? 0,
                    image: describe(container.querySelector({})),
                }}));
            }})()"#,
            DESCRIBE_IMAGE_JS,
            serde_json::to_string(&selectors.image_container)?,
            serde_json::to_string(&selectors.product_image)?
        );
        self.eval_as(js_code).await
    }

    async fn capture_container(
        &self,
        selectors: &Selectors,
        index: usize,
        path: &Path,
    ) -> AppResult<()> {
        let container = self.nth_container(selectors, index).await?;
        container
            .save_screenshot(CaptureScreenshotFormat::Png, path)
            .await
            .map_err(|source| AuditError::Screenshot {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(())
    }

    async fn capture_image(
        &self,
        selectors: &Selectors,
        index: usize,
        path: &Path,
    ) -> AppResult<()> {
        let container = self.nth_container(selectors, index).await?;
        let image = container
            .find_element(selectors.product_image.as_str())
            .await
            .map_err(|_| AuditError::NestedImageMissing {
                container_index: index,
            })?;
        image
            .save_screenshot(CaptureScreenshotFormat::Png, path)
            .await
            .map_err(|source| AuditError::Screenshot {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(())
    }
}
