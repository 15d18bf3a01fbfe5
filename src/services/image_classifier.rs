//! 图片分类服务 - 业务能力层
//!
//! 判断页面中是否存在真实的商品图片

use tracing::debug;

use crate::config::Selectors;
use crate::error::AppResult;
use crate::infrastructure::PageDriver;
use crate::models::{ImageProbe, MissingReason};

/// 商品图片存在性判断结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// 至少一张真实图片
    Present { real: usize, fake: usize },
    Missing(MissingReason),
}

/// 根据图片元素判断是否存在真实商品图片
pub fn classify_presence(images: &[ImageProbe]) -> Presence {
    if images.is_empty() {
        return Presence::Missing(MissingReason::NoElements);
    }

    let fake = images.iter().filter(|image| image.is_fake()).count();
    let real = images.len() - fake;

    if real == 0 {
        Presence::Missing(MissingReason::AllFake)
    } else {
        Presence::Present { real, fake }
    }
}

/// 图片分类服务
pub struct ImageClassifier {
    selectors: Selectors,
}

impl ImageClassifier {
    pub fn new(selectors: Selectors) -> Self {
        Self { selectors }
    }

    /// 读取当前页面的商品图片并判断是否存在
    pub async fn check_presence<D: PageDriver>(&self, driver: &D) -> AppResult<Presence> {
        let images = driver.probe_images(&self.selectors).await?;
        let presence = classify_presence(&images);
        debug!(
            "找到 {} 个 {} 元素: {:?}",
            images.len(),
            self.selectors.product_image,
            presence
        );
        Ok(presence)
    }
}
