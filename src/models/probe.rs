//! 页面渲染后读取到的 DOM 元素信息

use serde::{Deserialize, Serialize};

/// 商品图片元素
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageProbe {
    /// `src` 属性，缺失时为空字符串
    #[serde(default)]
    pub src: String,
    /// 渲染高度（offsetHeight）
    pub offset_height: i64,
}

impl ImageProbe {
    pub fn new(src: impl Into<String>, offset_height: i64) -> Self {
        Self {
            src: src.into(),
            offset_height,
        }
    }

    /// 占位图：`src` 为空且渲染高度为 0
    pub fn is_fake(&self) -> bool {
        self.src.is_empty() && self.offset_height == 0
    }
}

/// 图片容器元素及其内部的商品图片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerProbe {
    pub offset_height: i64,
    /// 容器内第一个匹配的商品图片
    pub image: Option<ImageProbe>,
}

impl ContainerProbe {
    pub fn new(offset_height: i64, image: Option<ImageProbe>) -> Self {
        Self {
            offset_height,
            image,
        }
    }
}
