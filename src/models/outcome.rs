//! 单个文件的检查结果

use std::fmt::{self, Display};

/// 判定为"缺少商品图片"的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingReason {
    /// 页面中没有任何匹配的图片元素
    NoElements,
    /// 有匹配的元素，但全部是占位图
    AllFake,
}

impl Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::NoElements => write!(f, "没有图片元素"),
            MissingReason::AllFake => write!(f, "只有占位图"),
        }
    }
}

/// 超出容器高度的图片
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallImage {
    pub stem: String,
    /// 容器在页面中的序号（从 0 开始）
    pub container_index: usize,
    pub image_height: i64,
    pub container_height: i64,
}

impl Display for TallImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (容器 #{}: 图片 {}px > 容器 {}px)",
            self.stem, self.container_index, self.image_height, self.container_height
        )
    }
}

/// 完整检查后得到的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StemFindings {
    pub too_tall: Vec<TallImage>,
    /// 导出的真实图片数量
    pub extracted: usize,
    /// 从 PDF 中导出的图片数量（未启用时为 0）
    pub pdf_images: usize,
}

impl StemFindings {
    pub fn has_multiple_images(&self) -> bool {
        self.extracted > 1
    }

    pub fn is_clean(&self) -> bool {
        self.too_tall.is_empty() && !self.has_multiple_images()
    }
}

/// 单个文件的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StemOutcome {
    /// 完成全部检查
    Inspected(StemFindings),
    /// 缺少商品图片，后续检查未执行
    MissingImage(MissingReason),
    /// 处理过程中出现意外错误
    Failed(String),
}
