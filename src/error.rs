use std::path::PathBuf;

use thiserror::Error;

/// 应用程序错误类型
///
/// 单个文件处理过程中出现的错误会被编排层捕获，记录为"未知场景"，
/// 不会中断整个批次。
#[derive(Debug, Error)]
pub enum AuditError {
    /// 输入文件夹无法读取
    #[error("无法读取文件夹 {path}: {source}")]
    FolderUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 启动或配置浏览器失败
    #[error("浏览器启动失败: {0}")]
    BrowserLaunch(String),

    /// 页面导航失败
    #[error("导航到 {url} 失败: {source}")]
    Navigation {
        url: String,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    /// 本地路径无法转换为 `file://` 地址
    #[error("无法转换为 file:// 地址: {path}")]
    InvalidFilePath { path: PathBuf },

    /// DOM 查询或脚本执行失败
    #[error("DOM 访问失败: {0}")]
    Dom(String),

    /// 容器内没有找到商品图片元素
    #[error("第 {container_index} 个容器中没有找到商品图片")]
    NestedImageMissing { container_index: usize },

    /// 截图失败
    #[error("截图保存失败 ({path}): {source}")]
    Screenshot {
        path: PathBuf,
        #[source]
        source: chromiumoxide::error::CdpError,
    },

    /// 文件读写失败
    #[error("文件操作失败 ({path}): {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// PDF 解析失败
    #[error("PDF 解析失败 ({path}): {detail}")]
    Pdf { path: PathBuf, detail: String },

    /// PDF 中的图片编码不受支持
    #[error("图片 {name} 无法解码: {detail}")]
    UnsupportedImage { name: String, detail: String },
}

impl From<chromiumoxide::error::CdpError> for AuditError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AuditError::Dom(err.to_string())
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Dom(format!("无法解析页面返回的 JSON: {}", err))
    }
}

// ========== 便捷构造函数 ==========

impl AuditError {
    /// 创建文件操作错误
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AuditError::Io {
            path: path.into(),
            source,
        }
    }

    /// 创建 PDF 解析错误
    pub fn pdf(path: impl Into<PathBuf>, detail: impl ToString) -> Self {
        AuditError::Pdf {
            path: path.into(),
            detail: detail.to_string(),
        }
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AuditError>;
