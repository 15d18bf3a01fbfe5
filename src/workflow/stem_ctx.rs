//! 文件处理上下文
//!
//! 封装"我正在处理第几个文件、它的输入输出在哪里"这一信息

use std::fmt::Display;
use std::path::{Path, PathBuf};

use url::Url;

use crate::config::Config;
use crate::error::{AppResult, AuditError};

/// 单个文件的处理上下文
#[derive(Debug, Clone)]
pub struct StemCtx {
    /// 文件名主干
    pub stem: String,

    /// 文件序号（从1开始，仅用于日志显示）
    pub index: usize,

    /// 文件总数
    pub total: usize,

    pub html_path: PathBuf,
    pub pdf_path: PathBuf,

    /// 截图输出目录
    pub images_dir: PathBuf,
}

impl StemCtx {
    pub fn new(config: &Config, stem: &str, index: usize, total: usize) -> Self {
        Self {
            stem: stem.to_string(),
            index,
            total,
            html_path: config.html_path(stem),
            pdf_path: config.pdf_path(stem),
            images_dir: config.stem_images_folder(stem),
        }
    }

    /// HTML 文件的 `file://` 地址
    pub fn html_url(&self) -> AppResult<Url> {
        file_url(&self.html_path)
    }

    /// 第 `number` 张真实图片的输出路径
    pub fn image_path(&self, number: usize) -> PathBuf {
        self.images_dir.join(format!("{}.png", number))
    }

    pub fn containers_dir(&self) -> PathBuf {
        self.images_dir.join("containers")
    }

    pub fn pdf_images_dir(&self) -> PathBuf {
        self.images_dir.join("pdf")
    }
}

impl Display for StemCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文件 {}/{} {}]", self.index, self.total, self.stem)
    }
}

/// 本地文件转为 `file://` URL，相对路径按当前工作目录展开
fn file_url(path: &Path) -> AppResult<Url> {
    let absolute = std::path::absolute(path).map_err(|e| AuditError::io(path, e))?;
    Url::from_file_path(&absolute).map_err(|_| AuditError::InvalidFilePath { path: absolute })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_from_config() {
        let config = Config::default().with_input_folder("/orders");
        let ctx = StemCtx::new(&config, "A-7", 2, 5);

        assert_eq!(ctx.html_url().unwrap().as_str(), "file:///orders/A-7.html");
        assert_eq!(ctx.image_path(0), PathBuf::from("images/A-7/0.png"));
        assert_eq!(ctx.image_path(3), PathBuf::from("images/A-7/3.png"));
        assert_eq!(ctx.containers_dir(), PathBuf::from("images/A-7/containers"));
        assert_eq!(ctx.pdf_images_dir(), PathBuf::from("images/A-7/pdf"));
        assert_eq!(ctx.to_string(), "[文件 2/5 A-7]");
    }

    #[test]
    fn test_url_escapes_reserved_characters() {
        let config = Config::default().with_input_folder("/my orders");
        let ctx = StemCtx::new(&config, "#1", 1, 1);

        assert_eq!(ctx.html_url().unwrap().as_str(), "file:///my%20orders/%231.html");
    }

    #[test]
    fn test_url_keeps_backslash_and_non_ascii_in_one_segment() {
        let config = Config::default().with_input_folder("/orders");
        let ctx = StemCtx::new(&config, r"订单\1", 1, 1);

        assert_eq!(
            ctx.html_url().unwrap().as_str(),
            "file:///orders/%E8%AE%A2%E5%8D%95%5C1.html"
        );
    }

    #[test]
    fn test_relative_folder_becomes_absolute_url() {
        let config = Config::default().with_input_folder("orders");
        let ctx = StemCtx::new(&config, "A-7", 1, 1);

        let url = ctx.html_url().unwrap();
        assert_eq!(url.scheme(), "file");
        assert_eq!(url.to_file_path().unwrap(), std::path::absolute("orders/A-7.html").unwrap());
    }
}
