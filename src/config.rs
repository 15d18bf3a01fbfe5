use std::path::PathBuf;

/// 页面中商品图片相关的 CSS 选择器
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selectors {
    /// 商品图片
    pub product_image: String,
    /// 限定商品图片尺寸的容器
    pub image_container: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            product_image: ".product-image".to_string(),
            image_container: "div.dimensions-container".to_string(),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 存放成对 .html / .pdf 文件的目录
    pub input_folder: PathBuf,
    /// 截图输出根目录
    pub images_folder: PathBuf,
    pub selectors: Selectors,
    /// 浏览器可执行文件路径，为空时由 chromiumoxide 自动查找
    pub chrome_executable: Option<PathBuf>,
    /// 是否同时导出 PDF 中嵌入的图片
    pub extract_pdf_images: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: PathBuf::from("."),
            images_folder: PathBuf::from("images"),
            selectors: Selectors::default(),
            chrome_executable: None,
            extract_pdf_images: false,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            input_folder: default.input_folder,
            images_folder: std::env::var("IMAGES_FOLDER")
                .map(PathBuf::from)
                .unwrap_or(default.images_folder),
            selectors: default.selectors,
            chrome_executable: std::env::var("CHROME_EXECUTABLE")
                .ok()
                .map(PathBuf::from)
                .or(default.chrome_executable),
            extract_pdf_images: std::env::var("EXTRACT_PDF_IMAGES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.extract_pdf_images),
            verbose_logging: std::env::var("VERBOSE_LOGGING")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.verbose_logging),
        }
    }

    /// 设置输入目录
    pub fn with_input_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.input_folder = folder.into();
        self
    }

    /// 某个文件对应的 HTML 路径
    pub fn html_path(&self, stem: &str) -> PathBuf {
        self.input_folder.join(format!("{}.html", stem))
    }

    /// 某个文件对应的 PDF 路径
    pub fn pdf_path(&self, stem: &str) -> PathBuf {
        self.input_folder.join(format!("{}.pdf", stem))
    }

    /// 某个文件的截图输出目录
    pub fn stem_images_folder(&self, stem: &str) -> PathBuf {
        self.images_folder.join(stem)
    }
}
