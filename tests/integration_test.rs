use product_image_audit::models::{scan_stem_pairs, ContainerProbe, ImageProbe, MissingReason};
use product_image_audit::{
    logger, process_stems, App, AppResult, AuditError, Config, PageDriver, Selectors,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// 模拟页面内容
#[derive(Clone, Default)]
struct FakePage {
    images: Vec<ImageProbe>,
    containers: Vec<ContainerProbe>,
    /// 读取 DOM 时报错
    broken: bool,
}

impl FakePage {
    fn with_containers(containers: Vec<ContainerProbe>) -> Self {
        let images = containers.iter().filter_map(|c| c.image.clone()).collect();
        Self {
            images,
            containers,
            broken: false,
        }
    }
}

/// 不依赖浏览器的页面驱动，截图时写入占位文件
#[derive(Default)]
struct FakeDriver {
    pages: HashMap<String, FakePage>,
    current: Mutex<Option<String>>,
    captures: Mutex<Vec<PathBuf>>,
}

impl FakeDriver {
    fn with_page(mut self, stem: &str, page: FakePage) -> Self {
        self.pages.insert(stem.to_string(), page);
        self
    }

    fn current_page(&self) -> AppResult<FakePage> {
        let current = self.current.lock().unwrap().clone();
        let page = current
            .and_then(|stem| self.pages.get(&stem).cloned())
            .ok_or_else(|| AuditError::Dom("页面未打开".to_string()))?;
        if page.broken {
            return Err(AuditError::Dom("stale element reference".to_string()));
        }
        Ok(page)
    }

    fn capture(&self, path: &Path) -> AppResult<()> {
        std::fs::write(path, b"png").map_err(|e| AuditError::io(path, e))?;
        self.captures.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn captured(&self) -> Vec<PathBuf> {
        self.captures.lock().unwrap().clone()
    }
}

impl PageDriver for FakeDriver {
    async fn open(&self, url: &str) -> AppResult<()> {
        let stem = self
            .pages
            .keys()
            .find(|stem| url.ends_with(&format!("/{}.html", stem)))
            .cloned()
            .ok_or_else(|| AuditError::Dom(format!("无法打开 {}", url)))?;
        *self.current.lock().unwrap() = Some(stem);
        Ok(())
    }

    async fn probe_images(&self, _selectors: &Selectors) -> AppResult<Vec<ImageProbe>> {
        Ok(self.current_page()?.images)
    }

    async fn probe_containers(&self, _selectors: &Selectors) -> AppResult<Vec<ContainerProbe>> {
        Ok(self.current_page()?.containers)
    }

    async fn capture_container(
        &self,
        _selectors: &Selectors,
        index: usize,
        path: &Path,
    ) -> AppResult<()> {
        let page = self.current_page()?;
        if index >= page.containers.len() {
            return Err(AuditError::Dom(format!("容器 #{} 不存在", index)));
        }
        self.capture(path)
    }

    async fn capture_image(
        &self,
        _selectors: &Selectors,
        index: usize,
        path: &Path,
    ) -> AppResult<()> {
        let page = self.current_page()?;
        match page.containers.get(index).and_then(|c| c.image.as_ref()) {
            Some(_) => self.capture(path),
            None => Err(AuditError::NestedImageMissing {
                container_index: index,
            }),
        }
    }
}

fn real(height: i64) -> Option<ImageProbe> {
    Some(ImageProbe::new("product.png", height))
}

fn fake() -> Option<ImageProbe> {
    Some(ImageProbe::new("", 0))
}

fn test_config(root: &Path) -> Config {
    Config {
        images_folder: root.join("images"),
        ..Config::default()
    }
    .with_input_folder(root.join("orders"))
}

fn stems(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_missing_images_stop_further_checks() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let driver = FakeDriver::default()
        .with_page("empty", FakePage::default())
        .with_page(
            "fakes",
            FakePage::with_containers(vec![ContainerProbe::new(0, fake())]),
        );

    let report = process_stems(&driver, &config, &stems(&["empty", "fakes"])).await;

    assert_eq!(
        report.missing_images,
        vec![
            ("empty".to_string(), MissingReason::NoElements),
            ("fakes".to_string(), MissingReason::AllFake),
        ]
    );
    assert!(report.too_tall.is_empty());
    assert!(report.multiple_images.is_empty());
    assert!(driver.captured().is_empty());
    assert!(!config.stem_images_folder("fakes").exists());
}

#[tokio::test]
async fn test_too_tall_image_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let driver = FakeDriver::default().with_page(
        "tall",
        FakePage::with_containers(vec![ContainerProbe::new(100, real(150))]),
    );

    let report = process_stems(&driver, &config, &stems(&["tall"])).await;

    assert_eq!(report.too_tall_stems(), vec!["tall"]);
    assert_eq!(report.too_tall[0].image_height, 150);
    assert_eq!(report.too_tall[0].container_height, 100);
    assert!(report.multiple_images.is_empty());
    assert!(report.unknown_scenarios.is_empty());
    assert!(config.stem_images_folder("tall").join("0.png").exists());
}

#[tokio::test]
async fn test_two_real_images_are_numbered_and_flagged() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let driver = FakeDriver::default().with_page(
        "double",
        FakePage::with_containers(vec![
            ContainerProbe::new(200, real(180)),
            ContainerProbe::new(0, fake()),
            ContainerProbe::new(200, real(200)),
        ]),
    );

    let report = process_stems(&driver, &config, &stems(&["double"])).await;

    let folder = config.stem_images_folder("double");
    assert!(folder.join("0.png").exists());
    assert!(folder.join("1.png").exists());
    assert!(!folder.join("2.png").exists());
    assert_eq!(report.multiple_images, vec!["double".to_string()]);
    assert!(report.too_tall.is_empty());
}

#[tokio::test]
async fn test_container_screenshots_skip_zero_height() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let driver = FakeDriver::default().with_page(
        "single",
        FakePage::with_containers(vec![
            ContainerProbe::new(0, fake()),
            ContainerProbe::new(120, real(100)),
        ]),
    );

    let report = process_stems(&driver, &config, &stems(&["single"])).await;

    let folder = config.stem_images_folder("single");
    assert_eq!(
        driver.captured(),
        vec![folder.join("containers").join("1.png"), folder.join("0.png")]
    );
    assert_eq!(report.anomaly_count(), 0);
}

#[tokio::test]
async fn test_errors_are_recorded_and_run_continues() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let driver = FakeDriver::default()
        .with_page(
            "broken",
            FakePage {
                broken: true,
                ..FakePage::default()
            },
        )
        .with_page(
            "orphan",
            FakePage {
                images: vec![ImageProbe::new("p.png", 50)],
                containers: vec![ContainerProbe::new(80, None)],
                broken: false,
            },
        )
        .with_page(
            "ok",
            FakePage::with_containers(vec![ContainerProbe::new(100, real(90))]),
        );

    let report = process_stems(&driver, &config, &stems(&["broken", "orphan", "ok"])).await;

    assert_eq!(report.processed, 3);
    let failed: Vec<&str> = report
        .unknown_scenarios
        .iter()
        .map(|(stem, _)| stem.as_str())
        .collect();
    assert_eq!(failed, vec!["broken", "orphan"]);
    assert!(report.unknown_scenarios[0].1.contains("stale element reference"));
    assert!(config.stem_images_folder("ok").join("0.png").exists());
}

#[tokio::test]
async fn test_container_without_image_leaves_no_screenshots() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    let driver = FakeDriver::default().with_page(
        "orphan",
        FakePage {
            images: vec![ImageProbe::new("p.png", 50)],
            containers: vec![
                ContainerProbe::new(120, real(100)),
                ContainerProbe::new(80, None),
            ],
            broken: false,
        },
    );

    let report = process_stems(&driver, &config, &stems(&["orphan"])).await;

    assert_eq!(report.unknown_scenarios.len(), 1);
    assert!(driver.captured().is_empty());
    assert!(!config.stem_images_folder("orphan").join("containers").exists());
}

#[tokio::test]
async fn test_unreadable_pdf_is_an_unknown_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(dir.path());
    config.extract_pdf_images = true;
    std::fs::create_dir_all(&config.input_folder).unwrap();
    std::fs::write(config.pdf_path("order"), b"not a pdf").unwrap();

    let driver = FakeDriver::default().with_page(
        "order",
        FakePage::with_containers(vec![ContainerProbe::new(100, real(90))]),
    );

    let report = process_stems(&driver, &config, &stems(&["order"])).await;

    assert_eq!(report.unknown_scenarios.len(), 1);
    assert!(report.unknown_scenarios[0].1.contains("PDF"));
}

#[tokio::test]
async fn test_scanned_pairs_feed_the_run() {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::create_dir_all(&config.input_folder).unwrap();
    for name in ["a.html", "a.pdf", "b.html", "c.pdf"] {
        std::fs::write(config.input_folder.join(name), b"").unwrap();
    }

    let driver = FakeDriver::default()
        .with_page("a", FakePage::default())
        .with_page("b", FakePage::default());

    let stems = scan_stem_pairs(&config.input_folder).await.unwrap();
    let report = process_stems(&driver, &config, &stems).await;

    assert_eq!(report.processed, 1);
    assert_eq!(report.missing_stems(), vec!["a"]);
}

/// 需要本机安装 Chrome/Chromium：cargo test -- --ignored
#[tokio::test]
#[ignore]
async fn test_real_browser_run() {
    logger::init(true);

    let dir = tempfile::tempdir().unwrap();
    let config = test_config(dir.path());
    std::fs::create_dir_all(&config.input_folder).unwrap();
    std::fs::write(
        config.html_path("order"),
        r#"<html><body>
            <div class="dimensions-container" style="height: 100px; overflow: hidden">
                <img class="product-image" style="display: block; width: 50px; height: 150px; background: red" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=">
            </div>
            <div class="dimensions-container" style="height: 0">
                <img class="product-image" src="" style="display: none">
            </div>
        </body></html>"#,
    )
    .unwrap();
    std::fs::write(config.pdf_path("order"), b"").unwrap();

    let report = App::initialize(config.clone())
        .await
        .expect("启动浏览器失败")
        .run()
        .await
        .expect("运行失败");

    assert_eq!(report.too_tall_stems(), vec!["order"]);
    assert!(report.multiple_images.is_empty());
    assert!(config.stem_images_folder("order").join("0.png").exists());
}
