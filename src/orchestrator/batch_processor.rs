//! 批量文件处理器 - 编排层
//!
//! 本模块是整个应用的入口，持有浏览器会话，
//! 整个运行期间只启动一次浏览器，所有文件共用同一个页面，依次处理。

use tracing::{info, warn};

use crate::browser::BrowserSession;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::{ChromePage, PageDriver};
use crate::models::{scan_stem_pairs, RunReport};
use crate::utils::logging;
use crate::workflow::{StemCtx, StemFlow};

/// 应用主结构
pub struct App {
    config: Config,
    session: BrowserSession,
    driver: ChromePage,
}

impl App {
    /// 初始化应用：启动无头浏览器
    pub async fn initialize(config: Config) -> AppResult<Self> {
        logging::log_startup(&config);

        let (session, page) = BrowserSession::launch(config.chrome_executable.as_deref()).await?;

        Ok(Self {
            config,
            session,
            driver: ChromePage::new(page),
        })
    }

    /// 运行应用主逻辑
    ///
    /// 无论处理过程是否出错，浏览器都会被关闭。
    pub async fn run(self) -> AppResult<RunReport> {
        let result = self.audit().await;
        self.session.close().await;
        result
    }

    async fn audit(&self) -> AppResult<RunReport> {
        info!("📁 正在扫描: {}", self.config.input_folder.display());
        let stems = scan_stem_pairs(&self.config.input_folder).await?;

        if stems.is_empty() {
            warn!("⚠️ 没有找到成对的 .html / .pdf 文件");
        } else {
            info!("✓ 找到 {} 对待分析的文件", stems.len());
        }

        Ok(process_stems(&self.driver, &self.config, &stems).await)
    }
}

/// 依次处理所有文件并汇总结果
pub async fn process_stems<D: PageDriver>(
    driver: &D,
    config: &Config,
    stems: &[String],
) -> RunReport {
    let flow = StemFlow::new(config);
    let mut report = RunReport::new();

    for (idx, stem) in stems.iter().enumerate() {
        let ctx = StemCtx::new(config, stem, idx + 1, stems.len());
        info!("{} 开始分析", ctx);

        let outcome = flow.run(driver, &ctx).await;
        report.record(stem, outcome);

        info!("{} 完成", ctx);
    }

    report
}
