use std::path::Path;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::error::{AppResult, AuditError};

/// 一次运行期间共享的无头浏览器
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
}

impl BrowserSession {
    /// 启动无头浏览器并打开一个空白页面
    pub async fn launch(chrome_executable: Option<&Path>) -> AppResult<(Self, Page)> {
        info!("🚀 启动无头浏览器...");

        let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
            "--disable-gpu",           // 无头模式下禁用 GPU
            "--no-sandbox",            // 容器内运行时沙盒会导致崩溃
            "--disable-dev-shm-usage", // 防止共享内存不足
        ]);
        if let Some(executable) = chrome_executable {
            debug!("使用浏览器: {}", executable.display());
            builder = builder.chrome_executable(executable);
        }

        let config = builder.build().map_err(|e| {
            error!("配置无头浏览器失败: {}", e);
            AuditError::BrowserLaunch(e)
        })?;

        let (browser, mut handler) = Browser::launch(config).await.map_err(|e| {
            error!("启动无头浏览器失败: {}", e);
            AuditError::BrowserLaunch(e.to_string())
        })?;
        debug!("无头浏览器启动成功");

        // 在后台处理浏览器事件
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        // 等待浏览器状态同步
        sleep(tokio::time::Duration::from_millis(300)).await;

        let page = browser.new_page("about:blank").await.map_err(|e| {
            error!("创建页面失败: {}", e);
            AuditError::BrowserLaunch(e.to_string())
        })?;

        info!("✅ 无头浏览器已就绪");
        Ok((
            Self {
                browser,
                handler_task,
            },
            page,
        ))
    }

    /// 关闭浏览器并等待事件任务退出
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            warn!("关闭浏览器失败: {}", e);
        }
        if let Err(e) = self.browser.wait().await {
            debug!("等待浏览器进程退出失败: {}", e);
        }
        if let Err(e) = self.handler_task.await {
            debug!("浏览器事件任务异常退出: {}", e);
        }
        info!("浏览器已关闭");
    }
}
