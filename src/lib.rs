//! # Product Image Audit
//!
//! 批量检查订单 HTML 预览中的商品图片：渲染每个与 PDF 成对的 HTML 文件，
//! 找出缺失、被容器裁切、单页多图的情况，并导出图片截图。
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有浏览器 Page，只暴露导航、DOM 读取、截图能力
//! - `PageDriver` - 流程层依赖的抽象
//!
//! ### ② 业务能力层（Services）
//! - `ImageClassifier` - 判断是否存在真实商品图片
//! - `HeightChecker` - 图片高度 / 裁切检查
//! - `ImageExtractor` - 导出图片截图
//! - `extract_pdf_images` - 导出 PDF 内嵌图片
//!
//! ### ③ 流程层（Workflow）
//! - `StemCtx` - 单个文件的上下文
//! - `StemFlow` - 单个文件的检查流程
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 浏览器生命周期与逐个文件处理

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::{Config, Selectors};
pub use error::{AppResult, AuditError};
pub use infrastructure::{ChromePage, PageDriver};
pub use models::{RunReport, StemOutcome};
pub use orchestrator::{process_stems, App};
pub use workflow::{StemCtx, StemFlow};
