//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! - 管理运行生命周期（启动浏览器、扫描文件、逐个处理、关闭浏览器）
//! - 按目录顺序依次处理每个文件，单个文件失败不影响后续文件
//! - 汇总结果为 `RunReport`
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<stem>)
//!     ↓
//! workflow::StemFlow (处理单个文件)
//!     ↓
//! services (能力层：classifier / height / extractor / pdf)
//!     ↓
//! infrastructure (基础设施：ChromePage)
//! ```

pub mod batch_processor;

pub use batch_processor::{process_stems, App};
