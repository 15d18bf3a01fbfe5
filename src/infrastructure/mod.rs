//! 基础设施层
//!
//! 唯一持有浏览器 `Page` 的地方，对上层只暴露导航、DOM 读取与截图能力。

pub mod chrome_page;
pub mod page_driver;

pub use chrome_page::ChromePage;
pub use page_driver::PageDriver;
