use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use product_image_audit::utils::logging;
use product_image_audit::{logger, App, Config};

/// 检查订单 HTML 中的商品图片
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// 存放成对 .html / .pdf 文件的目录
    location_folder: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = Config::from_env().with_input_folder(cli.location_folder);

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    let report = App::initialize(config).await?.run().await?;
    logging::print_final_report(&report);

    Ok(())
}
