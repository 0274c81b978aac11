use anyhow::Result;
use doc_chat_client::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置：可选的 TOML 文件路径，否则只用环境变量
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env(),
    };

    // 初始化日志
    logger::init(config.verbose_logging);

    // 初始化并运行应用
    App::initialize(config).run().await?;

    Ok(())
}
