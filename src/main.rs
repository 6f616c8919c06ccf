use dinemap::{Config, Server, ServerState};

fn setup_environment() -> Config {
    // 加载 .env (仅开发环境需要)
    dotenv::dotenv().ok();

    // 配置先于日志: LOG_DIR 决定是否按天滚动写文件
    let config = Config::from_env();
    dinemap::init_logger_with_file(None, config.log_dir.as_deref());
    config
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. 设置环境 (dotenv, 日志) 并加载配置
    let config = setup_environment();

    tracing::info!("Dinemap server starting...");

    // 2. 初始化服务器状态 (注入文档存储句柄)
    let state = ServerState::initialize(&config);

    // 3. 启动 HTTP 服务器
    let server = Server::with_state(config, state);

    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
