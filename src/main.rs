use std::sync::Arc;
use tally_report_bridge::{router, source, AppConfig, AppState, ReportService};
use tracing::info;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志 - 本地时间格式，RUST_LOG 控制级别
    tracing_subscriber::fmt()
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    // 加载配置
    let config = AppConfig::load()?;
    info!("Starting server with config: {:?}", config);

    // 数据源: 每次请求独立连接，这里只保存连接描述
    let source = source::connect(&config.datasource)?;
    info!("Data source: {}", source.describe());

    let state = AppState {
        reports: Arc::new(ReportService::new(source)),
    };
    let app = router(state);

    // 启动服务器
    let addr = config.listen_addr();
    info!("Server listening on {}", addr);
    info!("Endpoints:");
    info!("  GET /                          - Dashboard (first company balance sheet)");
    info!("  GET /company-list              - Companies");
    info!("  GET /company-details?company=  - All reports for a company");
    info!("  GET /api/company-details       - JSON reports");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
