use clap::Parser;
use launch_dash::adapters::source_from_config;
use launch_dash::utils::error::{DashError, ErrorSeverity};
use launch_dash::utils::logger;
use launch_dash::{load_table, CliConfig, Dashboard, WebServer, WebServerConfig};

fn report_failure(stage: &str, e: &DashError) -> ! {
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        stage,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 配置錯誤時日誌尚未依 TOML 設定，先用命令列旗標初始化
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            report_failure("Configuration", &e);
        }
    };

    logger::init_logger(
        cli.verbose,
        cli.json_logs || config.json_logs(),
        config.log_level(),
    );

    tracing::info!("Starting launch-dash");
    tracing::debug!("Resolved config: {:?}", config);

    let source = match source_from_config(&config) {
        Ok(source) => source,
        Err(e) => report_failure("Dataset source setup", &e),
    };

    let table = match load_table(source.as_ref()).await {
        Ok(table) => table,
        Err(e) => report_failure("Dataset load", &e),
    };

    let dashboard = Dashboard::new(table, config.slider_settings());
    let server = WebServer::new(WebServerConfig::from_provider(&config), dashboard);

    if let Err(e) = server.run().await {
        report_failure("Web server", &e);
    }

    Ok(())
}
