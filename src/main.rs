use augsburg_covid_api::app::server::create_router;
use augsburg_covid_api::utils::error::ErrorSeverity;
use augsburg_covid_api::utils::{logger, validation::Validate};
use augsburg_covid_api::{AppConfig, CliConfig, Command, HttpSource, ReportEngine, ReportError};
use clap::Parser;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting augsburg-covid-api");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let config = match cli.load_app_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    match cli.command {
        Command::Fetch => fetch(config).await,
        Command::Serve { .. } => serve(config).await,
    }
}

async fn fetch(config: AppConfig) -> anyhow::Result<()> {
    let source = HttpSource::from_config(&config)?;
    let engine = ReportEngine::new(source, config);

    match engine.run().await {
        Ok(envelope) => {
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            tracing::info!("✅ Report generated successfully");
            Ok(())
        }
        Err(e) => {
            report_failure(&e);
            std::process::exit(exit_code(&e));
        }
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let bind = config.server.bind.clone();
    let source = HttpSource::from_config(&config)?;
    let engine = Arc::new(ReportEngine::new(source, config));

    let listener = TcpListener::bind(&bind).await?;
    tracing::info!("🌐 HTTP server listening on {}", bind);

    axum::serve(listener, create_router(engine)).await?;
    Ok(())
}

fn report_failure(e: &ReportError) {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Report failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}

// 根據錯誤嚴重程度決定退出碼
fn exit_code(e: &ReportError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
