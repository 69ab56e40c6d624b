use clap::Parser;
use house_price_serve::core::artifacts::load_from_source;
use house_price_serve::utils::{logger, validation::Validate};
use house_price_serve::{server, CliConfig, LocalArtifactSource, PredictionService, ServeError};
use std::sync::Arc;

fn exit_with(e: &ServeError) -> ! {
    tracing::error!(
        "❌ Startup failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    // 啟動錯誤一律非 0
    std::process::exit(e.exit_code().max(1));
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // 初始化日誌
    let filter = config.logging.filter.as_deref();
    if config.json_logs() {
        logger::init_json_logger(cli.verbose, filter);
    } else {
        logger::init_text_logger(cli.verbose, filter);
    }

    tracing::info!("Starting house-price-serve");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    // artifact 只在這裡載入一次；失敗就不提供服務
    let source = LocalArtifactSource::new(config.model_dir());
    tracing::info!("📁 Loading artifacts from {}", source.base_path().display());
    let store = match load_from_source(&source, &config.artifact_names()).await {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };

    let service = PredictionService::new(Arc::new(store));
    let listener = match tokio::net::TcpListener::bind(config.bind_address()).await {
        Ok(listener) => listener,
        Err(e) => exit_with(&ServeError::IoError(e)),
    };

    server::serve(listener, service).await?;
    Ok(())
}
