pub mod toml_config;

pub use toml_config::ServeConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "house-price-serve")]
#[command(about = "Serve the house price regression model over HTTP")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Directory holding the scaler and estimator artifacts
    #[arg(long)]
    pub model_dir: Option<String>,

    #[arg(long)]
    pub scaler_file: Option<String>,

    #[arg(long)]
    pub model_file: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 設定檔為基礎，命令列參數覆蓋
    pub fn resolve(&self) -> Result<ServeConfig> {
        let mut config = match &self.config {
            Some(path) => ServeConfig::from_file(path)?,
            None => ServeConfig::default(),
        };

        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(model_dir) = &self.model_dir {
            config.artifacts.model_dir = model_dir.clone();
        }
        if let Some(scaler_file) = &self.scaler_file {
            config.artifacts.scaler_file = scaler_file.clone();
        }
        if let Some(model_file) = &self.model_file {
            config.artifacts.model_file = model_file.clone();
        }
        if self.json_logs {
            config.logging.format = "json".to_string();
        }

        Ok(config)
    }
}
