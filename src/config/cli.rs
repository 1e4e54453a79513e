use crate::config::toml_config::AppConfig;
use crate::utils::error::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "augsburg-covid-api")]
#[command(about = "COVID-19 figures of the city of Augsburg as a JSON API")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Override the incidence page URL
    #[arg(long, global = true)]
    pub incidence_url: Option<String>,

    /// Override the case numbers page URL
    #[arg(long, global = true)]
    pub cases_url: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Fetch both pages once and print the JSON document
    Fetch,
    /// Serve the JSON document over HTTP
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:3000
        #[arg(long)]
        bind: Option<String>,
    },
}

impl CliConfig {
    /// 載入設定檔並套用命令列覆蓋
    pub fn load_app_config(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(url) = &self.incidence_url {
            config.sources.incidence_url = url.clone();
        }
        if let Some(url) = &self.cases_url {
            config.sources.cases_url = url.clone();
        }
        if let Command::Serve { bind: Some(bind) } = &self.command {
            config.server.bind = bind.clone();
        }

        Ok(config)
    }
}
