use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use soundfeed_tools::config::{AppConfig, CliConfig, Credentials, FileConfig};
use soundfeed_tools::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig, Services};

#[derive(Parser, Debug)]
#[clap(version, about = "HTTP backend for the Soundfeed music release tools")]
struct CliArgs {
    /// Path to a TOML config file. Values in the file override CLI arguments.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 3001)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Timeout in seconds for requests to the music platforms.
    #[clap(long, default_value_t = 30)]
    pub upstream_timeout_sec: u64,

    #[clap(long, env = "SPOTIFY_CLIENT_ID", hide_env_values = true)]
    pub spotify_client_id: Option<String>,

    #[clap(long, env = "SPOTIFY_CLIENT_SECRET", hide_env_values = true)]
    pub spotify_client_secret: Option<String>,

    #[clap(long, env = "YOUTUBE_API_KEY", hide_env_values = true)]
    pub youtube_api_key: Option<String>,

    #[clap(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub openrouter_api_key: Option<String>,

    /// Facebook app id. Social search is enabled only with both app id and secret.
    #[clap(long, env = "FACEBOOK_APP_ID", hide_env_values = true)]
    pub facebook_app_id: Option<String>,

    #[clap(long, env = "FACEBOOK_APP_SECRET", hide_env_values = true)]
    pub facebook_app_secret: Option<String>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            port: self.port,
            metrics_port: self.metrics_port,
            logging_level: self.logging_level,
            frontend_dir_path: self.frontend_dir_path.clone(),
            upstream_timeout_sec: self.upstream_timeout_sec,
            credentials: Credentials {
                spotify_client_id: self.spotify_client_id.clone(),
                spotify_client_secret: self.spotify_client_secret.clone(),
                youtube_api_key: self.youtube_api_key.clone(),
                openrouter_api_key: self.openrouter_api_key.clone(),
                facebook_app_id: self.facebook_app_id.clone(),
                facebook_app_secret: self.facebook_app_secret.clone(),
            },
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;
    info!("Resolved configuration: {:?}", app_config);

    info!("Initializing metrics...");
    metrics::init_metrics();

    let services =
        Services::from_config(&app_config).context("Failed to set up platform clients")?;

    info!("Metrics available at port {}!", app_config.metrics_port);
    run_server(
        ServerConfig::from(&app_config),
        services,
        app_config.metrics_port,
    )
    .await
}
