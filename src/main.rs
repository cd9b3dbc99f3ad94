use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use business_dashboard::config::{self, AppConfig, CliConfig, FileConfig};
use business_dashboard::dashboard_store::{seed, SqliteDashboardStore};
use business_dashboard::server::{run_server, RequestsLoggingLevel};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the SQLite database file.
    #[clap(long, value_parser = parse_path, default_value = config::DEFAULT_DB_PATH)]
    pub db_path: PathBuf,

    /// The interface to bind.
    #[clap(long, default_value = config::DEFAULT_HOST)]
    pub host: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Optional TOML config file. Values in it override the flags.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Do not insert sample data into an empty database.
    #[clap(long)]
    pub no_seed: bool,

    /// Leave the metrics mapping out of the dashboard summary.
    #[clap(long)]
    pub summary_without_metrics: bool,

    /// Do not send CORS headers.
    #[clap(long)]
    pub no_cors: bool,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            host: self.host.clone(),
            port: self.port,
            logging_level: self.logging_level.clone(),
            seed_sample_data: !self.no_seed,
            summary_includes_metrics: !self.summary_without_metrics,
            enable_cors: !self.no_cors,
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
            info!("Loading config file {:?}...", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let app_config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Opening SQLite dashboard database at {:?}...", app_config.db_path);
    let dashboard_store = Arc::new(SqliteDashboardStore::new(&app_config.db_path)?);
    info!("Dashboard database ready at {:?}", dashboard_store.db_path());

    if app_config.seed_sample_data {
        match seed::seed_if_empty(dashboard_store.as_ref()) {
            Ok(true) => info!("Inserted sample data into empty database"),
            Ok(false) => {}
            Err(err) => error!("Failed to seed sample data: {:#}", err),
        }
    }

    info!("Starting server on {}...", app_config.bind_address());
    run_server(
        app_config.server_config(),
        &app_config.bind_address(),
        dashboard_store,
    )
    .await
}
