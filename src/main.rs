use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use moodify_server::config::{self, DEFAULT_BIND_ADDRESS};
use moodify_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};
use moodify_server::{load_catalog, load_classifier, EmotionClassifier};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// CSV file with the song catalog. Defaults to ./public/unique_songs.csv.
    #[clap(long, value_parser = parse_path)]
    pub catalog_path: Option<PathBuf>,

    /// JSON file with the fitted TF-IDF vectorizer. Defaults to ./tfidf_vectorizer.json.
    #[clap(long, value_parser = parse_path)]
    pub vectorizer_path: Option<PathBuf>,

    /// JSON file with the fitted emotion model. Defaults to ./emotion_model.json.
    #[clap(long, value_parser = parse_path)]
    pub model_path: Option<PathBuf>,

    /// The address to bind to.
    #[clap(long, default_value = DEFAULT_BIND_ADDRESS)]
    pub bind_address: String,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 5001)]
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
}

impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            catalog_path: args.catalog_path.clone(),
            vectorizer_path: args.vectorizer_path.clone(),
            model_path: args.model_path.clone(),
            bind_address: Some(args.bind_address.clone()),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
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
        .try_init()?;

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // TOML overrides CLI
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  catalog_path: {:?}", app_config.catalog_path);
    info!("  vectorizer_path: {:?}", app_config.vectorizer_path);
    info!("  model_path: {:?}", app_config.model_path);
    info!("  port: {}", app_config.port);

    let catalog = load_catalog(&app_config.catalog_path)?;
    let classifier = load_classifier(&app_config.vectorizer_path, &app_config.model_path)?;

    info!("Initializing metrics...");
    metrics::init_metrics();
    metrics::init_catalog_metrics(catalog.get_songs_count(), catalog.get_dropped_rows_count());

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level,
        bind_address: app_config.bind_address,
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        frontend_dir_path: app_config.frontend_dir_path,
    };

    info!("Ready to serve at port {}!", server_config.port);
    info!("Metrics available at port {}!", server_config.metrics_port);
    let classifier: Arc<dyn EmotionClassifier> = Arc::new(classifier);
    run_server(server_config, catalog, Some(classifier)).await
}
