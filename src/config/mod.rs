mod file_config;

pub use file_config::FileConfig;

use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::{Path, PathBuf};

pub const DEFAULT_CATALOG_PATH: &str = "./public/unique_songs.csv";
pub const DEFAULT_VECTORIZER_PATH: &str = "./tfidf_vectorizer.json";
pub const DEFAULT_MODEL_PATH: &str = "./emotion_model.json";
pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1";

/// CLI arguments that take part in config resolution, mirroring the keys
/// of [`FileConfig`].
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub vectorizer_path: Option<PathBuf>,
    pub model_path: Option<PathBuf>,
    pub bind_address: Option<String>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub vectorizer_path: PathBuf,
    pub model_path: PathBuf,
    pub bind_address: String,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
}

fn pick_path(file: Option<String>, cli: &Option<PathBuf>, default: &str) -> PathBuf {
    file.map(PathBuf::from)
        .or_else(|| cli.clone())
        .unwrap_or_else(|| PathBuf::from(default))
}

fn require_file(what: &str, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{} does not exist: {:?}", what, path);
    }
    if !path.is_file() {
        bail!("{} is not a file: {:?}", what, path);
    }
    Ok(())
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = pick_path(file.catalog_path, &cli.catalog_path, DEFAULT_CATALOG_PATH);
        let vectorizer_path = pick_path(
            file.vectorizer_path,
            &cli.vectorizer_path,
            DEFAULT_VECTORIZER_PATH,
        );
        let model_path = pick_path(file.model_path, &cli.model_path, DEFAULT_MODEL_PATH);

        require_file("Song catalog", &catalog_path)?;
        require_file("Vectorizer", &vectorizer_path)?;
        require_file("Emotion model", &model_path)?;

        let bind_address = file
            .bind_address
            .or_else(|| cli.bind_address.clone())
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);
        if port != 0 && port == metrics_port {
            bail!("port and metrics_port must differ, both are {}", port);
        }

        let logging_level = match file.logging_level {
            Some(raw) => match parse_logging_level(&raw) {
                Some(level) => level,
                None => bail!("Unknown logging_level in config file: {:?}", raw),
            },
            None => cli.logging_level.clone(),
        };

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());
        if let Some(dir) = &frontend_dir_path {
            if !Path::new(dir).is_dir() {
                bail!("Frontend directory is not a directory: {:?}", dir);
            }
        }

        Ok(Self {
            catalog_path,
            vectorizer_path,
            model_path,
            bind_address,
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
        })
    }
}

fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
