use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const DEFAULT_REQUESTS_PER_SECOND: u64 = 50;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Env(#[from] envy::Error),

    #[error("{0}")]
    Invalid(&'static str),
}

/// Configuration for the API server
#[derive(Deserialize, Debug, Clone)]
pub struct Config {
    /// CSV file acting as the company database
    #[serde(default)]
    pub database_file: PathBuf,
    /// Directory uploaded reports are written to
    #[serde(default)]
    pub assets_path: PathBuf,
    /// Shared API key expected in the upload form
    #[serde(default)]
    pub api_key: String,
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: IpAddr,
    /// Port to run the server on
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory of the rotating audit log
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    /// Emit stdout logs as JSON
    #[serde(default)]
    pub log_json: bool,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: u64,
}

fn default_host() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

fn default_max_upload_bytes() -> usize {
    DEFAULT_MAX_UPLOAD_BYTES
}

fn default_requests_per_second() -> u64 {
    DEFAULT_REQUESTS_PER_SECOND
}

impl Config {
    /// Loads `.env` (if present) and then the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let config = envy::from_env::<Config>()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database_file.as_os_str().is_empty() || self.assets_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "Environment variables DATABASE_FILE and ASSETS_PATH must be set.",
            ));
        }
        if self.api_key.trim().is_empty() {
            return Err(ConfigError::Invalid("Environment variable API_KEY must be set."));
        }
        if self.requests_per_second == 0 {
            return Err(ConfigError::Invalid("REQUESTS_PER_SECOND must be greater than zero."));
        }
        Ok(())
    }
}
