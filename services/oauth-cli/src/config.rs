//! Configuration loading for the CLI
//!
//! Precedence: env vars > config file. The client secret is taken from
//! AIRBNB_CLIENT_SECRET or from a file path named in the TOML
//! (`client_secret_file`), never from the TOML directly, to keep secrets
//! out of config files.

use std::path::{Path, PathBuf};

use airbnb_oauth::Secret;
use serde::Deserialize;

/// Configuration errors local to the CLI.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Resolved runtime configuration.
#[derive(Debug)]
pub struct Config {
    pub client_id: String,
    pub client_secret: Secret,
    /// Alternative API host (gateways, mock servers). `None` uses the
    /// library default.
    pub api_host: Option<String>,
}

/// Raw TOML file shape. Every field is optional; env vars can supply
/// everything.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    client_id: Option<String>,
    /// Path to a file containing the client secret (alternative to the
    /// AIRBNB_CLIENT_SECRET env var)
    client_secret_file: Option<PathBuf>,
    api_host: Option<String>,
}

/// Values read from the process environment, kept separate so resolution
/// stays testable without mutating real env vars.
#[derive(Debug, Default)]
struct EnvOverrides {
    client_id: Option<String>,
    client_secret: Option<String>,
    api_host: Option<String>,
}

impl EnvOverrides {
    fn from_process() -> Self {
        Self {
            client_id: std::env::var("AIRBNB_CLIENT_ID").ok(),
            client_secret: std::env::var("AIRBNB_CLIENT_SECRET").ok(),
            api_host: std::env::var("AIRBNB_API_HOST").ok(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file, then overlay
    /// environment variables.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => {
                let contents = std::fs::read_to_string(path)?;
                toml::from_str(&contents)?
            }
            None => FileConfig::default(),
        };
        resolve(file, EnvOverrides::from_process())
    }

    /// Resolve the config file path from a CLI `--config` value or the
    /// AIRBNB_OAUTH_CONFIG env var. No default location: with neither set,
    /// everything must come from env vars.
    pub fn resolve_path(cli_path: Option<&str>) -> Option<PathBuf> {
        if let Some(p) = cli_path {
            return Some(PathBuf::from(p));
        }
        std::env::var("AIRBNB_OAUTH_CONFIG").ok().map(PathBuf::from)
    }
}

fn resolve(file: FileConfig, env: EnvOverrides) -> Result<Config, ConfigError> {
    let client_id = env.client_id.or(file.client_id).ok_or_else(|| {
        ConfigError::Config(
            "client id missing: set AIRBNB_CLIENT_ID or client_id in the config file".into(),
        )
    })?;
    if client_id.is_empty() {
        return Err(ConfigError::Config("client id must not be empty".into()));
    }

    let client_secret = match env.client_secret {
        Some(secret) => secret,
        None => {
            let secret_file = file.client_secret_file.ok_or_else(|| {
                ConfigError::Config(
                    "client secret missing: set AIRBNB_CLIENT_SECRET or client_secret_file in the config file"
                        .into(),
                )
            })?;
            let secret = std::fs::read_to_string(&secret_file).map_err(|e| {
                ConfigError::Config(format!(
                    "failed to read client_secret_file {}: {e}",
                    secret_file.display()
                ))
            })?;
            secret.trim().to_owned()
        }
    };
    if client_secret.is_empty() {
        return Err(ConfigError::Config("client secret must not be empty".into()));
    }

    let api_host = env.api_host.or(file.api_host);
    if let Some(ref host) = api_host {
        if !host.starts_with("http://") && !host.starts_with("https://") {
            return Err(ConfigError::Config(format!(
                "api_host must start with http:// or https://, got: {host}"
            )));
        }
    }

    Ok(Config {
        client_id,
        client_secret: Secret::new(client_secret),
        api_host,
    })
}
