use crate::auth::gate::GateMode;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub data: DataConfig,
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: Option<u16>,
    pub unix_socket: Option<PathBuf>,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_credentials_path")]
    pub credentials_path: PathBuf,
    #[serde(default = "default_sales_path")]
    pub sales_path: PathBuf,
    /// Value of the `is_active` column that marks a login-eligible row
    #[serde(default = "default_active_marker")]
    pub active_marker: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Key for the admin endpoints (`/reload`, `/metrics`)
    pub api_key: String,
    /// Re-resolve the session user against the credential store on every
    /// protected request instead of trusting the record captured at login
    #[serde(default = "default_rederive_on_access")]
    pub rederive_on_access: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            credentials_path: default_credentials_path(),
            sales_path: default_sales_path(),
            active_marker: default_active_marker(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

impl AuthConfig {
    pub fn gate_mode(&self) -> GateMode {
        if self.rederive_on_access {
            GateMode::Rederive
        } else {
            GateMode::CapturedRecord
        }
    }
}

// Default value functions
fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_credentials_path() -> PathBuf {
    PathBuf::from("authentication.csv")
}

fn default_sales_path() -> PathBuf {
    PathBuf::from("fashion_sales_dataset_300.csv")
}

fn default_active_marker() -> String {
    "X".to_string()
}

fn default_rederive_on_access() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .context("Failed to parse config file")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port.is_none() && self.server.unix_socket.is_none() {
            bail!("Either port or unix_socket must be specified in server config");
        }

        if let Some(port) = self.server.port {
            if port == 0 {
                bail!("Server port must be greater than 0");
            }
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.data.credentials_path.as_os_str().is_empty() {
            bail!("credentials_path must not be empty");
        }

        if self.data.sales_path.as_os_str().is_empty() {
            bail!("sales_path must not be empty");
        }

        if self.data.active_marker.is_empty() {
            bail!("active_marker must not be empty");
        }

        if self.auth.api_key.is_empty() {
            bail!("api_key must not be empty");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
