use crate::core::{Escalation, Result, SqlPrintError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wait: WaitConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Liveness polling configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct WaitConfig {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_interval_ms() -> u64 {
    1_000
}

fn default_timeout_ms() -> u64 {
    30_000
}

impl Default for WaitConfig {
    fn default() -> Self {
        WaitConfig {
            interval_ms: default_interval_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl WaitConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Printer configuration.
#[derive(Debug, Default, Deserialize)]
pub struct OutputConfig {
    /// What happens on fatal conditions: `"abort"` or `"return_error"`.
    #[serde(default)]
    pub escalation: Escalation,
}

impl Config {
    fn validate(self) -> Result<Self> {
        if self.wait.interval_ms == 0 {
            return Err(SqlPrintError::Config("wait.interval_ms must be greater than zero".to_string()));
        }
        Ok(self)
    }
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).map_err(|e| SqlPrintError::Config(e.to_string()))?;
    config.validate()
}

/// Loads configuration from a TOML file at the given path.
///
/// # Example
///
/// ```no_run
/// let config = sqlprint::config::load_config("sqlprint.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Like [`load_config`], but a missing file yields the defaults.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<Config> {
    match fs::read_to_string(path) {
        Ok(content) => parse_config(&content),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e.into()),
    }
}

/// `<config dir>/sqlprint/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sqlprint").join("config.toml"))
}
