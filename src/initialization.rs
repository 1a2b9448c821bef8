use std::fs;
use log::{info, LevelFilter};
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;
use crate::manager_smhi::SMHI_DOMAIN;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub web_server: WebServerParameters,
    pub smhi: SMHIParameters,
    pub logging: LoggingParameters,
    /// Set from the environment only, never from the config file
    #[serde(skip)]
    pub development: bool,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct WebServerParameters {
    pub bind_address: String,
    pub bind_port: u16,
}

impl Default for WebServerParameters {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0".to_string(), bind_port: 5000 }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct SMHIParameters {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for SMHIParameters {
    fn default() -> Self {
        Self { base_url: SMHI_DOMAIN.to_string(), timeout_secs: 30 }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct LoggingParameters {
    pub log_path: Option<String>,
    pub log_level: String,
}

impl Default for LoggingParameters {
    fn default() -> Self {
        Self { log_path: None, log_level: "info".to_string() }
    }
}

/// Returns a configuration struct for the application and starts logging
///
/// The config file is optional, its path is taken from the environment variable
/// CONFIG_PATH. PORT and APP_ENV are read from the environment afterward.
pub fn config() -> Result<Config, ConfigError> {
    let mut config = match std::env::var("CONFIG_PATH") {
        Ok(path) => load_config(&path)?,
        Err(_) => Config::default(),
    };

    apply_env(
        &mut config,
        std::env::var("PORT").ok().as_deref(),
        std::env::var("APP_ENV").ok().as_deref(),
    )?;

    let level = if config.development {
        LevelFilter::Debug
    } else {
        config.logging.log_level.parse::<LevelFilter>()
            .map_err(|_| ConfigError(format!("unknown log level '{}'", config.logging.log_level)))?
    };
    setup_logger(config.logging.log_path.as_deref(), level)?;

    info!("log level {}, development mode {}", level, config.development);

    Ok(config)
}

/// Loads the configuration file
///
/// # Arguments
///
/// * 'config_path' - path to the toml config file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    Ok(toml::from_str(&toml)?)
}

/// Applies environment overrides to the configuration
///
/// # Arguments
///
/// * 'config' - configuration to update
/// * 'port' - value of PORT, overrides the bind port
/// * 'app_env' - value of APP_ENV, "development" turns on development mode
pub fn apply_env(config: &mut Config, port: Option<&str>, app_env: Option<&str>) -> Result<(), ConfigError> {
    if let Some(port) = port {
        config.web_server.bind_port = port.trim().parse::<u16>()
            .map_err(|e| ConfigError(format!("invalid PORT '{}': {}", port, e)))?;
    }
    config.development = app_env == Some("development");

    Ok(())
}
