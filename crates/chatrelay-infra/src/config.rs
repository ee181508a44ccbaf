//! Configuration loader for chatrelay.
//!
//! Reads `config.toml` from the data directory (`~/.chatrelay/` by
//! default) into [`RelayFileConfig`], falling back to defaults when the
//! file is missing or malformed, then applies environment overrides.
//! CLI flags are layered on top by the binary.

use std::path::{Path, PathBuf};

use chatrelay_core::endpoint::{PROXY_URL_ENV, WEBHOOK_URL_ENV};
use chatrelay_types::config::{BuildMode, RelayFileConfig};
use chatrelay_types::error::ConfigError;

use crate::forward::UPSTREAM_URL_ENV;

pub const DATA_DIR_ENV: &str = "CHATRELAY_DATA_DIR";
pub const MODE_ENV: &str = "CHATRELAY_MODE";
pub const APP_ORIGIN_ENV: &str = "CHATRELAY_APP_ORIGIN";
pub const WEB_DIR_ENV: &str = "CHATRELAY_WEB_DIR";

/// Resolve the data directory: `CHATRELAY_DATA_DIR`, else `~/.chatrelay`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".chatrelay");
    }

    PathBuf::from(".chatrelay")
}

/// Read and parse `{data_dir}/config.toml`.
///
/// A missing file is `Ok(None)`.
pub async fn read_file_config(data_dir: &Path) -> Result<Option<RelayFileConfig>, ConfigError> {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => {
            return Err(ConfigError::Read {
                path: config_path.display().to_string(),
                reason: err.to_string(),
            });
        }
    };

    toml::from_str::<RelayFileConfig>(&content)
        .map(Some)
        .map_err(|err| ConfigError::Parse {
            path: config_path.display().to_string(),
            reason: err.to_string(),
        })
}

/// Load `config.toml`, using defaults when it is missing or unusable.
pub async fn load_file_config(data_dir: &Path) -> RelayFileConfig {
    match read_file_config(data_dir).await {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::debug!(
                "No config.toml found in {}, using defaults",
                data_dir.display()
            );
            RelayFileConfig::default()
        }
        Err(err) => {
            tracing::warn!("{err}, using defaults");
            RelayFileConfig::default()
        }
    }
}

/// Apply environment overrides using `lookup` to read variables.
///
/// A variable that is set (even to an empty string) replaces the file
/// value, so `CHATRELAY_WEBHOOK_URL=` deliberately clears the webhook.
pub fn apply_env_overrides<F>(config: &mut RelayFileConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(mode) = lookup(MODE_ENV) {
        config.client.mode = mode.parse::<BuildMode>()?;
    }
    if let Some(url) = lookup(WEBHOOK_URL_ENV) {
        config.client.webhook_url = Some(url);
    }
    if let Some(path) = lookup(PROXY_URL_ENV) {
        config.client.proxy_url = Some(path);
    }
    if let Some(origin) = lookup(APP_ORIGIN_ENV) {
        config.client.app_origin = origin;
    }
    if let Some(url) = lookup(UPSTREAM_URL_ENV) {
        config.server.upstream_url = Some(url);
    }
    if let Some(dir) = lookup(WEB_DIR_ENV) {
        config.server.web_dir = Some(dir);
    }
    Ok(())
}

/// Read an environment variable, treating non-Unicode values as unset.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Load the full configuration: file, then process environment.
pub async fn load_config(data_dir: &Path) -> Result<RelayFileConfig, ConfigError> {
    let mut config = load_file_config(data_dir).await;
    apply_env_overrides(&mut config, process_env)?;
    Ok(config)
}
