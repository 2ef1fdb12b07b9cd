#[cfg(feature = "cli")]
pub mod cli;
pub mod smtp;

use crate::utils::error::{Result, WatchError};
use crate::utils::validation::{validate_email_address, validate_url, Validate};
use smtp::{SmtpConfig, DEFAULT_SMTP_PORT};
use std::collections::HashMap;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_INTERVAL_HOURS: u64 = 1;
pub const DEFAULT_ENV_FILE: &str = ".env";

/// Process-wide settings, loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub check_url: String,
    pub notify_email: String,
    pub interval: Duration,
    pub smtp: SmtpConfig,
}

impl WatchConfig {
    /// Builds the configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let interval_hours = number_or_default(&lookup, "CHECK_INTERVAL_HOURS", DEFAULT_INTERVAL_HOURS);

        let config = Self {
            check_url: required(&lookup, "CHECK_URL")?,
            notify_email: required(&lookup, "NOTIFY_EMAIL")?,
            interval: Duration::from_secs(interval_hours.saturating_mul(3600)),
            smtp: SmtpConfig {
                host: required(&lookup, "SMTP_HOST")?,
                from_address: required(&lookup, "SMTP_FROM")?,
                password: required(&lookup, "SMTP_PASSWORD")?,
                port: number_or_default(&lookup, "SMTP_PORT", DEFAULT_SMTP_PORT),
                username: required(&lookup, "SMTP_USER")?,
                accept_invalid_certs: flag(&lookup, "SMTP_ACCEPT_INVALID_CERTS"),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads a dotenv file, then the process environment on top of it.
    ///
    /// With `env_file` set the file must exist. Without it `./.env` is used when present.
    pub fn load(env_file: Option<&Path>) -> Result<Self> {
        let file_values = match env_file {
            Some(path) => read_env_file(path)?,
            None if Path::new(DEFAULT_ENV_FILE).exists() => {
                read_env_file(Path::new(DEFAULT_ENV_FILE))?
            }
            None => {
                tracing::debug!("No {} file found, using process environment", DEFAULT_ENV_FILE);
                HashMap::new()
            }
        };

        Self::from_layers(&file_values, |key| std::env::var(key).ok())
    }

    /// Values from `env` win over `file_values`.
    pub fn from_layers<F>(file_values: &HashMap<String, String>, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // 已存在的環境變數優先
        Self::from_lookup(|key| env(key).or_else(|| file_values.get(key).cloned()))
    }
}

impl Validate for WatchConfig {
    fn validate(&self) -> Result<()> {
        validate_url("CHECK_URL", &self.check_url)?;
        validate_email_address("NOTIFY_EMAIL", &self.notify_email)?;
        self.smtp.validate()?;
        Ok(())
    }
}

pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = dotenvy::from_path_iter(path).map_err(|e| WatchError::ConfigError {
        message: format!("failed to load {}: {}", path.display(), e),
    })?;

    let mut values = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| WatchError::ConfigError {
            message: format!("failed to parse {}: {}", path.display(), e),
        })?;
        values.insert(key, value);
    }

    tracing::debug!("Loaded {} entries from {}", values.len(), path.display());
    Ok(values)
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(WatchError::MissingConfigError {
            field: key.to_string(),
        }),
    }
}

/// Unset, unparsable and zero values all fall back to `default`.
fn number_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Default + PartialEq + Display + Copy,
{
    let Some(raw) = lookup(key).filter(|v| !v.trim().is_empty()) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if value != T::default() => value,
        _ => {
            tracing::warn!("⚠️ Ignoring {}='{}', using default {}", key, raw, default);
            default
        }
    }
}

fn flag<F>(lookup: &F, key: &str) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(false)
}
