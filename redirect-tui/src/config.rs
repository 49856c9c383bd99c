use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Overrides `api_url` from the config file when set.
const API_URL_ENV: &str = "REDIRECT_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedirectConfig {
    /// Base URL of the redirect-management API, e.g. "http://localhost:8080"
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

pub fn config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("Cannot determine config directory")?
        .join("redirect-tui"))
}

impl RedirectConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("config.toml"))
    }

    pub fn log_path() -> Result<PathBuf> {
        Ok(config_dir()?.join("redirect-tui.log"))
    }

    /// Load config from disk and apply the environment override. Returns the
    /// default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        if let Ok(api_url) = std::env::var(API_URL_ENV) {
            if !api_url.trim().is_empty() {
                config.api_url = api_url;
            }
        }
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// Write the default config unless a file already exists. Returns the path.
    pub fn ensure_exists() -> Result<PathBuf> {
        let path = Self::config_path()?;
        if !path.exists() {
            Self::default().save()?;
        }
        Ok(path)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)
            .with_context(|| format!("Failed to write config at {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_default_api_url() {
        let config = RedirectConfig::parse("").unwrap();
        assert_eq!(config, RedirectConfig::default());
        assert_eq!(config.api_url, "http://localhost:8080");
    }

    #[test]
    fn api_url_is_read_from_file() {
        let config = RedirectConfig::parse("api_url = \"https://redirects.example.com\"").unwrap();
        assert_eq!(config.api_url, "https://redirects.example.com");
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(RedirectConfig::parse("api_url = ").is_err());
    }
}
