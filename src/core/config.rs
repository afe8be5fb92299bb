//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.maildeck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! A backend URL passed on the CLI is written back to the file, so the
//! remembered endpoint has an explicit load-at-startup / save-on-change
//! lifecycle instead of living in ambient global state.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MaildeckConfig {
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BackendConfig {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    pub page_size: Option<u32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend_url: String,
    pub page_size: u32,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.maildeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".maildeck").join("config.toml"))
}

/// Load config from `~/.maildeck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `MaildeckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<MaildeckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(MaildeckConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(MaildeckConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: MaildeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Maildeck Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [backend]
# url = "http://localhost:3000/api"  # Or set MAILDECK_BACKEND_URL env var

# [ui]
# page_size = 10                     # Emails per page in the sent view
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

/// Persist a backend URL chosen on the command line, so the next run
/// remembers it without the flag.
pub fn save_backend_url(config: &mut MaildeckConfig, url: &str) {
    config.backend.url = Some(url.to_string());

    let path = match config_path() {
        Some(p) => p,
        None => return,
    };
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    match toml::to_string_pretty(config) {
        Ok(serialized) => {
            if let Err(e) = fs::write(&path, serialized) {
                warn!("Failed to save config: {}", e);
            } else {
                info!("Saved backend URL to {}", path.display());
            }
        }
        Err(e) => warn!("Failed to serialize config: {}", e),
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_backend_url` and `cli_page_size` come from CLI flags (None = not given).
pub fn resolve(
    config: &MaildeckConfig,
    cli_backend_url: Option<&str>,
    cli_page_size: Option<u32>,
) -> ResolvedConfig {
    // Backend URL: CLI → env → config → default
    let backend_url = cli_backend_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("MAILDECK_BACKEND_URL").ok())
        .or_else(|| config.backend.url.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

    // Page size: CLI → env → config → default; never zero
    let page_size = cli_page_size
        .or_else(|| {
            std::env::var("MAILDECK_PAGE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .or(config.ui.page_size)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);

    ResolvedConfig {
        backend_url,
        page_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = MaildeckConfig::default();
        assert!(config.backend.url.is_none());
        assert!(config.ui.page_size.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = MaildeckConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(resolved.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = MaildeckConfig {
            backend: BackendConfig {
                url: Some("https://mail.example.com/api".to_string()),
            },
            ui: UiConfig {
                page_size: Some(25),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.backend_url, "https://mail.example.com/api");
        assert_eq!(resolved.page_size, 25);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = MaildeckConfig {
            backend: BackendConfig {
                url: Some("https://mail.example.com/api".to_string()),
            },
            ui: UiConfig { page_size: Some(25) },
        };
        let resolved = resolve(&config, Some("http://127.0.0.1:8080"), Some(5));
        assert_eq!(resolved.backend_url, "http://127.0.0.1:8080");
        assert_eq!(resolved.page_size, 5);
    }

    #[test]
    fn test_resolve_page_size_never_zero() {
        let config = MaildeckConfig::default();
        let resolved = resolve(&config, None, Some(0));
        assert_eq!(resolved.page_size, 1);
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[backend]
url = "https://mail.example.com/api"
"#;
        let config: MaildeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.backend.url.as_deref(),
            Some("https://mail.example.com/api")
        );
        assert!(config.ui.page_size.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[backend]
url = "https://mail.example.com/api"

[ui]
page_size = 20
"#;
        let config: MaildeckConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ui.page_size, Some(20));
        let serialized = toml::to_string_pretty(&config).unwrap();
        let reparsed: MaildeckConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(reparsed.backend.url, config.backend.url);
        assert_eq!(reparsed.ui.page_size, config.ui.page_size);
    }
}
