//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.shelfdive/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ShelfdiveConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Results per search / related-items request.
    pub top_k: Option<usize>,
    /// Query pre-filled in the search box on startup.
    pub default_query: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TOP_K: usize = 12;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub timeout_secs: u64,
    pub top_k: usize,
    pub default_query: Option<String>,
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

/// Returns the path to `~/.shelfdive/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".shelfdive").join("config.toml"))
}

/// Load config from `~/.shelfdive/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `ShelfdiveConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<ShelfdiveConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(ShelfdiveConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(ShelfdiveConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: ShelfdiveConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# shelfdive Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# top_k = 12                         # results per request
# default_query = "epic fantasy"     # pre-filled search query

# [api]
# base_url = "http://localhost:8000" # Or set SHELFDIVE_API_URL env var
# timeout_secs = 15
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

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
///
/// `cli_api_url` and `cli_query` are from CLI flags (None = not specified).
pub fn resolve(
    config: &ShelfdiveConfig,
    cli_api_url: Option<&str>,
    cli_query: Option<&str>,
) -> ResolvedConfig {
    // API base URL: CLI → env → config → default
    let api_base_url = cli_api_url
        .map(|s| s.to_string())
        .or_else(|| std::env::var("SHELFDIVE_API_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

    // top_k: env → config → default
    let top_k = std::env::var("SHELFDIVE_TOP_K")
        .ok()
        .and_then(|s| s.parse().ok())
        .or(config.general.top_k)
        .unwrap_or(DEFAULT_TOP_K);

    // Startup query: CLI → config (no env var; this is a convenience)
    let default_query = cli_query
        .map(|s| s.to_string())
        .or_else(|| config.general.default_query.clone());

    ResolvedConfig {
        api_base_url,
        timeout_secs: config.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        top_k,
        default_query,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = ShelfdiveConfig::default();
        assert!(config.general.top_k.is_none());
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let config = ShelfdiveConfig::default();
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.top_k, DEFAULT_TOP_K);
        assert_eq!(resolved.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(resolved.default_query.is_none());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = ShelfdiveConfig {
            general: GeneralConfig {
                top_k: Some(6),
                default_query: Some("mystery".to_string()),
            },
            api: ApiConfig {
                base_url: Some("http://books.internal:9000".to_string()),
                timeout_secs: Some(30),
            },
        };
        let resolved = resolve(&config, None, None);
        assert_eq!(resolved.api_base_url, "http://books.internal:9000");
        assert_eq!(resolved.top_k, 6);
        assert_eq!(resolved.timeout_secs, 30);
        assert_eq!(resolved.default_query.as_deref(), Some("mystery"));
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = ShelfdiveConfig {
            api: ApiConfig {
                base_url: Some("http://from-config".to_string()),
                timeout_secs: None,
            },
            ..Default::default()
        };
        let resolved = resolve(&config, Some("http://from-cli"), Some("dragons"));
        assert_eq!(resolved.api_base_url, "http://from-cli");
        assert_eq!(resolved.default_query.as_deref(), Some("dragons"));
    }

    #[test]
    fn test_sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[api]
base_url = "http://10.0.0.2:8000"
"#;
        let config: ShelfdiveConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert!(config.api.timeout_secs.is_none());
        assert!(config.general.top_k.is_none());
    }

    #[test]
    fn test_toml_round_trip() {
        let toml_str = r#"
[general]
top_k = 8
default_query = "sci-fi about first contact"

[api]
base_url = "http://localhost:8000"
timeout_secs = 5
"#;
        let config: ShelfdiveConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.top_k, Some(8));
        assert_eq!(
            config.general.default_query.as_deref(),
            Some("sci-fi about first contact")
        );
        assert_eq!(config.api.timeout_secs, Some(5));
    }
}
