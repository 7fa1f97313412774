use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::markdown::RenderOptions;

/// Top-level configuration loaded from TOML.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatmarkConfig {
    pub gateway: GatewayConfig,
    pub rate_limit: RateLimitConfig,
    pub markdown: RenderOptions,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_content_length")]
    pub max_content_length: usize,
    /// Allowed CORS origins. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
            max_content_length: default_max_content_length(),
            cors_origins: default_cors_origins(),
        }
    }
}

fn default_port() -> u16 {
    7300
}
fn default_bind() -> String {
    "127.0.0.1".into()
}
fn default_max_content_length() -> usize {
    1024 * 1024
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".into()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    #[serde(default = "default_rate_limit_enabled")]
    pub enabled: bool,
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_rate_limit_enabled(),
            requests_per_minute: default_requests_per_minute(),
        }
    }
}

fn default_rate_limit_enabled() -> bool {
    true
}
fn default_requests_per_minute() -> u32 {
    30
}

/// Load configuration from file or use defaults.
///
/// Search order:
/// 1. `CHATMARK_CONFIG` env var
/// 2. `~/.chatmark/config.toml`
/// 3. Zero-config defaults (no file needed)
pub fn load() -> anyhow::Result<ChatmarkConfig> {
    load_from(&config_path())
}

/// Load configuration from `path`, falling back to defaults when it does
/// not exist.
pub fn load_from(path: &Path) -> anyhow::Result<ChatmarkConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        let config: ChatmarkConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid config at {}: {e}", path.display()))?;

        validate(&config)?;

        info!("loaded config from {}", path.display());
        Ok(config)
    } else {
        info!("no config file found, using zero-config defaults");
        Ok(ChatmarkConfig::default())
    }
}

fn config_path() -> PathBuf {
    if let Ok(path) = std::env::var("CHATMARK_CONFIG") {
        return PathBuf::from(path);
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
    PathBuf::from(home).join(".chatmark").join("config.toml")
}

/// Validate the config and return clear error messages.
pub fn validate(config: &ChatmarkConfig) -> anyhow::Result<()> {
    if config.gateway.port == 0 {
        anyhow::bail!("gateway.port must be > 0");
    }

    if config.gateway.max_content_length == 0 {
        anyhow::bail!("gateway.max_content_length must be > 0");
    }

    for (i, origin) in config.gateway.cors_origins.iter().enumerate() {
        if origin.trim().is_empty() {
            anyhow::bail!("gateway.cors_origins[{i}] must not be empty");
        }
    }

    if config.rate_limit.enabled && config.rate_limit.requests_per_minute == 0 {
        anyhow::bail!(
            "rate_limit.requests_per_minute must be > 0 when rate limiting is enabled"
        );
    }

    Ok(())
}
