use serde::{Deserialize, Serialize};

use crate::config::ChatmarkConfig;

/// Body of `POST /api/render`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RenderRequest {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderResponse {
    pub success: bool,
    pub html: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".into(),
            version: env!("CARGO_PKG_VERSION").into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub success: bool,
    pub config: StatusConfig,
}

/// The subset of configuration a client may care about.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusConfig {
    pub rate_limit_enabled: bool,
    pub rate_limit_rpm: u32,
    pub max_content_length: usize,
    pub ordered_list_container: bool,
    pub merge_blockquotes: bool,
}

impl From<&ChatmarkConfig> for StatusResponse {
    fn from(config: &ChatmarkConfig) -> Self {
        Self {
            success: true,
            config: StatusConfig {
                rate_limit_enabled: config.rate_limit.enabled,
                rate_limit_rpm: config.rate_limit.requests_per_minute,
                max_content_length: config.gateway.max_content_length,
                ordered_list_container: config.markdown.ordered_list_container,
                merge_blockquotes: config.markdown.merge_blockquotes,
            },
        }
    }
}
