use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::config::RateLimitConfig;

/// Clients tracked before idle entries are swept out of the table.
const SWEEP_THRESHOLD: usize = 1024;

/// Sliding-window request limiter keyed by client address.
pub struct RateLimiter {
    enabled: bool,
    max_requests: usize,
    window: Duration,
    hits: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl RateLimiter {
    /// One-minute window with the configured request budget.
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_window(config, Duration::from_secs(60))
    }

    pub fn with_window(config: &RateLimitConfig, window: Duration) -> Self {
        Self {
            enabled: config.enabled,
            max_requests: config.requests_per_minute as usize,
            window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Seconds a rejected client should wait before retrying.
    pub fn retry_after(&self) -> u64 {
        self.window.as_secs().max(1)
    }

    /// Record a request from `client`. Returns false when the client has
    /// already used its budget for the current window.
    pub async fn admit(&self, client: IpAddr) -> bool {
        if !self.enabled {
            return true;
        }

        let now = Instant::now();
        let window = self.window;
        let mut hits = self.hits.lock().await;

        if hits.len() > SWEEP_THRESHOLD {
            hits.retain(|_, stamps| {
                stamps
                    .last()
                    .is_some_and(|last| now.duration_since(*last) < window)
            });
        }

        let stamps = hits.entry(client).or_default();
        stamps.retain(|t| now.duration_since(*t) < window);

        if stamps.len() >= self.max_requests {
            return false;
        }

        stamps.push(now);
        true
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.hits.lock().await.len()
    }
}
