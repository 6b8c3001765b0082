//! Fetch configuration.

use std::time::Duration;

/// Settings for one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Budget for connect, request and full response read.
    pub timeout: Duration,
    pub user_agent: String,
    /// Bodies larger than this are rejected rather than buffered.
    pub max_body_len: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("appletv-dissect/{}", env!("CARGO_PKG_VERSION")),
            max_body_len: 16 * 1024 * 1024,
        }
    }
}

impl FetchConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn max_body_len(mut self, len: usize) -> Self {
        self.max_body_len = len;
        self
    }
}
