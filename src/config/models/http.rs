//! HTTP client configuration

use super::*;
use crate::utils::net::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// HTTP client settings shared by all jobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            user_agent: None,
        }
    }
}

impl HttpSettings {
    /// Client configuration for these settings
    pub fn client_config(&self) -> HttpClientConfig {
        let mut config =
            HttpClientConfig::default().with_timeout(Duration::from_secs(self.timeout));
        if let Some(agent) = &self.user_agent {
            config.user_agent = agent.clone();
        }
        config
    }
}
