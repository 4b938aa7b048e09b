use crate::utils::error::{Result, SyncError};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub timeout: Duration,
    pub user_agent: String,
    pub default_headers: HashMap<String, String>,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: format!("sheet-sync/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl HttpClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct ClientUtils;

impl ClientUtils {
    pub fn create_http_client(config: &HttpClientConfig) -> Result<Client> {
        let mut headers = HeaderMap::new();
        for (key, value) in &config.default_headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                SyncError::Config(format!("Invalid header name '{}': {}", key, e))
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                SyncError::Config(format!("Invalid header value for '{}': {}", key, e))
            })?;
            headers.insert(name, value);
        }

        ClientBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| SyncError::Config(format!("Failed to build HTTP client: {}", e)))
    }

    pub fn add_path_to_api_base(api_base: &str, ending_path: &str) -> String {
        let base = api_base.trim_end_matches('/');
        let path = ending_path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    pub fn validate_url(url: &str) -> Result<()> {
        let parsed = url::Url::parse(url)
            .map_err(|e| SyncError::Config(format!("Invalid URL '{}': {}", url, e)))?;

        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(SyncError::Config(format!(
                    "Unsupported URL scheme '{}'. Only http and https are supported",
                    scheme
                )));
            }
        }

        if parsed.host_str().is_none() {
            return Err(SyncError::Config(format!("URL '{}' has no host", url)));
        }

        Ok(())
    }
}
