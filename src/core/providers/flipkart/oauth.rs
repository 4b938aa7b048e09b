//! Client-credentials token fetch

use crate::config::FlipkartConfig;
use crate::core::batch::{AuthHeader, EndpointDescriptor, HttpMethod, RemoteCallExecutor};
use crate::utils::error::{Result, SyncError};
use crate::utils::net::ClientUtils;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

/// Path of the token endpoint
pub const TOKEN_PATH: &str = "/oauth-service/oauth/token";

/// Token issued to the seller application
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("access_token", &"***")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Token URL with the client-credentials grant and seller scope
pub fn token_url(api_base: &str) -> Result<String> {
    let base = ClientUtils::add_path_to_api_base(api_base, TOKEN_PATH);
    let mut url = Url::parse(&base).map_err(|e| {
        SyncError::Config(format!("Invalid Flipkart API base '{}': {}", api_base, e))
    })?;
    url.query_pairs_mut()
        .append_pair("grant_type", "client_credentials")
        .append_pair("scope", "Seller_Api");
    Ok(url.to_string())
}

/// Fetch a fresh access token with the configured app id and secret
pub async fn fetch_access_token(
    executor: &RemoteCallExecutor,
    config: &FlipkartConfig,
) -> Result<AccessToken> {
    let (app_id, app_secret) = config.require_app_credentials()?;
    let url = token_url(&config.api_base)?;
    ClientUtils::validate_url(&url)?;

    let endpoint = EndpointDescriptor::new(
        url,
        HttpMethod::Get,
        AuthHeader::Basic {
            username: app_id.to_string(),
            password: app_secret.to_string(),
        },
    );

    let body = executor
        .request(&endpoint, None)
        .await
        .map_err(|exhausted| exhausted.last_error)?;

    let token: AccessToken = serde_json::from_value(body)
        .map_err(|e| SyncError::Parse(format!("No access_token in token response: {}", e)))?;
    if token.access_token.trim().is_empty() {
        return Err(SyncError::Parse(
            "Token response carried an empty access_token".to_string(),
        ));
    }

    info!("Fetched Flipkart access token (expires in {}s)", token.expires_in.unwrap_or_default());
    Ok(token)
}
