//! Remote call execution with bounded retry

use super::partition::Batch;
use crate::storage::CellValue;
use crate::utils::error::{Exhausted, Result, RetryPolicy, SyncError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

/// HTTP method of an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// Authentication attached to every request of an endpoint
#[derive(Clone, PartialEq, Eq)]
pub enum AuthHeader {
    /// `Authorization: Bearer <token>`
    Bearer(String),
    /// `Authorization: Basic base64(username:password)`
    Basic { username: String, password: String },
    /// Custom header, e.g. `X-Shopify-Access-Token`
    Header { name: String, value: String },
    None,
}

impl AuthHeader {
    fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            AuthHeader::Bearer(token) => request.bearer_auth(token),
            AuthHeader::Basic { username, password } => {
                let credentials = STANDARD.encode(format!("{}:{}", username, password));
                request.header(AUTHORIZATION, format!("Basic {}", credentials))
            }
            AuthHeader::Header { name, value } => request.header(name.as_str(), value.as_str()),
            AuthHeader::None => request,
        }
    }
}

// Credentials never reach the logs.
impl std::fmt::Debug for AuthHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthHeader::Bearer(_) => f.write_str("Bearer(***)"),
            AuthHeader::Basic { username, .. } => write!(f, "Basic({}:***)", username),
            AuthHeader::Header { name, .. } => write!(f, "Header({}: ***)", name),
            AuthHeader::None => f.write_str("None"),
        }
    }
}

/// Where and how to send a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    pub url: String,
    pub method: HttpMethod,
    pub auth: AuthHeader,
}

impl EndpointDescriptor {
    pub fn new(url: impl Into<String>, method: HttpMethod, auth: AuthHeader) -> Self {
        Self {
            url: url.into(),
            method,
            auth,
        }
    }
}

/// Response record exposing the key it answers and the resolved value
pub trait KeyedRecord {
    fn key(&self) -> &str;

    /// `None` when the record names the key but carries no value
    fn value(&self) -> Option<CellValue>;
}

/// Remote endpoint resolving a batch of keys in one call
pub trait BatchEndpoint: Send + Sync {
    type Record: KeyedRecord + Send;

    fn descriptor(&self) -> &EndpointDescriptor;

    /// Request body for one batch of keys
    fn payload(&self, keys: &[&str]) -> Value;

    /// Extract the records of a successful response body
    fn records(&self, body: Value) -> Result<Vec<Self::Record>>;
}

/// Sends requests with a fixed-delay retry policy
#[derive(Debug, Clone)]
pub struct RemoteCallExecutor {
    client: Client,
    retry: RetryPolicy,
}

impl RemoteCallExecutor {
    pub fn new(client: Client, retry: RetryPolicy) -> Self {
        Self { client, retry }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Same client, different retry policy
    pub fn with_retry(&self, retry: RetryPolicy) -> Self {
        Self {
            client: self.client.clone(),
            retry,
        }
    }

    /// Perform exactly one request.
    ///
    /// Non-2xx statuses become [`SyncError::Http`], an empty body becomes
    /// `Value::Null` and a body that is not JSON becomes [`SyncError::Parse`].
    pub async fn send(&self, endpoint: &EndpointDescriptor, body: Option<&Value>) -> Result<Value> {
        let request = match endpoint.method {
            HttpMethod::Get => self.client.get(&endpoint.url),
            HttpMethod::Post => self.client.post(&endpoint.url),
            HttpMethod::Put => self.client.put(&endpoint.url),
        };
        let mut request = endpoint.auth.apply(request);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(SyncError::http(status.as_u16(), text));
        }
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| SyncError::Parse(format!("Invalid JSON from {}: {}", endpoint.url, e)))
    }

    /// Send a request, retrying according to the policy
    pub async fn request(
        &self,
        endpoint: &EndpointDescriptor,
        body: Option<&Value>,
    ) -> std::result::Result<Value, Exhausted> {
        self.retry
            .call(|attempt| async move {
                debug!("{:?} {} (attempt {})", endpoint.method, endpoint.url, attempt);
                self.send(endpoint, body).await
            })
            .await
    }

    /// Resolve one batch against `endpoint`.
    ///
    /// A body whose records cannot be extracted counts as a failed attempt.
    /// Exhaustion is reported as [`SyncError::BatchFailed`].
    pub async fn execute<E: BatchEndpoint>(
        &self,
        endpoint: &E,
        batch: &Batch<'_>,
    ) -> Result<Vec<E::Record>> {
        let descriptor = endpoint.descriptor();
        let payload = endpoint.payload(&batch.keys());
        let payload = &payload;

        self.retry
            .call(|attempt| async move {
                debug!("Batch {} with {} key(s), attempt {}", batch.index, batch.len(), attempt);
                let body = self.send(descriptor, Some(payload)).await?;
                endpoint.records(body)
            })
            .await
            .map_err(|exhausted| {
                warn!("Batch {} gave up: {}", batch.index, exhausted);
                SyncError::from(exhausted)
            })
    }
}
