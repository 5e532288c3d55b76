use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{LiveLogsError, Result};

/// Header carrying the node a log request targets
pub const NODE_ID_HEADER: &str = "X-JFrog-Node-Id";
/// Passed as node id for requests that are not node specific
pub const EMPTY_NODE_ID: &str = "__EMPTY_NODE_ID__";

/// A GET request against a product endpoint
#[derive(Clone, Debug)]
pub struct GetRequest<'a> {
    pub server_id: &'a str,
    pub base_url: &'a str,
    pub endpoint: &'a str,
    pub query: Vec<(&'static str, String)>,
    pub node_id: &'a str,
    pub headers: &'a BTreeMap<String, String>,
    pub timeout: Duration,
}

impl GetRequest<'_> {
    pub fn url(&self) -> String {
        join_url(self.base_url, self.endpoint)
    }

    /// Request headers including the node id header when one applies
    pub fn all_headers(&self) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        if !self.node_id.is_empty() && self.node_id != EMPTY_NODE_ID {
            headers.insert(NODE_ID_HEADER.to_string(), self.node_id.to_string());
        }
        for (key, value) in self.headers {
            headers.insert(key.clone(), value.clone());
        }
        headers
    }
}

/// Raw status and body; interpreting the status is the caller's job
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Issues GET requests against remote products
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_get(&self, request: GetRequest<'_>) -> Result<HttpResponse>;
}

/// Join base and endpoint with exactly one slash between them
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

/// `Transport` backed by a shared reqwest client
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("live-logs/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| LiveLogsError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// The wire request for `request`: url, query, headers and timeout
    pub fn build_request(&self, request: &GetRequest<'_>) -> Result<reqwest::Request> {
        let url = request.url();
        let mut builder = self
            .client
            .get(&url)
            .query(&request.query)
            .timeout(request.timeout);
        for (key, value) in request.all_headers() {
            builder = builder.header(key, value);
        }
        builder
            .build()
            .map_err(|e| LiveLogsError::Transport(format!("GET {}: {}", url, e)))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send_get(&self, request: GetRequest<'_>) -> Result<HttpResponse> {
        let wire = self.build_request(&request)?;
        let url = wire.url().clone();
        debug!(server_id = request.server_id, %url, "GET");

        let response = self
            .client
            .execute(wire)
            .await
            .map_err(|e| LiveLogsError::Transport(format!("GET {}: {}", url, e)))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| LiveLogsError::Transport(format!("reading {}: {}", url, e)))?;

        debug!(%url, status, bytes = body.len(), "response");
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
