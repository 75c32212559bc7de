//! reqwest implementation of the remote gateway

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, error};

use reclaim::gateway::RemoteGateway;
use reclaim_api::{GatewayError, ItemRecord};

/// Connection settings for the remote item store.
#[derive(Clone, Debug)]
pub struct RemoteConfig {
    /// Base URL of the store; item resources live under `{base_url}/items`.
    pub base_url: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Config with the default 30 second timeout (slow networks included).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the remote item store.
pub struct ItemsClient {
    base_url: String,
    client: reqwest::Client,
}

impl ItemsClient {
    pub fn new(config: &RemoteConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Network {
                message: format!("failed to build HTTP client: {err}"),
            })?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn items_url(&self) -> String {
        format!("{}/items", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/items/{}", self.base_url, id)
    }

    /// Classify a reqwest error into a more actionable message.
    fn network_error(err: reqwest::Error, url: &str, operation: &str) -> GatewayError {
        let kind = if err.is_timeout() {
            "timeout - request took too long"
        } else if err.is_connect() {
            "connection error - check network connectivity"
        } else if err.is_request() {
            "request error - invalid URL or malformed request"
        } else if err.is_decode() {
            "decode error - unexpected response format"
        } else {
            "transport error"
        };
        GatewayError::Network {
            message: format!("failed to {operation} for {url}: {kind}: {err}"),
        }
    }

    /// Check the status and read the body, truncating long error bodies.
    async fn handle_response(
        response: reqwest::Response,
        url: &str,
    ) -> Result<String, GatewayError> {
        let status = response.status();
        let body = response.text().await.map_err(|err| GatewayError::Network {
            message: format!("failed to read response body from {url}: {err}"),
        })?;

        if !status.is_success() {
            let body = if body.len() > 500 {
                format!("{}... (truncated)", body.chars().take(500).collect::<String>())
            } else {
                body
            };
            return Err(GatewayError::Status {
                status: status.as_u16(),
                url: url.to_string(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl RemoteGateway for ItemsClient {
    async fn list_all(&self) -> Result<Vec<ItemRecord>, GatewayError> {
        let url = self.items_url();
        debug!(url = %url, "listing all items");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| Self::network_error(err, &url, "list items"))?;
        let body = Self::handle_response(response, &url).await?;

        let records: Vec<ItemRecord> = serde_json::from_str(&body).map_err(|err| {
            error!(url = %url, error = %err, "item list could not be decoded");
            GatewayError::Decode {
                message: format!("invalid item list from {url}: {err}"),
            }
        })?;
        debug!(url = %url, count = records.len(), "item list received");
        Ok(records)
    }

    async fn create(&self, record: &ItemRecord) -> Result<ItemRecord, GatewayError> {
        let url = self.items_url();
        debug!(url = %url, title = %record.title, status = record.status.as_str(), "creating item");

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|err| Self::network_error(err, &url, "create item"))?;
        let body = Self::handle_response(response, &url).await?;

        serde_json::from_str(&body).map_err(|err| {
            error!(url = %url, error = %err, "created item could not be decoded");
            GatewayError::Decode {
                message: format!("invalid create response from {url}: {err}"),
            }
        })
    }

    async fn replace(&self, id: &str, record: &ItemRecord) -> Result<(), GatewayError> {
        let url = self.item_url(id);
        debug!(url = %url, "replacing item");

        let response = self
            .client
            .put(&url)
            .json(record)
            .send()
            .await
            .map_err(|err| Self::network_error(err, &url, "replace item"))?;
        // Response body is ignored; only the status matters.
        Self::handle_response(response, &url).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), GatewayError> {
        let url = self.item_url(id);
        debug!(url = %url, "deleting item");

        let response = self
            .client
            .delete(&url)
            .send()
            .await
            .map_err(|err| Self::network_error(err, &url, "delete item"))?;
        Self::handle_response(response, &url).await?;
        Ok(())
    }
}
