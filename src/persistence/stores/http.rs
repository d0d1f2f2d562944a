//! HTTP store for the menu service.
//!
//! - `GET  {base}/nav`   → JSON array of nodes
//! - `POST {base}/nav`   ← JSON array of nodes
//! - `POST {base}/track` ← reorder event (`{id, from, to, level, parentId}`)

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::core::drop::ReorderEvent;
use crate::core::tree::Tree;
use crate::persistence::{NavigationStore, StoreError};

pub struct HttpStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpStore {
    /// Creates a new HTTP store.
    ///
    /// # Arguments
    /// * `base_url` - Service root, e.g. `http://localhost:8081`
    /// * `timeout` - Per-request timeout
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("HTTP client setup failed: {e}")))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turns a non-2xx response into `StoreError::Api`.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
        debug!("Menu service response status: {}", response.status());
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("Menu service error: {} - {}", status, message);
        Err(StoreError::Api { status, message })
    }
}

#[async_trait]
impl NavigationStore for HttpStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn load_tree(&self) -> Result<Tree, StoreError> {
        let url = format!("{}/nav", self.base_url);
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        let body = Self::check_status(response)
            .await?
            .text()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let tree: Tree = serde_json::from_str(&body).map_err(|e| StoreError::Parse(e.to_string()))?;
        tree.validate().map_err(StoreError::Invalid)?;
        info!("Fetched menu from {} ({} items)", url, tree.len());
        Ok(tree)
    }

    async fn save_tree(&self, tree: &Tree) -> Result<(), StoreError> {
        let url = format!("{}/nav", self.base_url);
        debug!("POST {} ({} items)", url, tree.len());
        let response = self
            .client
            .post(&url)
            .json(tree)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::check_status(response).await?;
        info!("Saved menu to {}", url);
        Ok(())
    }

    async fn record_reorder(&self, event: &ReorderEvent) -> Result<(), StoreError> {
        let url = format!("{}/track", self.base_url);
        debug!("POST {} {:?}", url, event);
        let response = self
            .client
            .post(&url)
            .json(event)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;
        Self::check_status(response).await?;
        Ok(())
    }
}
