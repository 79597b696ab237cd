//! HTTP client for the Kontiki site document API.
//!
//! Provides a minimal client with configurable auth (Bearer token or X-API-Key),
//! generic GET/multipart POST/DELETE helpers, and the site document methods the
//! repository session drives through `DocumentStore`.

pub mod api;

use anyhow::{Context, Result};
use kontiki_core::{ApiAuth, ClientConfig, StoreError, StoreResult};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client for the document API with configurable auth.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_prefix: String,
    auth: ApiAuth,
}

impl ApiClient {
    /// Client with default prefix and timeout.
    pub fn new(base_url: String, auth: ApiAuth) -> Result<Self> {
        Self::from_config(&ClientConfig::new(base_url, auth))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            api_prefix: config.api_prefix.trim_end_matches('/').to_string(),
            auth: config.auth.clone(),
        })
    }

    /// Create client from environment: KONTIKI_API_URL, KONTIKI_API_TOKEN or KONTIKI_API_KEY.
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env().context("Invalid client configuration")?;
        Self::from_config(&config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, self.api_prefix, path)
    }

    fn apply_auth(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth {
            ApiAuth::Bearer(token) => request.header("Authorization", format!("Bearer {}", token)),
            ApiAuth::XApiKey(key) => request.header("X-API-Key", key.as_str()),
        }
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> StoreResult<T> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.get(&url));

        let response = request.send().await.map_err(transport_error)?;
        let response = error_for_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> StoreResult<T> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.post(&url).multipart(form));

        let response = request.send().await.map_err(transport_error)?;
        let response = error_for_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// DELETE request. Returns Ok(()) on any success status.
    pub async fn delete(&self, path: &str) -> StoreResult<()> {
        let url = self.build_url(path);
        let request = self.apply_auth(self.client.delete(&url));

        let response = request.send().await.map_err(transport_error)?;
        error_for_status(response).await?;

        Ok(())
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

async fn error_for_status(response: Response) -> StoreResult<Response> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(StoreError::Status {
            status: status.as_u16(),
            body: error_text,
        });
    }
    Ok(response)
}
