//! Configuration module
//!
//! Client configuration for reaching the document store, loaded from the
//! environment (and a `.env` file when present).

use std::env;

use crate::policy::{UploadPolicy, DEFAULT_ALLOWED_EXTENSIONS};

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_API_PREFIX: &str = "/api/v1";
const HTTP_TIMEOUT_SECS: u64 = 60;
const MAX_UPLOAD_SIZE_MB: usize = 100;

/// Authentication strategy for the API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiAuth {
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// `X-API-Key: {key}`
    XApiKey(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_prefix: String,
    pub auth: ApiAuth,
    pub http_timeout_secs: u64,
    pub max_upload_size_bytes: usize,
    pub allowed_extensions: Vec<String>,
    /// Queue overlapping uploads/deletes on one session instead of letting them interleave.
    pub serialize_mutations: bool,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>, auth: ApiAuth) -> Self {
        Self {
            api_url: api_url.into(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            auth,
            http_timeout_secs: HTTP_TIMEOUT_SECS,
            max_upload_size_bytes: MAX_UPLOAD_SIZE_MB * 1024 * 1024,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|e| e.to_string())
                .collect(),
            serialize_mutations: false,
        }
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup("KONTIKI_API_URL")
            .or_else(|| lookup("API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let auth = match (lookup("KONTIKI_API_TOKEN"), lookup("KONTIKI_API_KEY")) {
            (Some(token), _) if !token.trim().is_empty() => ApiAuth::Bearer(token),
            (_, Some(key)) if !key.trim().is_empty() => ApiAuth::XApiKey(key),
            _ => {
                return Err(anyhow::anyhow!(
                    "Missing credentials. Set KONTIKI_API_TOKEN or KONTIKI_API_KEY"
                ))
            }
        };

        let max_upload_size_mb = lookup("KONTIKI_MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let config = ClientConfig {
            api_url: api_url.trim_end_matches('/').to_string(),
            api_prefix: lookup("KONTIKI_API_PREFIX")
                .unwrap_or_else(|| DEFAULT_API_PREFIX.to_string())
                .trim_end_matches('/')
                .to_string(),
            auth,
            http_timeout_secs: lookup("KONTIKI_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|| HTTP_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(HTTP_TIMEOUT_SECS),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            allowed_extensions: lookup("KONTIKI_ALLOWED_EXTENSIONS")
                .map(|s| {
                    s.split(',')
                        .map(|e| e.trim().to_lowercase())
                        .filter(|e| !e.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| {
                    DEFAULT_ALLOWED_EXTENSIONS
                        .iter()
                        .map(|e| e.to_string())
                        .collect()
                }),
            serialize_mutations: lookup("KONTIKI_SERIALIZE_MUTATIONS")
                .unwrap_or_else(|| "false".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(false),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "KONTIKI_API_URL must start with http:// or https://"
            ));
        }

        if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
            return Err(anyhow::anyhow!("KONTIKI_API_PREFIX must start with '/'"));
        }

        if self.http_timeout_secs == 0 {
            return Err(anyhow::anyhow!(
                "KONTIKI_HTTP_TIMEOUT_SECS must be greater than 0"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "KONTIKI_MAX_UPLOAD_SIZE_MB must be greater than 0"
            ));
        }

        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "KONTIKI_ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        Ok(())
    }

    pub fn upload_policy(&self) -> UploadPolicy {
        UploadPolicy::new(self.max_upload_size_bytes, self.allowed_extensions.clone())
    }
}
