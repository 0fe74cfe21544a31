use crate::config::ApiConfig;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },
    #[error("Response from {url} is not valid JSON: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Response from {url} carried an empty payload")]
    EmptyPayload { url: String },
}

/// Source of playoff bracket payloads
#[async_trait]
pub trait BracketFetcher: Send + Sync {
    async fn fetch(&self, year: i32) -> Result<Value, FetchError>;
}

/// Fetches bracket snapshots from the NHL web API
pub struct NhlApiFetcher {
    client: Client,
    base_url: String,
}

impl NhlApiFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn bracket_url(&self, year: i32) -> String {
        format!("{}/v1/playoff-bracket/{}", self.base_url, year)
    }
}

#[async_trait]
impl BracketFetcher for NhlApiFetcher {
    async fn fetch(&self, year: i32) -> Result<Value, FetchError> {
        let url = self.bracket_url(year);
        info!(%url, "Fetching playoff bracket");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;
        debug!(bytes = body.len(), "Received bracket response");

        let payload: Value =
            serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
                url: url.clone(),
                source,
            })?;

        if is_empty_payload(&payload) {
            return Err(FetchError::EmptyPayload { url });
        }

        Ok(payload)
    }
}

/// A payload with no content: `null`, `false`, `0`, `""`, `[]` or `{}`.
pub fn is_empty_payload(payload: &Value) -> bool {
    match payload {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}
