//! [`CinemaApi`] over HTTP using [`reqwest`].
use std::time::Duration;

use serde_json::Value;

use crate::repository::CinemaApi;
use crate::repository::errors::{ApiError, ApiResult};

/// Client bound to one API base URL, e.g. `http://localhost:3000/api/v1`.
#[derive(Clone, Debug)]
pub struct HttpCinemaApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCinemaApi {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::with_client(client, base_url))
    }

    /// Reuses an existing [`reqwest::Client`] and its connection pool.
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn ensure_success(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        Err(ApiError::Http {
            status: status.as_u16(),
            body,
        })
    }
}

impl CinemaApi for HttpCinemaApi {
    async fn get_json(&self, path: &str, query: &[(String, String)]) -> ApiResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {url} {query:?}");

        let response = self.client.get(&url).query(query).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<Value>().await?)
    }
}
