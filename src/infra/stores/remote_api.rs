use std::time::Duration;

use crate::error::AppError;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

/// Shared client for the central API. Every request carries the
/// builder-level timeout, so no remote call can block past the configured
/// bound; timeouts and connection failures surface as `Transient`.
#[derive(Clone)]
pub struct RemoteApi {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl RemoteApi {
    pub fn new(base_url: String, api_token: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token,
        }
    }

    /// Reachability check used once at startup to pick the active backend.
    pub async fn probe(&self) -> bool {
        match self.request(Method::GET, "/health").send().await {
            Ok(res) => res.status().is_success(),
            Err(e) => {
                warn!("Remote API probe failed: {}", e);
                false
            }
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut req = self.client.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.api_token {
            req = req.header("Authorization", format!("Bearer {}", token));
        }
        req
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        self.get_json_with(path, &[]).await
    }

    pub async fn get_json_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        let res = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(res).await
    }

    pub async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, AppError> {
        self.get_optional_with(path, &[]).await
    }

    pub async fn get_optional_with<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, AppError> {
        let res = self
            .request(Method::GET, path)
            .query(query)
            .send()
            .await
            .map_err(map_transport_error)?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(res).await.map(Some)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let res = self
            .request(Method::POST, path)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode(res).await
    }

    /// PUT returning `None` when the target record does not exist upstream.
    pub async fn put_optional<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, AppError> {
        let res = self
            .request(Method::PUT, path)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(res).await.map(Some)
    }

    /// DELETE returning whether the record existed upstream.
    pub async fn delete(&self, path: &str) -> Result<bool, AppError> {
        let res = self
            .request(Method::DELETE, path)
            .send()
            .await
            .map_err(map_transport_error)?;
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        let status = res.status();
        if status.is_success() {
            return Ok(true);
        }
        let body = res.text().await.unwrap_or_default();
        Err(map_status(status, &body))
    }
}

async fn decode<T: DeserializeOwned>(res: Response) -> Result<T, AppError> {
    let status = res.status();
    if status.is_success() {
        res.json::<T>()
            .await
            .map_err(|e| AppError::Transient(format!("Invalid response from remote API: {}", e)))
    } else {
        let body = res.text().await.unwrap_or_default();
        Err(map_status(status, &body))
    }
}

fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::Transient("Remote API request timed out".to_string())
    } else {
        AppError::Transient(format!("Remote API connection error: {}", e))
    }
}

fn map_status(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| format!("Remote API error: status {}", status));

    match status {
        StatusCode::NOT_FOUND => AppError::NotFound(message),
        StatusCode::CONFLICT => AppError::Conflict(message),
        StatusCode::BAD_REQUEST => AppError::Validation(message),
        _ => {
            warn!("Remote API failure: status {}, body: {}", status, body);
            AppError::Transient(message)
        }
    }
}
