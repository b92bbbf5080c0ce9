//! HTTP client for the PlayZone REST API
//!
//! Thin wrapper over `reqwest` that knows three things: the base URL, the
//! bearer token, and the `{ "data": ..., "message": ... }` response envelope.

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Every API response is wrapped in this envelope.
///
/// Either field may be absent and then reads as `None`. `T` needs no
/// `Default`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Takes the payload, treating a missing `data` field as a broken response.
    pub fn into_data(self, what: &str) -> ClientResult<T> {
        self.data
            .ok_or_else(|| ClientError::InvalidResponse(format!("Missing {} data", what)))
    }
}

/// HTTP client shared by every store.
///
/// Cloning is cheap; clones share the connection pool and the token.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Set (or replace) the bearer token
    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Forget the bearer token
    pub async fn clear_token(&self) {
        *self.token.write().await = None;
    }

    /// Get the current token
    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach the bearer token, if any
    async fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Make a GET request and unwrap the envelope
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        debug!(path, "GET");
        let request = self.authorize(self.client.get(self.url(path))).await;
        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    /// Make a GET request with query parameters
    pub async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<ApiResponse<T>> {
        debug!(path, "GET");
        let request = self
            .authorize(self.client.get(self.url(path)).query(query))
            .await;
        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<ApiResponse<T>> {
        debug!(path, "POST");
        let request = self.authorize(self.client.post(self.url(path)).json(body)).await;
        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<ApiResponse<T>> {
        debug!(path, "POST");
        let request = self.authorize(self.client.post(self.url(path))).await;
        let response = request.send().await?;
        Self::handle_response(path, response).await
    }

    /// Map the status to a typed error, or decode the envelope
    async fn handle_response<T: DeserializeOwned>(
        path: &str,
        response: reqwest::Response,
    ) -> ClientResult<ApiResponse<T>> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = server_message(&text);
            warn!(path, status = status.as_u16(), %message, "API request failed");

            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    ClientError::Validation(message)
                }
                other => ClientError::Server {
                    status: other.as_u16(),
                    message,
                },
            });
        }

        let bytes = response.bytes().await?;
        if bytes.is_empty() {
            return Ok(ApiResponse {
                data: None,
                message: None,
            });
        }
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("{}: {}", path, e)))
    }
}

/// Pulls `message` out of an error body, falling back to the raw text.
fn server_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .unwrap_or_else(|| body.trim().to_string())
}
