//! REST request helper.
//!
//! Attaches the persisted bearer token to every request and normalizes
//! failures into `{success: false, error: true, message}` so callers only
//! ever deal with one response shape.

use reqwest::{Client, Method, RequestBuilder, StatusCode, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::session::SessionStorage;

const NETWORK_ERROR_MESSAGE: &str = "Network error occurred";

/// Uniform backend response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Any other top-level fields the backend sent
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ApiResponse {
    /// Response for a request that never got a usable reply
    pub fn failure(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            error: true,
            message: if message.is_empty() {
                NETWORK_ERROR_MESSAGE.to_string()
            } else {
                message
            },
            ..Self::default()
        }
    }

    /// Interpret a JSON body. Bodies already in the backend's envelope are
    /// returned as is; anything else is wrapped as `data`.
    fn from_body(body: Value, status: StatusCode) -> Self {
        let is_envelope = body
            .as_object()
            .is_some_and(|object| object.contains_key("success") || object.contains_key("message"));
        if is_envelope && let Ok(response) = serde_json::from_value::<ApiResponse>(body.clone()) {
            return response;
        }

        let ok = status.is_success();
        Self {
            success: ok,
            error: !ok,
            message: if ok {
                String::new()
            } else {
                status.canonical_reason().unwrap_or(NETWORK_ERROR_MESSAGE).to_string()
            },
            data: Some(body),
            extra: Map::new(),
        }
    }
}

/// Client for the hostel REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStorage,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStorage) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, self.url(path))
            .header(CONTENT_TYPE, "application/json");
        match self.session.access_token().await {
            Ok(Some(token)) => builder.bearer_auth(token),
            Ok(None) => builder,
            Err(e) => {
                tracing::warn!("Sending request without token: {}", e);
                builder
            }
        }
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> ApiResponse {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error {}: {}", action, e);
                return ApiResponse::failure(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Error {}: HTTP {}", action, status);
        }

        match response.bytes().await {
            Ok(bytes) if bytes.is_empty() => ApiResponse::from_body(Value::Null, status),
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(body) => ApiResponse::from_body(body, status),
                Err(_) if status.is_success() => ApiResponse::from_body(
                    Value::String(String::from_utf8_lossy(&bytes).into_owned()),
                    status,
                ),
                Err(_) => ApiResponse::failure(
                    status.canonical_reason().unwrap_or(NETWORK_ERROR_MESSAGE),
                ),
            },
            Err(e) => {
                tracing::error!("Error {}: {}", action, e);
                ApiResponse::failure(e.to_string())
            }
        }
    }

    pub async fn fetch_data(&self, path: &str) -> ApiResponse {
        let builder = self.request(Method::GET, path).await;
        self.send(builder, "fetching data").await
    }

    pub async fn post_data(&self, path: &str, body: &Value) -> ApiResponse {
        let builder = self.request(Method::POST, path).await.json(body);
        self.send(builder, "posting data").await
    }

    pub async fn edit_data(&self, path: &str, body: &Value) -> ApiResponse {
        let builder = self.request(Method::PUT, path).await.json(body);
        self.send(builder, "editing data").await
    }

    pub async fn delete_data(&self, path: &str) -> ApiResponse {
        let builder = self.request(Method::DELETE, path).await;
        self.send(builder, "deleting data").await
    }
}
