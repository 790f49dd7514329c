//! HTTP transport for API requests.
//!
//! [`HttpHandler`] is the seam between the client and the network. The
//! default [`ReqwestHandler`] posts JSON with `reqwest`; on wasm32 targets
//! reqwest runs on the browser `fetch` API, so the same handler serves both
//! environments.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use tracing::{debug, instrument};

pub const ACCESS_KEY_HEADER: &str = "ApplicationAccessKey";

/// Errors that can occur while talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, TLS or protocol failure
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-200 response
    #[error("{message}. HttpStatus: {status}")]
    Status { status: u16, message: String },

    /// Response body is not JSON
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Posts a JSON body to the API and returns the decoded response.
#[async_trait]
pub trait HttpHandler: Send + Sync {
    async fn post(&self, url: &str, access_key: &str, body: &Value) -> Result<Value, TransportError>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestHandler {
    client: Client,
}

impl ReqwestHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: Client) -> Self {
        ReqwestHandler { client }
    }
}

#[async_trait]
impl HttpHandler for ReqwestHandler {
    #[instrument(skip(self, access_key, body))]
    async fn post(&self, url: &str, access_key: &str, body: &Value) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(url)
            .header(ACCESS_KEY_HEADER, access_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        debug!(status = status.as_u16(), bytes = text.len(), "response received");

        interpret_response(status, &text)
    }
}

/// Maps a raw response to the rows it carries or to an error.
///
/// A 200 body with a `Rows` field yields that field; any other 200 body is
/// returned whole. Other statuses become [`TransportError::Status`] carrying
/// the body's `Message`.
pub fn interpret_response(status: StatusCode, text: &str) -> Result<Value, TransportError> {
    if status == StatusCode::OK {
        let mut body: Value = serde_json::from_str(text)?;
        if let Some(rows) = body.get_mut("Rows") {
            return Ok(rows.take());
        }
        return Ok(body);
    }

    let message = serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| body.get("Message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| text.trim().to_string());

    Err(TransportError::Status {
        status: status.as_u16(),
        message,
    })
}
