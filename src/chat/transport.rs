//! Chat transport: one request/response exchange per chat turn.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::config::ChatConfig;

/// Request body sent to the chat endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// A well-formed answer from the chat endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatReply {
    /// `{"response": "<text>"}`
    Response(String),
    /// `{"error": <truthy>}`; carries the error value as sent.
    ServerError(Value),
}

/// Errors that end a chat exchange without a usable reply.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The request could not be sent or the body not read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("Unexpected status: {0}")]
    Status(u16),

    /// The body was not JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was JSON but neither a response nor an error.
    #[error("Unexpected response shape")]
    UnexpectedShape,

    /// The transport is not able to serve requests.
    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Exchanges a user message for a chat reply.
#[async_trait]
pub trait ChatTransport: Send + Sync + std::fmt::Debug {
    async fn exchange(&self, message: &str) -> Result<ChatReply, TransportError>;
}

/// JavaScript truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Classify a response body.
///
/// A truthy `error` wins over `response`; a `response` must be a string.
pub fn parse_reply(body: &[u8]) -> Result<ChatReply, TransportError> {
    let value: Value = serde_json::from_slice(body)?;
    let Value::Object(mut fields) = value else {
        return Err(TransportError::UnexpectedShape);
    };

    if let Some(error) = fields.remove("error").filter(is_truthy) {
        return Ok(ChatReply::ServerError(error));
    }

    match fields.remove("response") {
        Some(Value::String(text)) => Ok(ChatReply::Response(text)),
        _ => Err(TransportError::UnexpectedShape),
    }
}

/// JSON-over-HTTP transport posting to the chat endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport posting to `path` relative to `base_url`.
    pub fn new(base_url: impl AsRef<str>, path: &str) -> Result<Self, url::ParseError> {
        Self::with_client(base_url, path, reqwest::Client::new())
    }

    /// Create a transport with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        path: &str,
        http: reqwest::Client,
    ) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(base_url.as_ref())?.join(path)?;
        Ok(Self { endpoint, http })
    }

    pub fn from_config(config: &ChatConfig) -> crate::Result<Self> {
        Ok(Self::new(&config.base_url, &config.endpoint)?)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn exchange(&self, message: &str) -> Result<ChatReply, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&ChatRequest { message })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        parse_reply(&body)
    }
}
