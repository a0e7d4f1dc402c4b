//! Backend switch client
//!
//! The boundary forwards a validated JSON payload to `{base_url}/{endpoint}`
//! and reads back a [`ResponseEnvelope`]. Anything beyond that is the
//! switch's business.

use async_trait::async_trait;
use noebs_fields::ResponseEnvelope;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SwitchError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    /// Carries the error category and position only, never body text
    #[error("undecodable switch response: {0}")]
    Decode(String),

    #[error("switch returned HTTP {0}")]
    Status(u16),
}

impl SwitchError {
    fn undecodable(err: &serde_json::Error) -> Self {
        Self::Decode(format!(
            "{:?} error at line {} column {}",
            err.classify(),
            err.line(),
            err.column()
        ))
    }
}

impl From<reqwest::Error> for SwitchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode("unreadable response body".to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

/// Anything that can carry a transaction to the switch
#[async_trait]
pub trait SwitchClient: Send + Sync {
    /// Send `payload` to the switch operation named `endpoint`
    async fn send(&self, endpoint: &str, payload: &Value) -> Result<ResponseEnvelope, SwitchError>;
}

/// Switch connection settings
#[derive(Debug, Clone)]
pub struct SwitchConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for SwitchConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8888/QAConsumer".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// JSON-over-HTTP switch client
#[derive(Debug, Clone)]
pub struct HttpSwitchClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSwitchClient {
    pub fn new(config: &SwitchConfig) -> Result<Self, SwitchError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

#[async_trait]
impl SwitchClient for HttpSwitchClient {
    async fn send(&self, endpoint: &str, payload: &Value) -> Result<ResponseEnvelope, SwitchError> {
        let url = self.endpoint_url(endpoint);
        tracing::debug!(%url, "forwarding to switch");

        let response = self.client.post(&url).json(payload).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return serde_json::from_slice(&body).map_err(|e| SwitchError::undecodable(&e));
        }

        // A non-2xx answer counts only when it is a rejection envelope.
        match serde_json::from_slice::<ResponseEnvelope>(&body) {
            Ok(envelope) if !envelope.is_approved() => Ok(envelope),
            _ => Err(SwitchError::Status(status.as_u16())),
        }
    }
}
