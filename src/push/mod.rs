//! Push transport.
//!
//! Delivers one serialized notification to one subscription. The production
//! implementation relays through a hosted push service; the subscription's
//! encryption keys are passed along opaque and unmodified.

use async_trait::async_trait;
use serde_json::json;

use crate::config::Config;
use crate::models::PushSubscription;

/// Delivery failure for a single send.
///
/// Callers count both kinds identically; the distinction exists only for
/// logging.
#[derive(Debug)]
pub enum PushError {
    /// The endpoint is no longer valid (subscription expired or revoked).
    EndpointGone,
    /// Any other transport-level failure.
    Transport(String),
}

impl std::fmt::Display for PushError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PushError::EndpointGone => write!(f, "push endpoint gone"),
            PushError::Transport(msg) => write!(f, "push transport error: {}", msg),
        }
    }
}

impl std::error::Error for PushError {}

/// Delivery of one payload to one subscription.
#[async_trait]
pub trait PushTransport: Send + Sync {
    async fn send(&self, subscription: &PushSubscription, payload: &[u8])
        -> Result<(), PushError>;
}

/// Push transport that relays sends through a hosted push service.
pub struct HttpPushTransport {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
}

impl HttpPushTransport {
    pub fn new(config: &Config) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .user_agent("chronicle-backend/0.1")
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.push_api_url.clone(),
            api_key: config.push_api_key.clone(),
        }
    }
}

#[async_trait]
impl PushTransport for HttpPushTransport {
    async fn send(
        &self,
        subscription: &PushSubscription,
        payload: &[u8],
    ) -> Result<(), PushError> {
        let body = json!({
            "subscription": {
                "endpoint": subscription.endpoint,
                "keys": subscription.keys,
            },
            "payload": String::from_utf8_lossy(payload),
        });

        let mut request = self.client.post(&self.api_url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| PushError::Transport(e.to_string()))?;

        match response.status().as_u16() {
            s if (200..300).contains(&s) => Ok(()),
            404 | 410 => Err(PushError::EndpointGone),
            s => Err(PushError::Transport(format!("relay returned HTTP {}", s))),
        }
    }
}
