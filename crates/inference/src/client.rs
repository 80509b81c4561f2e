//! Hosted inference API client
//!
//! One fixed model, one POST per detection request. The provider answers
//! with an `{error, output}` envelope; both envelope errors and transport
//! failures surface as [`InferenceError`].

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::errors::InferenceError;
use crate::types::Detection;

const DEFAULT_API_BASE: &str = "https://api.bytez.com/models/v2";

/// Trait seam over the hosted detection provider.
///
/// The gateway holds the provider behind this trait so tests can inject
/// fakes without a network.
#[async_trait]
pub trait DetectionProvider: Send + Sync {
    /// Run object detection on a single image URL.
    ///
    /// Returns detection items in the order the provider produced them;
    /// no reordering, no filtering.
    async fn detect(&self, image_url: &str) -> Result<Vec<Detection>, InferenceError>;

    /// Model identifier this provider is bound to.
    fn model_id(&self) -> &str;
}

/// Client for one fixed model on the hosted inference API.
///
/// Holds the credential and model binding for the life of the process and
/// is safe to share across concurrent requests: every call is an
/// independent HTTP exchange.
pub struct ModelClient {
    api_key: String,
    model_id: String,
    base_url: String,
    client: Client,
}

impl ModelClient {
    /// Bind a client to one model on the default API endpoint.
    ///
    /// No timeout is configured on the underlying HTTP client; a provider
    /// call runs as long as the network stack allows.
    pub fn new(api_key: String, model_id: String) -> Self {
        Self::with_base_url(api_key, model_id, DEFAULT_API_BASE.to_string())
    }

    /// Bind a client to one model on a custom API endpoint.
    pub fn with_base_url(api_key: String, model_id: String, base_url: String) -> Self {
        Self {
            api_key,
            model_id,
            base_url,
            client: Client::new(),
        }
    }
}

#[async_trait]
impl DetectionProvider for ModelClient {
    async fn detect(&self, image_url: &str) -> Result<Vec<Detection>, InferenceError> {
        let url = format!("{}/{}", self.base_url, self.model_id);

        tracing::debug!(model = %self.model_id, "dispatching provider run");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Key {}", self.api_key))
            .json(&RunRequest { url: image_url })
            .send()
            .await?;

        let envelope: RunResponse = response.json().await?;

        if let Some(error) = envelope.error {
            return Err(InferenceError::Provider {
                message: provider_error_message(&error),
            });
        }

        envelope.output.ok_or(InferenceError::MissingOutput)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Extract a human-readable message from the provider's error value.
///
/// The provider may send a bare string, an object carrying a `message`
/// string, or any other JSON value; the last case is surfaced as its raw
/// JSON rendering.
fn provider_error_message(error: &serde_json::Value) -> String {
    match error {
        serde_json::Value::String(message) => message.clone(),
        serde_json::Value::Object(fields) => fields
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| error.to_string()),
        other => other.to_string(),
    }
}

#[derive(Serialize)]
struct RunRequest<'a> {
    url: &'a str,
}

#[derive(Debug, Deserialize)]
struct RunResponse {
    error: Option<serde_json::Value>,
    output: Option<Vec<Detection>>,
}
