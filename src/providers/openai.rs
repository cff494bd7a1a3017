//! OpenAI-compatible cloud client.
//!
//! Serves both the `openai` and `groq` registrations — the two back-ends
//! share the chat-completions wire format and differ only in base URL,
//! API key, and default model:
//!
//! - `GET  {base}/models` with bearer auth — probe and model listing
//! - `POST {base}/chat/completions` with bearer auth — generation
//!
//! Streaming is not implemented for these back-ends; the trait default
//! rejects `stream_generate` with an unsupported-operation error.

use async_trait::async_trait;
use serde_json::json;

use crate::config::ProviderConfig;
use crate::error::{ChatError, Result};
use crate::http;
use crate::provider::ChatProvider;
use crate::types::{normalize_model, GenerationOptions, ModelDescriptor, ProviderKind};

/// Client for an OpenAI-compatible chat-completions API.
pub struct OpenAiProvider {
    kind: ProviderKind,
    config: ProviderConfig,
    probe: reqwest::Client,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Create the `openai` provider.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] when the config is invalid, or
    /// [`ChatError::Http`] when a client cannot be constructed.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        Self::with_kind(ProviderKind::OpenAi, config)
    }

    /// Create the `groq` provider (same wire format, Groq endpoint).
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn groq(config: ProviderConfig) -> Result<Self> {
        Self::with_kind(ProviderKind::Groq, config)
    }

    fn with_kind(kind: ProviderKind, config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            kind,
            probe: http::probe_client()?,
            client: http::generation_client()?,
            config,
        })
    }

    /// Returns the configured default model.
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.config.base())
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base())
    }

    /// Attach bearer auth when an API key is configured.
    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.config.api_key.as_deref() {
            Some(key) if !key.is_empty() => request.bearer_auth(key),
            _ => request,
        }
    }

    /// Build the chat-completions request body.
    fn completions_body(
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> serde_json::Value {
        json!({
            "model": model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        })
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn test_connection(&self) -> bool {
        let request = self.authorize(self.probe.get(self.models_url()));
        match request.send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::trace!(provider = self.name(), error = %e, "probe failed");
                false
            }
        }
    }

    async fn available_models(&self) -> Vec<ModelDescriptor> {
        let request = self.authorize(self.probe.get(self.models_url()));
        let resp = match request.send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                tracing::warn!(
                    provider = self.name(),
                    status = resp.status().as_u16(),
                    "model listing failed"
                );
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(provider = self.name(), error = %e, "model listing failed");
                return Vec::new();
            }
        };

        let body: serde_json::Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(provider = self.name(), error = %e, "models response was not JSON");
                return Vec::new();
            }
        };

        let models: Vec<ModelDescriptor> = body
            .get("data")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|raw| normalize_model(raw, self.kind))
                    .collect()
            })
            .unwrap_or_default();
        tracing::debug!(provider = self.name(), count = models.len(), "models listed");
        models
    }

    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        tracing::debug!(provider = self.name(), model, "chat completion");
        let request = self
            .authorize(self.client.post(self.completions_url()))
            .json(&Self::completions_body(prompt, model, options));

        let resp = request
            .send()
            .await
            .map_err(|e| ChatError::Http(format!("{} request failed: {e}", self.name())))?;

        if !resp.status().is_success() {
            return Err(http::api_error(resp).await);
        }

        let body: serde_json::Value = resp.json().await.map_err(|e| {
            ChatError::InvalidResponse(format!("{} response not JSON: {e}", self.name()))
        })?;

        body.get("choices")
            .and_then(|v| v.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ChatError::InvalidResponse(format!(
                    "{} response missing choices[0].message.content",
                    self.name()
                ))
            })
    }
}
