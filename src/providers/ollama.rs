//! Local model server client (Ollama wire format).
//!
//! The only streaming-capable backend. Talks to an Ollama-style server,
//! conventionally at `http://localhost:11434`:
//!
//! - `GET  {base}/api/tags` — connectivity probe and model listing
//! - `POST {base}/api/generate` — single-shot or NDJSON-streamed generation

use async_trait::async_trait;
use serde_json::json;

use crate::config::ProviderConfig;
use crate::error::{ChatError, Result};
use crate::http;
use crate::provider::{ChatProvider, ChunkSink};
use crate::stream::pump_ndjson;
use crate::types::{normalize_model, GenerationOptions, ModelDescriptor, ProviderKind};

/// Client for a local Ollama-style model server.
pub struct OllamaProvider {
    config: ProviderConfig,
    probe: reqwest::Client,
    client: reqwest::Client,
}

impl OllamaProvider {
    /// Create a provider from connection settings.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] when the config is invalid, or
    /// [`ChatError::Http`] when a client cannot be constructed.
    pub fn new(config: ProviderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            probe: http::probe_client()?,
            client: http::generation_client()?,
            config,
        })
    }

    /// Returns the configured default model.
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.config.base())
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.config.base())
    }

    /// Build the `/api/generate` request body.
    fn generate_body(
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
        stream: bool,
    ) -> serde_json::Value {
        json!({
            "model": model,
            "prompt": prompt,
            "stream": stream,
            "options": {
                "temperature": options.temperature,
                "top_p": options.top_p,
                "num_ctx": options.max_tokens,
            },
        })
    }
}

#[async_trait]
impl ChatProvider for OllamaProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Ollama
    }

    fn supports_streaming(&self) -> bool {
        true
    }

    async fn test_connection(&self) -> bool {
        match self.probe.get(self.tags_url()).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                tracing::trace!(error = %e, "ollama probe failed");
                false
            }
        }
    }

    async fn available_models(&self) -> Vec<ModelDescriptor> {
        let resp = match self.probe.get(self.tags_url()).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                tracing::warn!(status = resp.status().as_u16(), "ollama model listing failed");
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(error = %e, "ollama model listing failed");
                return Vec::new();
            }
        };

        let body: serde_json::Value = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "ollama tags response was not JSON");
                return Vec::new();
            }
        };

        let models: Vec<ModelDescriptor> = body
            .get("models")
            .and_then(|v| v.as_array())
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|raw| normalize_model(raw, ProviderKind::Ollama))
                    .collect()
            })
            .unwrap_or_default();
        tracing::debug!(count = models.len(), "ollama models listed");
        models
    }

    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        tracing::debug!(model, "ollama generate");
        let resp = self
            .client
            .post(self.generate_url())
            .json(&Self::generate_body(prompt, model, options, false))
            .send()
            .await
            .map_err(|e| ChatError::Http(format!("ollama request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(http::api_error(resp).await);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| ChatError::InvalidResponse(format!("ollama response not JSON: {e}")))?;

        body.get("response")
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ChatError::InvalidResponse("ollama response missing 'response' field".into())
            })
    }

    async fn stream_generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
        on_chunk: ChunkSink<'_>,
    ) -> Result<()> {
        tracing::debug!(model, "ollama stream");
        let resp = self
            .client
            .post(self.generate_url())
            .json(&Self::generate_body(prompt, model, options, true))
            .send()
            .await
            .map_err(|e| ChatError::Http(format!("ollama request failed: {e}")))?;

        if !resp.status().is_success() {
            return Err(http::api_error(resp).await);
        }

        pump_ndjson(resp, on_chunk).await
    }
}
