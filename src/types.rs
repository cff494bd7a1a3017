//! Core types: provider identity, normalized model descriptors, generation
//! options, and the streaming chunk delivered to caller sinks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The chat providers fae-chat knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Local model server (Ollama wire format). The only streaming backend.
    Ollama,
    /// OpenAI chat-completions API.
    OpenAi,
    /// Groq cloud API (OpenAI-compatible wire format).
    Groq,
    /// Anthropic — placeholder, not wired up yet.
    Anthropic,
    /// Google Gemini — placeholder, not wired up yet.
    Gemini,
}

impl ProviderKind {
    /// Returns the registry name of this provider.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ollama => "ollama",
            Self::OpenAi => "openai",
            Self::Groq => "groq",
            Self::Anthropic => "anthropic",
            Self::Gemini => "gemini",
        }
    }

    /// Returns all provider variants.
    pub fn all() -> &'static [ProviderKind] {
        &[
            Self::Ollama,
            Self::OpenAi,
            Self::Groq,
            Self::Anthropic,
            Self::Gemini,
        ]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A normalized view of a provider-reported model.
///
/// Providers report models in different raw shapes (`name` vs `id` keys,
/// numeric sizes, `modified_at` strings vs `created` unix seconds).
/// [`normalize_model`] maps them all onto this one struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    /// Provider-specific model identifier (e.g. `"llama3:8b"`, `"gpt-4o"`).
    pub id: String,
    /// Display name. Same as `id` unless the provider reports one.
    pub name: String,
    /// Model size as an opaque string in provider-defined units.
    /// `"unknown"` when the provider does not report one.
    pub size: String,
    /// Last-modified timestamp in RFC 3339, when the provider reports one.
    pub modified: Option<String>,
    /// The provider that owns this model.
    pub provider: ProviderKind,
}

/// Normalize one raw model entry into a [`ModelDescriptor`].
///
/// Accepts the heterogeneous shapes the providers actually return:
/// `{"name": "llama3:8b", "size": 4661224676, "modified_at": "…"}` (Ollama)
/// or `{"id": "gpt-4o", "created": 1715367049}` (OpenAI-compatible).
/// Returns `None` when the entry carries neither a `name` nor an `id`.
pub(crate) fn normalize_model(
    raw: &serde_json::Value,
    provider: ProviderKind,
) -> Option<ModelDescriptor> {
    let id = raw
        .get("name")
        .and_then(|v| v.as_str())
        .or_else(|| raw.get("id").and_then(|v| v.as_str()))?
        .to_string();

    let size = match raw.get("size") {
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::String(s)) if !s.is_empty() => s.clone(),
        _ => "unknown".to_string(),
    };

    let modified = raw
        .get("modified_at")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .or_else(|| {
            raw.get("created")
                .and_then(|v| v.as_i64())
                .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
                .map(|dt| dt.to_rfc3339())
        });

    Some(ModelDescriptor {
        name: id.clone(),
        id,
        size,
        modified,
        provider,
    })
}

/// Options controlling generation behavior.
///
/// # Examples
///
/// ```
/// use fae_chat::GenerationOptions;
///
/// let opts = GenerationOptions::new()
///     .with_temperature(0.3)
///     .with_max_tokens(4096);
/// assert_eq!(opts.max_tokens, 4096);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Sampling temperature.
    pub temperature: f64,
    /// Nucleus sampling threshold.
    pub top_p: f64,
    /// Maximum tokens to generate. Sent as `num_ctx` to the local server
    /// and `max_tokens` to cloud APIs.
    pub max_tokens: usize,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            max_tokens: 2048,
        }
    }
}

impl GenerationOptions {
    /// Create options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the nucleus sampling threshold.
    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = top_p;
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// One increment of generated text delivered during streaming.
///
/// The terminal chunk carries empty text and `is_final = true`; no further
/// chunks follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamChunk {
    /// Text fragment. Empty on the terminal chunk.
    pub text: String,
    /// Whether this is the last chunk of the response.
    pub is_final: bool,
}

impl StreamChunk {
    /// A text fragment chunk.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    /// The terminal chunk: empty text, `is_final = true`.
    pub fn done() -> Self {
        Self {
            text: String::new(),
            is_final: true,
        }
    }
}
