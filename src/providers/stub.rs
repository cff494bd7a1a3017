//! Placeholder providers for back-ends that are not wired up yet.
//!
//! Stubs satisfy the full capability contract with fixed data: a hardcoded
//! model list, a probe that always reports unreachable, and generation
//! calls that fail with an explicit not-implemented error. Registering them
//! keeps the provider picker stable while the real integrations land.

use async_trait::async_trait;

use crate::error::{ChatError, Result};
use crate::provider::ChatProvider;
use crate::types::{GenerationOptions, ModelDescriptor, ProviderKind};

/// Models advertised by the Anthropic placeholder.
const ANTHROPIC_MODELS: &[&str] = &[
    "claude-3-5-sonnet-20241022",
    "claude-3-5-haiku-20241022",
    "claude-3-opus-20240229",
];

/// Models advertised by the Gemini placeholder.
const GEMINI_MODELS: &[&str] = &["gemini-1.5-pro", "gemini-1.5-flash"];

/// A not-yet-wired provider exposing a static model list.
pub struct StubProvider {
    kind: ProviderKind,
    models: &'static [&'static str],
}

impl StubProvider {
    /// The Anthropic placeholder.
    pub fn anthropic() -> Self {
        Self {
            kind: ProviderKind::Anthropic,
            models: ANTHROPIC_MODELS,
        }
    }

    /// The Gemini placeholder.
    pub fn gemini() -> Self {
        Self {
            kind: ProviderKind::Gemini,
            models: GEMINI_MODELS,
        }
    }
}

#[async_trait]
impl ChatProvider for StubProvider {
    fn kind(&self) -> ProviderKind {
        self.kind
    }

    async fn test_connection(&self) -> bool {
        tracing::trace!(provider = self.name(), "stub provider is never reachable");
        false
    }

    async fn available_models(&self) -> Vec<ModelDescriptor> {
        self.models
            .iter()
            .map(|id| ModelDescriptor {
                id: (*id).to_string(),
                name: (*id).to_string(),
                size: "unknown".to_string(),
                modified: None,
                provider: self.kind,
            })
            .collect()
    }

    async fn generate(
        &self,
        _prompt: &str,
        _model: &str,
        _options: &GenerationOptions,
    ) -> Result<String> {
        Err(ChatError::NotImplemented(self.name()))
    }
}
