//! Provider registry and active-provider forwarding.
//!
//! [`Dispatcher`] owns the configured providers and tracks which one is
//! current. It is a two-state machine: **unselected** (initial) and
//! **selected**. Switching is a pure reference swap with no state
//! migration. Forwarding an operation while unselected is a caller
//! sequencing bug and fails fast with [`ChatError::NoProviderSelected`];
//! a failed switch is merely logged and leaves the selection unchanged.

use crate::config::ProviderConfig;
use crate::error::{ChatError, Result};
use crate::provider::{ChatProvider, ChunkSink};
use crate::providers::{OllamaProvider, OpenAiProvider, StubProvider};
use crate::types::{GenerationOptions, ModelDescriptor};

/// Registry of chat providers plus the currently active one.
#[derive(Default)]
pub struct Dispatcher {
    /// Registered providers in insertion order.
    providers: Vec<Box<dyn ChatProvider>>,
    /// Index of the active provider in `providers`.
    active: Option<usize>,
}

impl Dispatcher {
    /// Create an empty dispatcher with no providers registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher with the five standard providers registered:
    /// `ollama`, `openai`, `groq`, and the `anthropic`/`gemini` stubs.
    ///
    /// No provider is selected; call [`set_provider`](Self::set_provider)
    /// before forwarding operations.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Config`] when any supplied config is invalid.
    pub fn with_standard_providers(
        ollama: ProviderConfig,
        openai: ProviderConfig,
        groq: ProviderConfig,
    ) -> Result<Self> {
        let mut dispatcher = Self::new();
        dispatcher.register(Box::new(OllamaProvider::new(ollama)?));
        dispatcher.register(Box::new(OpenAiProvider::new(openai)?));
        dispatcher.register(Box::new(OpenAiProvider::groq(groq)?));
        dispatcher.register(Box::new(StubProvider::anthropic()));
        dispatcher.register(Box::new(StubProvider::gemini()));
        Ok(dispatcher)
    }

    /// Register a provider, replacing any existing one with the same name.
    ///
    /// Replacement keeps the registry position; if the replaced provider was
    /// active, the new one becomes active in its place.
    pub fn register(&mut self, provider: Box<dyn ChatProvider>) {
        let name = provider.name();
        match self.providers.iter().position(|p| p.name() == name) {
            Some(index) => {
                tracing::debug!(provider = name, "replacing registered provider");
                self.providers[index] = provider;
            }
            None => self.providers.push(provider),
        }
    }

    /// Switch the active provider by name.
    ///
    /// Returns `true` on success. An unknown name is logged and leaves the
    /// current selection (or non-selection) unchanged.
    pub fn set_provider(&mut self, name: &str) -> bool {
        match self.providers.iter().position(|p| p.name() == name) {
            Some(index) => {
                tracing::info!(provider = name, "active provider set");
                self.active = Some(index);
                true
            }
            None => {
                tracing::warn!(provider = name, "unknown provider, selection unchanged");
                false
            }
        }
    }

    /// Returns the name of the active provider, if one is selected.
    pub fn active_provider(&self) -> Option<&str> {
        self.active.map(|index| self.providers[index].name())
    }

    /// Returns the registered provider names in registration order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Number of registered providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn current(&self) -> Result<&dyn ChatProvider> {
        self.active
            .map(|index| self.providers[index].as_ref())
            .ok_or(ChatError::NoProviderSelected)
    }

    /// Whether the active provider supports streaming.
    ///
    /// # Errors
    ///
    /// [`ChatError::NoProviderSelected`] while unselected.
    pub fn supports_streaming(&self) -> Result<bool> {
        Ok(self.current()?.supports_streaming())
    }

    /// Forward a connectivity check to the active provider.
    ///
    /// # Errors
    ///
    /// [`ChatError::NoProviderSelected`] while unselected. Connectivity
    /// failures themselves are reported as `Ok(false)`.
    pub async fn test_connection(&self) -> Result<bool> {
        Ok(self.current()?.test_connection().await)
    }

    /// Forward model listing to the active provider.
    ///
    /// # Errors
    ///
    /// [`ChatError::NoProviderSelected`] while unselected. Fetch failures
    /// are reported as an empty vector, per the provider contract.
    pub async fn available_models(&self) -> Result<Vec<ModelDescriptor>> {
        Ok(self.current()?.available_models().await)
    }

    /// Forward a single-shot generation to the active provider.
    ///
    /// # Errors
    ///
    /// [`ChatError::NoProviderSelected`] while unselected, otherwise
    /// whatever the provider reports.
    pub async fn generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> Result<String> {
        self.current()?.generate(prompt, model, options).await
    }

    /// Forward a streaming generation to the active provider.
    ///
    /// # Errors
    ///
    /// [`ChatError::NoProviderSelected`] while unselected,
    /// [`ChatError::StreamingUnsupported`] when the active provider cannot
    /// stream, otherwise whatever the provider reports.
    pub async fn stream_generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
        on_chunk: ChunkSink<'_>,
    ) -> Result<()> {
        self.current()?
            .stream_generate(prompt, model, options, on_chunk)
            .await
    }
}
