//! The provider capability contract.
//!
//! Every backend — local, cloud, or stub — implements [`ChatProvider`].
//! The trait is object-safe so the dispatcher can hold a registry of
//! `Box<dyn ChatProvider>` and swap the active one by reference.

use async_trait::async_trait;

use crate::error::{ChatError, Result};
use crate::types::{GenerationOptions, ModelDescriptor, ProviderKind, StreamChunk};

/// Caller-supplied sink receiving streamed chunks.
///
/// Invoked zero or more times with `is_final = false` as text arrives, then
/// exactly once with the terminal chunk — unless the call fails first, in
/// which case the terminal chunk is never delivered.
pub type ChunkSink<'a> = &'a mut (dyn FnMut(StreamChunk) + Send);

/// A chat backend conforming to the provider capability contract.
///
/// Implementations must be `Send + Sync`; the dispatcher shares them across
/// await points. All four operations are independent: a provider that cannot
/// stream still lists models and generates, and a stub provider that can do
/// neither still answers `test_connection` and `available_models` with fixed
/// data.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Which [`ProviderKind`] this implementation represents.
    fn kind(&self) -> ProviderKind;

    /// Registry name of this provider. Delegates to [`ProviderKind::name`].
    fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Whether [`stream_generate`](Self::stream_generate) is available.
    fn supports_streaming(&self) -> bool {
        false
    }

    /// Check whether the backend is reachable.
    ///
    /// Issues a lightweight GET against the list-models endpoint with a
    /// short timeout. Returns `false` on any transport failure or non-2xx
    /// status; connectivity problems never surface as errors here.
    async fn test_connection(&self) -> bool;

    /// Fetch and normalize the models this backend offers.
    ///
    /// On any failure the cause is logged and an empty vector is returned;
    /// callers cannot distinguish "zero models" from "fetch failed".
    async fn available_models(&self) -> Vec<ModelDescriptor>;

    /// Generate a complete response in one call.
    ///
    /// # Errors
    ///
    /// [`ChatError::Api`] carrying the HTTP status on a non-2xx response,
    /// [`ChatError::Http`] on transport failure, or
    /// [`ChatError::InvalidResponse`] when a 2xx body cannot be interpreted.
    async fn generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
    ) -> Result<String>;

    /// Generate a response incrementally, delivering chunks to `on_chunk`.
    ///
    /// Only valid when [`supports_streaming`](Self::supports_streaming) is
    /// `true`. The default implementation fails with
    /// [`ChatError::StreamingUnsupported`] without touching the sink.
    ///
    /// # Errors
    ///
    /// Same transport/status errors as [`generate`](Self::generate); when an
    /// error is returned, no terminal chunk has been delivered.
    async fn stream_generate(
        &self,
        prompt: &str,
        model: &str,
        options: &GenerationOptions,
        on_chunk: ChunkSink<'_>,
    ) -> Result<()> {
        let _ = (prompt, model, options, on_chunk);
        Err(ChatError::StreamingUnsupported(self.name()))
    }
}
