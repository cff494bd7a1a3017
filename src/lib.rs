//! # fae-chat
//!
//! Streaming multi-provider LLM chat client for Fae.
//!
//! This crate gives a chat front-end one contract over heterogeneous LLM
//! back-ends: a local model server with token-level NDJSON streaming, cloud
//! chat-completions APIs that answer with whole JSON responses, and
//! placeholder providers that are not wired up yet. A [`Dispatcher`] holds
//! the configured providers and forwards every operation to the currently
//! selected one.
//!
//! ## Design
//!
//! - One object-safe [`ChatProvider`] trait: connectivity probe, model
//!   listing, single-shot generation, and chunk-callback streaming
//! - A newline-delimited-JSON decoder that turns a chunked HTTP body into
//!   incremental [`StreamChunk`]s, tolerant of arbitrary read boundaries
//! - Explicit errors for the two caller bugs worth failing loudly on:
//!   streaming against a non-streaming backend, and forwarding before any
//!   provider is selected
//! - No retries and no cancellation here; callers own both policies
//!
//! ## Example
//!
//! ```no_run
//! use fae_chat::{Dispatcher, GenerationOptions, ProviderConfig, StreamChunk};
//!
//! # async fn example() -> fae_chat::Result<()> {
//! let mut chat = Dispatcher::with_standard_providers(
//!     ProviderConfig::new("http://localhost:11434", "llama3:8b"),
//!     ProviderConfig::new("https://api.openai.com/v1", "gpt-4o-mini").with_api_key("sk-…"),
//!     ProviderConfig::new("https://api.groq.com/openai/v1", "llama-3.1-8b-instant")
//!         .with_api_key("gsk-…"),
//! )?;
//!
//! chat.set_provider("ollama");
//! let mut transcript = String::new();
//! let mut on_chunk = |chunk: StreamChunk| {
//!     if !chunk.is_final {
//!         transcript.push_str(&chunk.text);
//!     }
//! };
//! chat.stream_generate("Why is the sky blue?", "llama3:8b", &GenerationOptions::new(), &mut on_chunk)
//!     .await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

mod http;
mod stream;

pub use config::ProviderConfig;
pub use dispatcher::Dispatcher;
pub use error::{ChatError, Result};
pub use provider::{ChatProvider, ChunkSink};
pub use providers::{OllamaProvider, OpenAiProvider, StubProvider};
pub use types::{GenerationOptions, ModelDescriptor, ProviderKind, StreamChunk};
