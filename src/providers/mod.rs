//! Provider implementations.
//!
//! Each module provides a struct implementing [`crate::provider::ChatProvider`]
//! for one backend family.

pub mod ollama;
pub mod openai;
pub mod stub;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use stub::StubProvider;
