//! Error types for the fae-chat crate.
//!
//! Connectivity probes never surface errors (they report `false` instead);
//! everything else fails loudly. Malformed stream fragments are not errors
//! at all — the decoder skips them by design.

/// Errors produced by provider operations and the dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    /// Transport-level failure: connect, timeout, or body read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The provider answered with a non-2xx status.
    #[error("API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code from the response.
        status: u16,
        /// Response body, truncated for display.
        message: String,
    },

    /// The provider answered 2xx but the body could not be interpreted.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Streaming was requested on a provider that does not support it.
    #[error("provider '{0}' does not support streaming")]
    StreamingUnsupported(&'static str),

    /// Generation was requested on a provider that is not wired up yet.
    #[error("provider '{0}' is not implemented yet")]
    NotImplemented(&'static str),

    /// A dispatcher operation was invoked before any provider was selected.
    /// Signals a caller-sequencing bug, not a recoverable condition.
    #[error("no provider selected")]
    NoProviderSelected,

    /// Invalid provider configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for fae-chat results.
pub type Result<T> = std::result::Result<T, ChatError>;
