//! Newline-delimited JSON stream decoder.
//!
//! The local model server streams one JSON object per line, each carrying an
//! incremental text fragment and/or a completion flag:
//!
//! ```text
//! {"response":"Hel","done":false}
//! {"response":"lo","done":false}
//! {"done":true}
//! ```
//!
//! [`NdjsonDecoder`] converts raw body bytes into [`StreamChunk`]s. Bytes are
//! buffered until a newline arrives, so JSON lines and multi-byte UTF-8
//! sequences split across read boundaries are reassembled before parsing;
//! the emitted chunk sequence is invariant under arbitrary chunking of the
//! input. Lines that still fail to parse are skipped silently — a malformed
//! fragment is not an error condition.

use futures_util::StreamExt;

use crate::error::{ChatError, Result};
use crate::provider::ChunkSink;
use crate::types::StreamChunk;

/// Incremental decoder for newline-delimited JSON generation streams.
///
/// Feed body bytes via [`push`](Self::push) and collect emitted chunks. After
/// the terminal chunk has been produced the decoder is finished: remaining
/// buffered bytes are discarded and further input is ignored.
#[derive(Debug, Default)]
pub(crate) struct NdjsonDecoder {
    buffer: Vec<u8>,
    finished: bool,
}

impl NdjsonDecoder {
    /// Create a new decoder.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Push a chunk of body bytes, returning any chunks completed by it.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<StreamChunk> {
        if self.finished {
            return Vec::new();
        }
        self.buffer.extend_from_slice(bytes);

        let mut chunks = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.process_line(&line[..line.len() - 1], &mut chunks);
            if self.finished {
                self.buffer.clear();
                break;
            }
        }
        chunks
    }

    /// Flush a trailing line that arrived without a final newline.
    ///
    /// Call once when the body ends. A stream may end without ever carrying
    /// a completion flag; in that case no terminal chunk is produced and
    /// callers treat end-of-stream as the implicit terminal condition.
    pub(crate) fn finish(&mut self) -> Vec<StreamChunk> {
        if self.finished || self.buffer.is_empty() {
            return Vec::new();
        }
        let line = std::mem::take(&mut self.buffer);
        let mut chunks = Vec::new();
        self.process_line(&line, &mut chunks);
        chunks
    }

    /// Parse one complete line and append any resulting chunks.
    ///
    /// A line yields a text chunk when it carries a non-empty `response`
    /// field, then the terminal chunk when it carries `done: true`. Lines
    /// that are blank, unparseable, or carry neither field yield nothing.
    fn process_line(&mut self, line: &[u8], chunks: &mut Vec<StreamChunk>) {
        let line = match line.last() {
            Some(b'\r') => &line[..line.len() - 1],
            _ => line,
        };
        if line.iter().all(|b| b.is_ascii_whitespace()) {
            return;
        }

        let value: serde_json::Value = match serde_json::from_slice(line) {
            Ok(v) => v,
            Err(e) => {
                tracing::trace!(error = %e, "skipping unparseable stream line");
                return;
            }
        };

        if let Some(text) = value.get("response").and_then(|v| v.as_str()) {
            if !text.is_empty() {
                chunks.push(StreamChunk::text(text));
            }
        }

        if value.get("done").and_then(|v| v.as_bool()) == Some(true) {
            chunks.push(StreamChunk::done());
            self.finished = true;
        }
    }
}

/// Drain a streaming response body into the caller's sink.
///
/// Reads the body incrementally, decodes each read through an
/// [`NdjsonDecoder`], and forwards every chunk. Stops reading as soon as the
/// terminal chunk has been delivered. If the body ends first, returns
/// without emitting a terminal chunk.
///
/// # Errors
///
/// Returns [`ChatError::Http`] if a body read fails mid-stream. No terminal
/// chunk is delivered in that case.
pub(crate) async fn pump_ndjson(
    response: reqwest::Response,
    on_chunk: ChunkSink<'_>,
) -> Result<()> {
    let mut decoder = NdjsonDecoder::new();
    let mut body = response.bytes_stream();
    let mut delivered: usize = 0;

    while let Some(read) = body.next().await {
        let bytes = read.map_err(|e| ChatError::Http(format!("stream read failed: {e}")))?;
        for chunk in decoder.push(&bytes) {
            let is_final = chunk.is_final;
            delivered += 1;
            on_chunk(chunk);
            if is_final {
                tracing::debug!(chunks = delivered, "stream complete");
                return Ok(());
            }
        }
    }

    for chunk in decoder.finish() {
        let is_final = chunk.is_final;
        delivered += 1;
        on_chunk(chunk);
        if is_final {
            tracing::debug!(chunks = delivered, "stream complete");
            return Ok(());
        }
    }

    tracing::debug!(chunks = delivered, "stream ended without terminal chunk");
    Ok(())
}
