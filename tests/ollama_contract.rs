//! Ollama Provider Contract Tests
//!
//! Verify exact HTTP API format compliance for the local model server
//! client: request shapes against `/api/tags` and `/api/generate`, response
//! parsing, error mapping, and NDJSON stream decoding end to end.

use fae_chat::{ChatError, ChatProvider, GenerationOptions, OllamaProvider, ProviderConfig, ProviderKind, StreamChunk};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider(server: &MockServer) -> OllamaProvider {
    OllamaProvider::new(ProviderConfig::new(server.uri(), "llama3:8b"))
        .expect("valid config")
}

// ────────────────────────────────────────────────────────────────────────────
// Connectivity probe
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn probe_reports_true_on_success() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "models": [] })))
        .expect(1)
        .mount(&mock_server)
        .await;

    assert!(provider(&mock_server).test_connection().await);
}

#[tokio::test]
async fn probe_reports_false_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    assert!(!provider(&mock_server).test_connection().await);
}

#[tokio::test]
async fn probe_reports_false_when_unreachable() {
    // Nothing listens on port 1.
    let provider = OllamaProvider::new(ProviderConfig::new("http://127.0.0.1:1", "llama3:8b"))
        .expect("valid config");
    assert!(!provider.test_connection().await);
}

// ────────────────────────────────────────────────────────────────────────────
// Model listing
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn models_are_parsed_and_normalized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [
                { "name": "llama3:8b", "size": 4661224676u64, "modified_at": "2024-05-10T14:32:00Z" },
                { "name": "qwen2:7b" },
                { "size": 123 }
            ]
        })))
        .mount(&mock_server)
        .await;

    let models = provider(&mock_server).available_models().await;
    // The entry without a name is dropped by normalization.
    assert_eq!(models.len(), 2);
    assert_eq!(models[0].id, "llama3:8b");
    assert_eq!(models[0].size, "4661224676");
    assert_eq!(models[0].modified.as_deref(), Some("2024-05-10T14:32:00Z"));
    assert_eq!(models[0].provider, ProviderKind::Ollama);
    assert_eq!(models[1].id, "qwen2:7b");
    assert_eq!(models[1].size, "unknown");
}

#[tokio::test]
async fn models_empty_on_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    assert!(provider(&mock_server).available_models().await.is_empty());
}

#[tokio::test]
async fn models_empty_when_unreachable() {
    let provider = OllamaProvider::new(ProviderConfig::new("http://127.0.0.1:1", "llama3:8b"))
        .expect("valid config");
    assert!(provider.available_models().await.is_empty());
}

#[tokio::test]
async fn models_empty_on_non_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    assert!(provider(&mock_server).available_models().await.is_empty());
}

// ────────────────────────────────────────────────────────────────────────────
// Single-shot generation
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn generate_sends_expected_body_and_parses_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "llama3:8b",
            "prompt": "Why is the sky blue?",
            "stream": false,
            "options": { "temperature": 0.7, "top_p": 0.9, "num_ctx": 2048 }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "response": "Rayleigh scattering.", "done": true })),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let text = provider(&mock_server)
        .generate("Why is the sky blue?", "llama3:8b", &GenerationOptions::new())
        .await
        .expect("generation should succeed");
    assert_eq!(text, "Rayleigh scattering.");
}

#[tokio::test]
async fn generate_maps_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&mock_server)
        .await;

    let result = provider(&mock_server)
        .generate("hi", "missing-model", &GenerationOptions::new())
        .await;
    match result {
        Err(ChatError::Api { status, message }) => {
            assert_eq!(status, 404);
            assert!(message.contains("model not found"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_rejects_body_without_response_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "done": true })))
        .mount(&mock_server)
        .await;

    let result = provider(&mock_server)
        .generate("hi", "llama3:8b", &GenerationOptions::new())
        .await;
    assert!(matches!(result, Err(ChatError::InvalidResponse(_))));
}

// ────────────────────────────────────────────────────────────────────────────
// Streaming generation
// ────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn stream_delivers_chunks_then_terminal() {
    let mock_server = MockServer::start().await;

    let ndjson = concat!(
        "{\"response\":\"Hello\",\"done\":false}\n",
        "{\"response\":\", \",\"done\":false}\n",
        "{\"response\":\"world\",\"done\":false}\n",
        "{\"response\":\"\",\"done\":true}\n",
    );

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({ "stream": true })))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson))
        .mount(&mock_server)
        .await;

    let mut chunks: Vec<StreamChunk> = Vec::new();
    let mut sink = |chunk: StreamChunk| chunks.push(chunk);
    provider(&mock_server)
        .stream_generate("hi", "llama3:8b", &GenerationOptions::new(), &mut sink)
        .await
        .expect("stream should succeed");

    let text: String = chunks
        .iter()
        .filter(|c| !c.is_final)
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(text, "Hello, world");
    assert_eq!(chunks.last(), Some(&StreamChunk::done()));
    assert_eq!(chunks.iter().filter(|c| c.is_final).count(), 1);
}

#[tokio::test]
async fn stream_ignores_content_after_done_line() {
    let mock_server = MockServer::start().await;

    let ndjson = concat!(
        "{\"response\":\"kept\",\"done\":false}\n",
        "{\"done\":true}\n",
        "{\"response\":\"discarded\",\"done\":false}\n",
    );

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson))
        .mount(&mock_server)
        .await;

    let mut chunks: Vec<StreamChunk> = Vec::new();
    let mut sink = |chunk: StreamChunk| chunks.push(chunk);
    provider(&mock_server)
        .stream_generate("hi", "llama3:8b", &GenerationOptions::new(), &mut sink)
        .await
        .expect("stream should succeed");

    assert_eq!(
        chunks,
        vec![StreamChunk::text("kept"), StreamChunk::done()]
    );
}

#[tokio::test]
async fn stream_skips_malformed_lines() {
    let mock_server = MockServer::start().await;

    let ndjson = concat!(
        "{\"response\":\"a\",\"done\":false}\n",
        "this is not json\n",
        "{\"response\":\"b\",\"done\":false}\n",
        "{\"done\":true}\n",
    );

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson))
        .mount(&mock_server)
        .await;

    let mut chunks: Vec<StreamChunk> = Vec::new();
    let mut sink = |chunk: StreamChunk| chunks.push(chunk);
    provider(&mock_server)
        .stream_generate("hi", "llama3:8b", &GenerationOptions::new(), &mut sink)
        .await
        .expect("stream should succeed");

    let text: String = chunks
        .iter()
        .filter(|c| !c.is_final)
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(text, "ab");
}

#[tokio::test]
async fn stream_without_done_line_ends_without_terminal_chunk() {
    let mock_server = MockServer::start().await;

    let ndjson = "{\"response\":\"partial answer\",\"done\":false}\n";

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ndjson))
        .mount(&mock_server)
        .await;

    let mut chunks: Vec<StreamChunk> = Vec::new();
    let mut sink = |chunk: StreamChunk| chunks.push(chunk);
    provider(&mock_server)
        .stream_generate("hi", "llama3:8b", &GenerationOptions::new(), &mut sink)
        .await
        .expect("stream-end without done is not an error");

    assert_eq!(chunks, vec![StreamChunk::text("partial answer")]);
}

#[tokio::test]
async fn stream_error_status_fails_with_zero_chunks() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500).set_body_string("overloaded"))
        .mount(&mock_server)
        .await;

    let mut chunks: Vec<StreamChunk> = Vec::new();
    let mut sink = |chunk: StreamChunk| chunks.push(chunk);
    let result = provider(&mock_server)
        .stream_generate("hi", "llama3:8b", &GenerationOptions::new(), &mut sink)
        .await;

    match result {
        Err(ChatError::Api { status, .. }) => assert_eq!(status, 500),
        other => panic!("expected Api error, got {other:?}"),
    }
    assert!(chunks.is_empty(), "no chunks before the failure");
}
