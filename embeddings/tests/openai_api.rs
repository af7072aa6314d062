//! Hermetic tests for the OpenAI-compatible provider against a mock server.

use insights_embeddings::{EmbeddingError, EmbeddingProvider, OpenAiProvider};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new()
        .with_api_key("test-key")
        .with_base_url(server.uri())
        .with_model("text-embedding-3-small")
}

#[tokio::test]
async fn encode_returns_served_embedding() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [0.1, 0.2, 0.3], "index": 0}],
            "model": "text-embedding-3-small"
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let embedding = provider.encode("How satisfied are you?").await.unwrap();

    assert_eq!(embedding, vec![0.1, 0.2, 0.3]);
}

#[tokio::test]
async fn encode_batch_preserves_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"embedding": [1.0, 0.0], "index": 0},
                {"embedding": [0.0, 1.0], "index": 1}
            ],
            "model": "text-embedding-3-small"
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let texts = vec!["first".to_string(), "second".to_string()];
    let embeddings = provider.encode_batch(&texts).await.unwrap();

    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0], vec![1.0, 0.0]);
    assert_eq!(embeddings[1], vec![0.0, 1.0]);
}

#[tokio::test]
async fn encode_batch_rejects_count_mismatch() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [1.0, 0.0], "index": 0}],
            "model": "text-embedding-3-small"
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let texts = vec!["first".to_string(), "second".to_string()];
    let result = provider.encode_batch(&texts).await;

    assert!(matches!(result, Err(EmbeddingError::InvalidResponse(_))));
}

#[tokio::test]
async fn rate_limit_is_surfaced_with_retry_after() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "7"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider.encode("anything").await;

    assert!(matches!(
        result,
        Err(EmbeddingError::RateLimited {
            retry_after_secs: 7
        })
    ));
}

#[tokio::test]
async fn api_error_body_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/embeddings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let result = provider.encode("anything").await;

    match result {
        Err(EmbeddingError::ApiRequest(msg)) => assert!(msg.contains("backend exploded")),
        other => panic!("expected ApiRequest error, got {other:?}"),
    }
}
