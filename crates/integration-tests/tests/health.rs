mod harness;

use harness::config::ConfigBuilder;
use harness::mock_whisper::MockWhisper;
use harness::server::TestServer;
use murmur_config::EngineKind;

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let mock = MockWhisper::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_engine(EngineKind::Whisper, &mock.base_url())
        .build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 200);

    let body = resp.text().await.unwrap();
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn health_endpoint_disabled() {
    let mock = MockWhisper::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_engine(EngineKind::Whisper, &mock.base_url())
        .without_health()
        .build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/health")).send().await.unwrap();

    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn root_redirects_to_docs() {
    let mock = MockWhisper::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_engine(EngineKind::Whisper, &mock.base_url())
        .build();

    let server = TestServer::start(config).await.unwrap();

    let resp = server.client().get(server.url("/")).send().await.unwrap();

    assert_eq!(resp.status(), 307);
    assert_eq!(resp.headers()["location"], "/docs");

    let resp = server.client().get(server.url("/docs")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("/detect-language"));
}

#[tokio::test]
async fn openapi_hides_word_timestamps_for_streaming_engine() {
    let mock = MockWhisper::start().await.unwrap();
    let config = ConfigBuilder::new()
        .with_engine(EngineKind::FasterWhisper, &mock.base_url())
        .build();

    let server = TestServer::start(config).await.unwrap();

    let document: serde_json::Value = server
        .client()
        .get(server.url("/openapi.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let parameters = document["paths"]["/asr"]["post"]["parameters"].as_array().unwrap();
    assert!(parameters.iter().any(|p| p["name"] == "output"));
    assert!(!parameters.iter().any(|p| p["name"] == "word_timestamps"));
}
