//! Integration tests for the exchange engine against a mock backend

use serde_json::json;
use std::time::Duration;

use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use solace::chat::{Conversation, ExchangeEngine, ExchangeResult, FailureKind, Role, Turn};
use solace::config::BackendConfig;

/// Backend config pointing at a mock server, with zero retry delay
fn test_config(host: String) -> BackendConfig {
    BackendConfig {
        host,
        retry_delay_ms: 0,
        timeout_seconds: 5,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_respond_success_performs_one_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_partial_json(json!({
            "model": "mistral:latest",
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hi there"})))
        .expect(1)
        .mount(&server)
        .await;

    let engine = ExchangeEngine::new(&test_config(server.uri())).unwrap();
    let history = vec![Turn::user("Hello")];
    let result = engine.respond("mistral:latest", &history).await;

    assert!(result.is_reply());
    let turn = result.into_turn();
    assert_eq!(turn.role, Role::Agent);
    assert_eq!(turn.text, "Hi there");
    assert!(!turn.timestamp.is_empty());
}

#[tokio::test]
async fn test_request_carries_prompt_and_fixed_options() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let engine = ExchangeEngine::new(&test_config(server.uri())).unwrap();
    let history = vec![
        Turn::user("Hello"),
        Turn::agent("How can I help?"),
        Turn::user("I feel stressed"),
    ];
    engine.respond("phi3", &history).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();

    assert_eq!(body["model"], "phi3");
    assert_eq!(body["stream"], false);

    let prompt = body["prompt"].as_str().unwrap();
    assert!(prompt.contains("User: Hello"));
    assert!(prompt.contains("AI: How can I help?"));
    assert!(prompt.contains("User: I feel stressed"));
    assert!(prompt.ends_with("AI:"));

    let temperature = body["options"]["temperature"].as_f64().unwrap();
    let top_p = body["options"]["top_p"].as_f64().unwrap();
    assert!((temperature - 0.7).abs() < 1e-6);
    assert!((top_p - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn test_persistent_failure_performs_exactly_configured_attempts() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let config = BackendConfig {
        max_retries: 3,
        ..test_config(server.uri())
    };
    let engine = ExchangeEngine::new(&config).unwrap();
    let result = engine.respond("mistral:latest", &[Turn::user("Hello")]).await;

    match result {
        ExchangeResult::Failure { turn, kind } => {
            assert_eq!(kind, FailureKind::Status(500));
            assert_eq!(turn.role, Role::Agent);
            assert!(turn.text.contains("Status: 500"));
        }
        other => panic!("Expected Failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_success_on_second_attempt_stops_retrying() {
    let server = MockServer::start().await;

    // The failing mock is mounted first and consumed once; the success
    // mock answers the second attempt.
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Recovered"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = BackendConfig {
        max_retries: 3,
        ..test_config(server.uri())
    };
    let engine = ExchangeEngine::new(&config).unwrap();
    let result = engine.respond("mistral:latest", &[Turn::user("Hello")]).await;

    assert!(result.is_reply());
    assert_eq!(result.into_turn().text, "Recovered");
}

#[tokio::test]
async fn test_unreachable_backend_is_classified() {
    // Bind a listener to grab a free port, then release it so the port
    // refuses connections. (A pooled wiremock server keeps listening
    // after drop, so it cannot be used to produce a closed port.)
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let host = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let config = BackendConfig {
        max_retries: 2,
        ..test_config(host.clone())
    };
    let engine = ExchangeEngine::new(&config).unwrap();
    let result = engine.respond("mistral:latest", &[Turn::user("Hello")]).await;

    match result {
        ExchangeResult::Failure { turn, kind } => {
            assert_eq!(kind, FailureKind::Unreachable);
            assert!(turn.text.contains(&host));
        }
        other => panic!("Expected Failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"response": "too late"}))
                .set_delay(Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = BackendConfig {
        max_retries: 1,
        timeout_seconds: 1,
        ..test_config(server.uri())
    };
    let engine = ExchangeEngine::new(&config).unwrap();
    let result = engine.respond("mistral:latest", &[Turn::user("Hello")]).await;

    match result {
        ExchangeResult::Failure { turn, kind } => {
            assert_eq!(kind, FailureKind::Timeout);
            assert!(turn.text.contains("timed out"));
        }
        other => panic!("Expected Failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_response_body_falls_back_to_apology() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let engine = ExchangeEngine::new(&test_config(server.uri())).unwrap();
    let result = engine.respond("mistral:latest", &[Turn::user("Hello")]).await;

    assert!(result.is_reply());
    let turn = result.into_turn();
    assert!(!turn.text.is_empty());
    assert!(turn.text.contains("couldn't generate a response"));
}

#[tokio::test]
async fn test_unparseable_body_is_unexpected_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(2)
        .mount(&server)
        .await;

    let config = BackendConfig {
        max_retries: 2,
        ..test_config(server.uri())
    };
    let engine = ExchangeEngine::new(&config).unwrap();
    let result = engine.respond("mistral:latest", &[Turn::user("Hello")]).await;

    match result {
        ExchangeResult::Failure { turn, kind } => {
            assert!(matches!(kind, FailureKind::Unexpected(_)));
            assert!(turn.text.starts_with("Error:"));
        }
        other => panic!("Expected Failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_history_still_yields_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"response": "Welcome! How can I help?"})),
        )
        .mount(&server)
        .await;

    let engine = ExchangeEngine::new(&test_config(server.uri())).unwrap();
    let result = engine.respond("mistral:latest", &[]).await;
    assert!(result.is_reply());
}

#[tokio::test]
async fn test_probe_reports_reachable_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hello!"})))
        .mount(&server)
        .await;

    let engine = ExchangeEngine::new(&test_config(server.uri())).unwrap();
    assert!(engine.probe("mistral:latest").await);
}

#[tokio::test]
async fn test_probe_reports_unreachable_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = BackendConfig {
        max_retries: 2,
        ..test_config(server.uri())
    };
    let engine = ExchangeEngine::new(&config).unwrap();
    assert!(!engine.probe("mistral:latest").await);
}

#[tokio::test]
async fn test_end_to_end_exchange_snapshot() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hi there"})))
        .mount(&server)
        .await;

    let engine = ExchangeEngine::new(&test_config(server.uri())).unwrap();

    let mut conversation = Conversation::new("chat_20250102_030405");
    conversation.append(Turn::user("Hello"));

    let turn = engine
        .respond("mistral:latest", conversation.turns())
        .await
        .into_turn();
    conversation.append(turn);

    let snapshot = conversation.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].role, Role::User);
    assert_eq!(snapshot[0].text, "Hello");
    assert_eq!(snapshot[1].role, Role::Agent);
    assert_eq!(snapshot[1].text, "Hi there");
}
