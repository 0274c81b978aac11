//! 针对真实 HTTP 客户端的集成测试，服务端由 wiremock 模拟

use std::time::Duration;

use doc_chat_client::{
    AskError, AskSession, Config, Dispatcher, HttpAskClient, RenderMode, RetryPolicy,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 退避和超时缩短到毫秒级，避免测试变慢
fn fast_policy() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        base_delay: Duration::from_millis(10),
        attempt_timeout: Duration::from_millis(300),
        max_question_chars: 500,
    }
}

fn dispatcher_for(server: &MockServer) -> Dispatcher<HttpAskClient> {
    Dispatcher::new(HttpAskClient::with_base_url(server.uri()), fast_policy())
}

#[tokio::test]
async fn test_request_shape_and_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .and(header("content-type", "application/json"))
        .and(header("accept", "application/json"))
        .and(body_json(json!({ "question": "How do I track events?" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": "Call analytics.track()",
            "platform": "segment",
            "section": "tracking"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let session = AskSession::new();
    let payload = dispatcher_for(&server)
        .ask(&session, "  How do I track events?  ")
        .await
        .unwrap();

    assert_eq!(payload.answer, "Call analytics.track()");
    assert_eq!(
        payload.source().unwrap().to_string(),
        "Source: Segment Documentation (Tracking)"
    );
    assert!(!session.is_in_flight());
}

#[tokio::test]
async fn test_missing_answer_is_invalid_after_one_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "platform": "segment" })))
        .expect(1)
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .ask(&AskSession::new(), "Where is the answer?")
        .await;

    assert!(matches!(result, Err(AskError::InvalidResponse { .. })));
}

#[tokio::test]
async fn test_server_error_retried_three_times() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(500).set_body_string("index not ready"))
        .expect(3)
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .ask(&AskSession::new(), "What is an audience?")
        .await;

    match result {
        Err(AskError::ServerError { attempt, status, body }) => {
            assert_eq!(attempt, 3);
            assert_eq!(status, 500);
            assert_eq!(body, "index not ready");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_recovers_on_second_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "Back online" })))
        .expect(1)
        .mount(&server)
        .await;

    let payload = dispatcher_for(&server)
        .ask(&AskSession::new(), "Is the service up?")
        .await
        .unwrap();

    assert_eq!(payload.answer, "Back online");
}

#[tokio::test]
async fn test_slow_server_times_out_each_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "answer": "too slow" }))
                .set_delay(Duration::from_secs(2)),
        )
        .expect(3)
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .ask(&AskSession::new(), "Why is this slow?")
        .await;

    assert!(matches!(result, Err(AskError::Timeout { attempt: 3 })));
}

#[tokio::test]
async fn test_unreachable_server_is_network_failure() {
    // 绑定后立即释放，拿到一个没有监听的端口
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let dispatcher = Dispatcher::new(HttpAskClient::with_base_url(uri), fast_policy());
    let result = dispatcher.ask(&AskSession::new(), "Anyone there?").await;

    assert!(matches!(result, Err(AskError::NetworkFailure { attempt: 3, .. })));
}

#[tokio::test]
async fn test_over_length_question_never_dispatched() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "x" })))
        .expect(0)
        .mount(&server)
        .await;

    let result = dispatcher_for(&server)
        .ask(&AskSession::new(), &"q".repeat(501))
        .await;

    assert!(matches!(result, Err(AskError::Validation(_))));
}

#[tokio::test]
async fn test_end_to_end_structured_rendering() {
    let server = MockServer::start().await;

    let answer = "# Creating a Source\nSources send data into Segment.\n\n- Open the catalog\n- Pick a library\nRemember to copy the write key.\n```js\nanalytics.load('KEY');\n```\n\nSee also\nTracking Plans\nDestinations";

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "answer": answer,
            "platform": "segment",
            "section": "sources"
        })))
        .mount(&server)
        .await;

    let payload = dispatcher_for(&server)
        .ask(&AskSession::new(), "How do I create a source?")
        .await
        .unwrap();

    let mut config = Config::default();
    config.render_mode = RenderMode::Structured;
    let markup = doc_chat_client::present(&payload, config.render_mode).to_markup();

    assert!(markup.contains("<h2>Creating a Source</h2>"));
    assert!(markup.contains("Source: Segment Documentation (Sources)"));
    assert!(markup.contains("<li>Open the catalog</li><li>Pick a library</li><li>Remember to copy the write key.</li>"));
    assert!(markup.contains("analytics.load('KEY');"));
    assert!(markup.contains("<li>Tracking Plans</li><li>Destinations</li>"));

    let summary = markup.find("docs-summary").unwrap();
    let key_points = markup.find("docs-key-points").unwrap();
    let code = markup.find("docs-code-examples").unwrap();
    let related = markup.find("docs-related").unwrap();
    assert!(summary < key_points && key_points < code && code < related);
}
