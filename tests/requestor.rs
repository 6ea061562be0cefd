//! Integration tests for the request engine: dispatch, decoding, errors,
//! and URL resolution, against a wiremock server.

use futures::StreamExt;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lichess_client::{models, Endpoint, Error, Format, RequestArgs, Requestor, TokenSession};

fn requestor(server: &MockServer) -> Requestor {
    let base_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let session = TokenSession::new("test-token").unwrap();
    Requestor::new(session, base_url, Format::Json)
}

/// A unary endpoint yields exactly one decoded value.
#[tokio::test]
async fn test_unary_json_yields_one_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"id": "alice", "rating": 2401})),
        )
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/account");
    let mut values = r.stream(&ep, RequestArgs::new());

    assert_eq!(
        values.next().await.unwrap().unwrap(),
        json!({"id": "alice", "rating": 2401})
    );
    assert!(values.next().await.is_none());
}

/// The bearer token and format-specific Accept header are sent.
#[tokio::test]
async fn test_request_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .and(header("Authorization", "Bearer test-token"))
        .and(header("Accept", "application/vnd.lichess.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/account").format(Format::Lijson);
    r.single(&ep, RequestArgs::new()).await.unwrap();
}

/// Query parameters from the call-time arguments reach the wire.
#[tokio::test]
async fn test_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account/playing"))
        .and(query_param("nb", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nowPlaying": []})))
        .expect(1)
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/account/playing");
    r.single(&ep, RequestArgs::new().param("nb", 10))
        .await
        .unwrap();
}

/// The endpoint's converter runs on the decoded document.
#[tokio::test]
async fn test_converter_applied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"id": "alice", "createdAt": 1514505150384u64})),
        )
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/account").converter(models::account);
    let account = r.single(&ep, RequestArgs::new()).await.unwrap();

    assert_eq!(account["createdAt"], json!("2017-12-28T23:52:30.384Z"));
    assert_eq!(account["id"], json!("alice"));
}

/// PGN responses come back as the raw text, converter or not.
#[tokio::test]
async fn test_pgn_is_opaque_text() {
    let pgn = "[Event \"Rated Blitz game\"]\n\n1. e4 e5 2. Nf3 1-0\n";
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/game/export/abc123"))
        .and(header("Accept", "application/x-chess-pgn"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(pgn, "application/x-chess-pgn"))
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("game/export/abc123")
        .format(Format::Pgn)
        .converter(models::game);
    let value = r.single(&ep, RequestArgs::new()).await.unwrap();

    assert_eq!(value, json!(pgn));
}

/// A non-2xx status surfaces as a status error with the response body.
#[tokio::test]
async fn test_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(ResponseTemplate::new(401).set_body_string("No such token"))
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/account");
    let err = r.single(&ep, RequestArgs::new()).await.unwrap_err();

    match err {
        Error::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "No such token");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

/// On a streaming endpoint a non-2xx status is the only element yielded.
#[tokio::test]
async fn test_stream_status_error_before_any_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/stream/event"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/stream/event")
        .streaming()
        .format(Format::Ndjson);
    let mut events = r.stream(&ep, RequestArgs::new());

    let err = events.next().await.unwrap().unwrap_err();
    assert_eq!(err.status(), Some(429));
    assert!(events.next().await.is_none());
}

/// A malformed unary payload is a decode error.
#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/account");
    let err = r.single(&ep, RequestArgs::new()).await.unwrap_err();

    assert!(matches!(err, Error::Decode(_)));
}

/// Dispatch and response events are recorded when the stream is polled,
/// inside the per-request span.
#[tracing_test::traced_test]
#[tokio::test]
async fn test_request_events_recorded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/account");
    r.single(&ep, RequestArgs::new()).await.unwrap();

    assert!(logs_contain("dispatching request"));
    assert!(logs_contain("response received"));
}

/// No request is sent until the returned stream is first polled.
#[tokio::test]
async fn test_no_io_before_first_poll() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::get("api/account");
    let values = r.stream(&ep, RequestArgs::new());

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty(), "stream construction must not dispatch");

    drop(values);
    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty(), "dropping unpolled stream must not dispatch");
}

/// Endpoint paths resolve against the base URL whether or not they carry a
/// leading slash.
#[tokio::test]
async fn test_path_resolution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/account"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(2)
        .mount(&server)
        .await;

    let r = requestor(&server);
    for p in ["api/account", "/api/account"] {
        let ep = Endpoint::get(p);
        r.single(&ep, RequestArgs::new()).await.unwrap();
    }
}

/// POST endpoints carry their JSON payload.
#[tokio::test]
async fn test_post_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/challenge/bob"))
        .and(wiremock::matchers::body_json(json!({"rated": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "ch1"})))
        .expect(1)
        .mount(&server)
        .await;

    let r = requestor(&server);
    let ep = Endpoint::post("api/challenge/bob");
    let value = r
        .single(&ep, RequestArgs::new().json(json!({"rated": true})))
        .await
        .unwrap();
    assert_eq!(value["id"], json!("ch1"));
}
