//! Tests for `WhatsAppClient` against a recording mock transport.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{Value, json};

use super::{ClientConfig, SendError, WhatsAppClient};
use crate::message::{
    CtaUrlButton, ImageMessage, ListMessage, ListOption, MAX_TEXT_CHARS, MediaSource,
    OutboundMessage, Template, ValidationError, reply_buttons,
};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

const TO: &str = "263771234567";

/// Mock transport that replays a sequence of responses and records requests.
///
/// Once the sequence is exhausted every further request gets a 200.
#[derive(Debug)]
struct MockClient {
    responses: Mutex<Vec<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    call_count: AtomicUsize,
}

impl MockClient {
    fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Self {
        Self {
            responses: Mutex::new(responses),
            requests: Mutex::new(Vec::new()),
            call_count: AtomicUsize::new(0),
        }
    }

    fn success() -> Self {
        Self::new(Vec::new())
    }

    fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    fn captured_requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn captured_bodies(&self) -> Vec<Value> {
        self.captured_requests()
            .iter()
            .map(|r| serde_json::from_slice(r.body.as_ref().unwrap()).unwrap())
            .collect()
    }
}

fn ok_response(id: &str) -> HttpResponse {
    json_response(
        http::StatusCode::OK,
        &json!({"messaging_product": "whatsapp", "messages": [{"id": id}]}),
    )
}

fn json_response(status: http::StatusCode, body: &Value) -> HttpResponse {
    HttpResponse::new(status, http::HeaderMap::new(), serde_json::to_vec(body).unwrap())
}

impl HttpClient for MockClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(req);
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(ok_response("wamid.default"))
        } else {
            responses.remove(0)
        }
    }
}

fn client(mock: &MockClient) -> WhatsAppClient<&MockClient> {
    let config = ClientConfig::new("test-token", "106540352242922", "https://graph.test/v18.0")
        .unwrap();
    WhatsAppClient::new(mock, config)
}

mod requests {
    use super::*;

    #[tokio::test]
    async fn send_posts_json_to_messages_endpoint_with_auth() {
        let mock = MockClient::success();

        client(&mock).send_text(TO, "hello").await.unwrap();

        let requests = mock.captured_requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert_eq!(request.method, http::Method::POST);
        assert_eq!(
            request.url.as_str(),
            "https://graph.test/v18.0/106540352242922/messages"
        );
        assert_eq!(
            request.headers[http::header::AUTHORIZATION],
            "Bearer test-token"
        );
        assert_eq!(
            request.headers.get_all(http::header::CONTENT_TYPE).iter().count(),
            1
        );
    }

    #[tokio::test]
    async fn mark_as_read_uses_same_endpoint_and_headers() {
        let mock = MockClient::success();

        client(&mock).mark_as_read("wamid.in").await.unwrap();

        let request = &mock.captured_requests()[0];
        assert!(request.url.as_str().ends_with("/106540352242922/messages"));
        assert_eq!(
            request.headers[http::header::AUTHORIZATION],
            "Bearer test-token"
        );
        assert_eq!(
            mock.captured_bodies()[0],
            json!({"messaging_product": "whatsapp", "status": "read", "message_id": "wamid.in"})
        );
    }

    #[tokio::test]
    async fn each_kind_sends_exactly_one_request() {
        let mock = MockClient::success();
        let client = client(&mock);

        client.send_reaction("wamid.1", "👍", TO).await.unwrap();
        client
            .send_template(TO, Template::with_body_text("greeting", ["Ana"]))
            .await
            .unwrap();
        client
            .send_image(TO, ImageMessage::new(MediaSource::new("img-1", false)))
            .await
            .unwrap();
        client
            .send_list_message(TO, ListMessage::new("Pick", vec![ListOption::new("a", "A")]))
            .await
            .unwrap();
        client
            .send_reply_button(TO, reply_buttons("Hi", [("y", "Yes"), ("n", "No")]))
            .await
            .unwrap();
        client
            .send_cta_url_button(TO, CtaUrlButton::new("Open", "https://example.com"))
            .await
            .unwrap();
        client.request_location(TO, "Share location").await.unwrap();

        let types: Vec<Value> = mock
            .captured_bodies()
            .iter()
            .map(|b| b["type"].clone())
            .collect();
        assert_eq!(
            types,
            vec![
                json!("reaction"),
                json!("template"),
                json!("image"),
                json!("interactive"),
                json!("interactive"),
                json!("interactive"),
                json!("interactive"),
            ]
        );
    }
}

mod chunking {
    use super::*;

    #[tokio::test]
    async fn long_text_is_sent_in_order_as_independent_requests() {
        let mock = MockClient::success();
        let body = format!(
            "{}{}{}",
            "a".repeat(MAX_TEXT_CHARS),
            "b".repeat(MAX_TEXT_CHARS),
            "c"
        );

        client(&mock).send_text(TO, &body).await.unwrap();

        assert_eq!(mock.calls(), 3);
        let sent: String = mock
            .captured_bodies()
            .iter()
            .map(|b| b["text"]["body"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(sent, body);
    }

    #[tokio::test]
    async fn reply_chunks_all_reference_original_message() {
        let mock = MockClient::success();
        let body = "r".repeat(MAX_TEXT_CHARS + 1);

        client(&mock)
            .reply_to_message("wamid.orig", TO, &body)
            .await
            .unwrap();

        let bodies = mock.captured_bodies();
        assert_eq!(bodies.len(), 2);
        assert!(
            bodies
                .iter()
                .all(|b| b["context"]["message_id"] == "wamid.orig")
        );
    }

    #[tokio::test]
    async fn result_reflects_last_chunk() {
        let mock = MockClient::new(vec![
            Ok(json_response(
                http::StatusCode::BAD_REQUEST,
                &json!({"error": {"code": 131_047}}),
            )),
            Ok(ok_response("wamid.last")),
        ]);
        let body = "x".repeat(MAX_TEXT_CHARS + 5);

        let result = client(&mock).send_text(TO, &body).await.unwrap();

        assert!(result.success);
        assert_eq!(result.message_id(), Some("wamid.last"));
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn failed_last_chunk_is_reported_after_earlier_success() {
        let mock = MockClient::new(vec![
            Ok(ok_response("wamid.first")),
            Ok(json_response(
                http::StatusCode::TOO_MANY_REQUESTS,
                &json!({"error": {"code": 130_429}}),
            )),
        ]);
        let body = "x".repeat(MAX_TEXT_CHARS + 1);

        let result = client(&mock).send_text(TO, &body).await.unwrap();

        assert!(!result.success);
        assert_eq!(result.http_status, 429);
        assert_eq!(result.provider_error, Some(json!({"code": 130_429})));
    }

    #[tokio::test]
    async fn transport_error_stops_remaining_chunks() {
        let mock = MockClient::new(vec![Ok(ok_response("wamid.1")), Err(HttpError::Timeout)]);
        let body = "x".repeat(MAX_TEXT_CHARS * 3);

        let result = client(&mock).send_text(TO, &body).await;

        assert!(matches!(result, Err(SendError::Transport(HttpError::Timeout))));
        assert_eq!(mock.calls(), 2);
    }
}

mod errors {
    use super::*;

    #[tokio::test]
    async fn location_request_over_limit_sends_nothing() {
        let mock = MockClient::success();

        let result = client(&mock).request_location(TO, &"a".repeat(1025)).await;

        assert!(matches!(
            result,
            Err(SendError::Validation(
                ValidationError::LocationRequestTooLong { length: 1025, .. }
            ))
        ));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn location_request_at_limit_is_sent() {
        let mock = MockClient::success();

        let result = client(&mock).request_location(TO, &"a".repeat(1024)).await;

        assert!(result.unwrap().success);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn provider_error_is_returned_not_raised() {
        let mock = MockClient::new(vec![Ok(json_response(
            http::StatusCode::UNAUTHORIZED,
            &json!({"error": {"message": "Invalid OAuth access token.", "code": 190}}),
        ))]);

        let result = client(&mock)
            .send(TO, &OutboundMessage::reaction("wamid.1", "🔥"))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.http_status, 401);
        assert_eq!(result.provider_error.unwrap()["code"], 190);
    }

    #[tokio::test]
    async fn connection_error_is_propagated() {
        let mock = MockClient::new(vec![Err(HttpError::Connection(Box::new(
            std::io::Error::other("refused"),
        )))]);

        let result = client(&mock).mark_as_read("wamid.1").await;

        assert!(matches!(
            result,
            Err(SendError::Transport(HttpError::Connection(_)))
        ));
    }
}

mod media {
    use super::*;

    #[tokio::test]
    async fn download_writes_file_with_subtype_extension() {
        let mock = MockClient::new(vec![Ok(HttpResponse::new(
            http::StatusCode::OK,
            http::HeaderMap::new(),
            b"\x89PNG".to_vec(),
        ))]);
        let dir = tempfile::tempdir().unwrap();
        let stem = dir.path().join("photo");
        let url = url::Url::parse("https://lookaside.test/media/1").unwrap();

        let path = client(&mock)
            .download_media(url, "image/png", Some(&stem))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("photo.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"\x89PNG");
        let request = &mock.captured_requests()[0];
        assert_eq!(request.method, http::Method::GET);
        assert_eq!(
            request.headers[http::header::AUTHORIZATION],
            "Bearer test-token"
        );
    }

    #[tokio::test]
    async fn download_rejects_bad_mime_type_before_requesting() {
        let mock = MockClient::success();
        let url = url::Url::parse("https://lookaside.test/media/1").unwrap();

        let result = client(&mock).download_media(url, "binary", None).await;

        assert!(matches!(result, Err(super::super::MediaError::InvalidMimeType(_))));
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn download_reports_error_status() {
        let mock = MockClient::new(vec![Ok(HttpResponse::new(
            http::StatusCode::NOT_FOUND,
            http::HeaderMap::new(),
            vec![],
        ))]);
        let url = url::Url::parse("https://lookaside.test/media/1").unwrap();

        let result = client(&mock).download_media(url, "image/png", None).await;

        assert!(matches!(
            result,
            Err(super::super::MediaError::Status {
                status: http::StatusCode::NOT_FOUND
            })
        ));
    }
}
