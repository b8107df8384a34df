//! Tests for HTTP request/response types.

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

fn graph_url() -> url::Url {
    url::Url::parse("https://graph.facebook.com/v18.0/123/messages").unwrap()
}

mod http_request {
    use super::*;

    #[test]
    fn post_creates_empty_post_request() {
        let req = HttpRequest::post(graph_url());

        assert_eq!(req.method, http::Method::POST);
        assert_eq!(req.url, graph_url());
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn get_creates_get_request() {
        let req = HttpRequest::get(graph_url());

        assert_eq!(req.method, http::Method::GET);
    }

    #[test]
    fn with_json_serializes_body_and_sets_content_type() {
        let payload = serde_json::json!({"messaging_product": "whatsapp"});
        let req = HttpRequest::post(graph_url()).with_json(&payload).unwrap();

        assert_eq!(
            req.headers.get(http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let body: serde_json::Value = serde_json::from_slice(req.body.as_ref().unwrap()).unwrap();
        assert_eq!(body, payload);
    }

    #[test]
    fn with_json_does_not_duplicate_content_type() {
        let req = HttpRequest::post(graph_url())
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            )
            .with_json(&serde_json::json!({}))
            .unwrap();

        assert_eq!(
            req.headers
                .get_all(http::header::CONTENT_TYPE)
                .iter()
                .count(),
            1
        );
    }

    #[test]
    fn with_header_appends_values_for_same_name() {
        let req = HttpRequest::get(graph_url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("application/json"),
            );

        assert_eq!(req.headers.get_all(http::header::ACCEPT).iter().count(), 2);
    }

    #[test]
    fn with_headers_replaces_existing_map() {
        let mut headers = http::HeaderMap::new();
        headers.insert(
            http::header::AUTHORIZATION,
            http::HeaderValue::from_static("Bearer token"),
        );

        let req = HttpRequest::get(graph_url())
            .with_header(
                http::header::ACCEPT,
                http::HeaderValue::from_static("text/html"),
            )
            .with_headers(headers);

        assert!(req.headers.contains_key(http::header::AUTHORIZATION));
        assert!(!req.headers.contains_key(http::header::ACCEPT));
    }

    #[test]
    fn with_body_sets_raw_bytes() {
        let req = HttpRequest::post(graph_url()).with_body(b"raw".to_vec());

        assert_eq!(req.body, Some(b"raw".to_vec()));
    }
}

mod http_response {
    use super::*;

    fn response(status: http::StatusCode, body: &[u8]) -> HttpResponse {
        HttpResponse::new(status, http::HeaderMap::new(), body.to_vec())
    }

    #[test]
    fn is_success_for_2xx_only() {
        assert!(response(http::StatusCode::OK, b"").is_success());
        assert!(response(http::StatusCode::CREATED, b"").is_success());
        assert!(!response(http::StatusCode::BAD_REQUEST, b"").is_success());
        assert!(!response(http::StatusCode::INTERNAL_SERVER_ERROR, b"").is_success());
    }

    #[test]
    fn json_parses_valid_body() {
        let resp = response(http::StatusCode::OK, br#"{"messages":[{"id":"wamid.1"}]}"#);

        let json = resp.json().unwrap();
        assert_eq!(json["messages"][0]["id"], "wamid.1");
    }

    #[test]
    fn json_is_none_for_empty_or_invalid_body() {
        assert!(response(http::StatusCode::OK, b"").json().is_none());
        assert!(response(http::StatusCode::BAD_GATEWAY, b"<html>").json().is_none());
    }

    #[test]
    fn body_text_rejects_invalid_utf8() {
        let resp = response(http::StatusCode::OK, &[0xFF, 0xFE]);

        assert!(resp.body_text().is_none());
    }

    #[test]
    fn body_text_returns_valid_utf8() {
        let resp = response(http::StatusCode::OK, b"hello");

        assert_eq!(resp.body_text(), Some("hello"));
    }
}

mod http_error {
    use super::*;
    use std::error::Error;

    #[test]
    fn connection_error_preserves_source() {
        let source = std::io::Error::other("network unavailable");
        let error = HttpError::Connection(Box::new(source));

        assert!(error.to_string().contains("Connection error"));
        assert!(
            error
                .source()
                .unwrap()
                .to_string()
                .contains("network unavailable")
        );
    }

    #[test]
    fn timeout_displays_message() {
        assert_eq!(HttpError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn invalid_url_displays_reason() {
        let error = HttpError::InvalidUrl("missing scheme".to_string());

        assert!(error.to_string().contains("missing scheme"));
        assert!(error.source().is_none());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HttpError>();
    }
}

mod http_client_trait {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingClient {
        calls: AtomicUsize,
    }

    impl HttpClient for CountingClient {
        async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                vec![],
            ))
        }
    }

    async fn send_through<C: HttpClient>(client: C) {
        client.request(HttpRequest::get(graph_url())).await.unwrap();
    }

    #[tokio::test]
    async fn references_and_arcs_delegate_to_inner_client() {
        let client = Arc::new(CountingClient {
            calls: AtomicUsize::new(0),
        });

        send_through(Arc::clone(&client)).await;
        send_through(client.as_ref()).await;

        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn wrappers_are_http_clients() {
        fn assert_client<T: HttpClient>() {}
        assert_client::<CountingClient>();
        assert_client::<&CountingClient>();
        assert_client::<Arc<CountingClient>>();
    }
}
