//! Tests for the run module.

use super::*;

use std::sync::Mutex;

use hmac::{Hmac, Mac};
use serde_json::{Value, json};
use sha2::Sha256;
use whatsapp_cloud::config::Cli;
use whatsapp_cloud::transport::{HttpRequest, HttpResponse};

/// Transport answering every request with the same status and recording bodies.
struct StubClient {
    status: http::StatusCode,
    bodies: Mutex<Vec<Value>>,
}

impl StubClient {
    fn new(status: http::StatusCode) -> Self {
        Self {
            status,
            bodies: Mutex::new(Vec::new()),
        }
    }

    fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }
}

impl HttpClient for StubClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        if let Some(body) = &req.body {
            self.bodies
                .lock()
                .unwrap()
                .push(serde_json::from_slice(body).unwrap());
        }
        let body = if self.status == http::StatusCode::OK {
            json!({"messages": [{"id": "wamid.out"}]})
        } else {
            json!({"error": {"code": 100}})
        };
        Ok(HttpResponse::new(
            self.status,
            http::HeaderMap::new(),
            serde_json::to_vec(&body).unwrap(),
        ))
    }
}

fn parse(args: &[&str]) -> (Command, ValidatedConfig) {
    let mut full_args = vec![
        "whatsapp-cloud",
        "--access-token",
        "EAAG",
        "--phone-number-id",
        "123",
    ];
    full_args.extend(args);
    let cli = Cli::parse_from_iter(full_args);
    let config = ValidatedConfig::from_raw(&cli, None).unwrap();
    (cli.command, config)
}

async fn run(args: &[&str], http: &StubClient) -> (Result<Outcome, RunError>, String) {
    let (command, config) = parse(args);
    let mut out = Vec::new();
    let result = execute_with(command, &config, http, &mut out).await;
    (result, String::from_utf8(out).unwrap())
}

fn sign(body: &[u8], secret: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    format!("sha256={}", hex::encode(mac.finalize().into_bytes()))
}

mod run_error {
    use super::*;

    #[test]
    fn invalid_signature_displays_message() {
        let error = RunError::InvalidSignature;
        assert_eq!(
            error.to_string(),
            "Webhook signature does not match the payload"
        );
    }

    #[test]
    fn config_errors_are_flagged() {
        let error = RunError::from(ConfigError::missing("access_token", "hint"));
        assert!(error.is_config());
        assert!(!RunError::InvalidSignature.is_config());
    }
}

mod outbound {
    use super::*;

    #[test]
    fn send_text_options_are_applied() {
        let (command, _) = parse(&[
            "send-text",
            "--to",
            "1",
            "--body",
            "hi",
            "--reply-to",
            "wamid.0",
            "--no-preview",
        ]);

        let (to, message) = outbound_message(&command).unwrap();

        assert_eq!(to, "1");
        assert_eq!(
            message,
            OutboundMessage::Text(
                TextMessage::new("hi")
                    .reply_to("wamid.0")
                    .with_preview_url(false)
            )
        );
    }

    #[test]
    fn media_id_flag_selects_id_source() {
        let (command, _) = parse(&["send-image", "--to", "1", "--image", "42", "--media-id"]);

        let (_, message) = outbound_message(&command).unwrap();

        assert_eq!(
            message,
            OutboundMessage::Image(ImageMessage::new(MediaSource::new("42", false)))
        );
    }

    #[test]
    fn template_without_vars_has_no_components() {
        assert!(template("hello_world", &[], &[]).components.is_empty());
        assert_eq!(
            template("t", &[], &["a".to_string()]).components.len(),
            1
        );
        assert_eq!(
            template("t", &["h".to_string()], &[]).components.len(),
            2
        );
    }

    #[test]
    fn non_send_commands_have_no_message() {
        let (command, _) = parse(&["mark-read", "--message-id", "m"]);

        assert!(outbound_message(&command).is_none());
    }
}

mod execution {
    use super::*;

    #[tokio::test]
    async fn accepted_send_prints_result() {
        let http = StubClient::new(http::StatusCode::OK);

        let (result, out) = run(&["react", "--to", "1", "--message-id", "m", "--emoji", "👍"], &http).await;

        assert_eq!(result.unwrap(), Outcome::Completed);
        let printed: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(printed["success"], true);
        assert_eq!(printed["http_status"], 200);
        assert_eq!(http.bodies()[0]["type"], "reaction");
    }

    #[tokio::test]
    async fn rejected_send_is_not_an_error() {
        let http = StubClient::new(http::StatusCode::BAD_REQUEST);

        let (result, out) = run(&["send-text", "--to", "1", "--body", "x"], &http).await;

        assert_eq!(result.unwrap(), Outcome::Rejected);
        assert!(out.contains("\"success\": false"));
    }

    #[tokio::test]
    async fn mark_read_sends_receipt() {
        let http = StubClient::new(http::StatusCode::OK);

        let (result, _) = run(&["mark-read", "--message-id", "wamid.in"], &http).await;

        assert_eq!(result.unwrap(), Outcome::Completed);
        assert_eq!(http.bodies()[0]["status"], "read");
    }

    #[tokio::test]
    async fn oversized_location_request_fails_without_sending() {
        let http = StubClient::new(http::StatusCode::OK);
        let body = "a".repeat(1025);

        let (result, out) = run(&["request-location", "--to", "1", "--body", body.as_str()], &http).await;

        assert!(matches!(result, Err(RunError::Send(SendError::Validation(_)))));
        assert!(out.is_empty());
        assert!(http.bodies().is_empty());
    }

    #[tokio::test]
    async fn invalid_media_url_is_reported() {
        let http = StubClient::new(http::StatusCode::OK);

        let (result, _) = run(
            &["download-media", "--url", "not a url", "--mime-type", "image/png"],
            &http,
        )
        .await;

        assert!(matches!(result, Err(RunError::InvalidMediaUrl { .. })));
    }

    #[tokio::test]
    async fn missing_credentials_surface_as_config_error() {
        let cli = Cli::parse_from_iter(["whatsapp-cloud", "inspect-webhook", "x.json"]);
        let config = ValidatedConfig::from_raw(&cli, None).unwrap();
        let command = Cli::parse_from_iter(["whatsapp-cloud", "mark-read", "--message-id", "m"])
            .command;
        let http = StubClient::new(http::StatusCode::OK);

        let result = execute_with(command, &config, &http, &mut Vec::new()).await;

        assert!(result.is_err_and(|e| e.is_config()));
    }
}

mod webhook_inspection {
    use super::*;
    use std::io::Write as _;

    const DELIVERY: &str = r#"{
        "object": "whatsapp_business_account",
        "entry": [{
            "id": "1",
            "changes": [{
                "field": "messages",
                "value": {
                    "messaging_product": "whatsapp",
                    "contacts": [{"profile": {"name": "Ana"}, "wa_id": "263771234567"}],
                    "messages": [{
                        "from": "263771234567",
                        "id": "wamid.in",
                        "timestamp": "1700000000",
                        "type": "text",
                        "text": {"body": "hello"}
                    }]
                }
            }]
        }]
    }"#;

    fn delivery_file() -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DELIVERY.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn prints_extracted_fields() {
        let file = delivery_file();
        let mut out = Vec::new();

        let outcome = inspect_webhook(file.path(), None, None, &mut out)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Completed);
        let printed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["sender_name"], "Ana");
        assert_eq!(printed["message_text"], "hello");
        assert_eq!(printed["is_message"], true);
        assert_eq!(printed["signature_verified"], Value::Null);
    }

    #[tokio::test]
    async fn valid_signature_is_reported() {
        let file = delivery_file();
        let signature = sign(DELIVERY.as_bytes(), "secret");
        let mut out = Vec::new();

        inspect_webhook(file.path(), Some(&signature), Some("secret"), &mut out)
            .await
            .unwrap();

        let printed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["signature_verified"], true);
    }

    #[tokio::test]
    async fn wrong_signature_is_rejected() {
        let file = delivery_file();
        let signature = sign(DELIVERY.as_bytes(), "other");

        let result =
            inspect_webhook(file.path(), Some(&signature), Some("secret"), &mut Vec::new()).await;

        assert!(matches!(result, Err(RunError::InvalidSignature)));
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();

        let result =
            inspect_webhook(&dir.path().join("absent.json"), None, None, &mut Vec::new()).await;

        assert!(matches!(result, Err(RunError::ReadDelivery { .. })));
    }

    #[tokio::test]
    async fn malformed_delivery_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"entry": []}"#).unwrap();

        let result = inspect_webhook(file.path(), None, None, &mut Vec::new()).await;

        assert!(matches!(result, Err(RunError::Webhook(_))));
    }
}
