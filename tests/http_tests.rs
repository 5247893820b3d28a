//! Integration tests for the HTTP collaborators
//!
//! Runs the OpenAI backend and the remote rentals source against a local mock server.

use offbeat::ai::{ChatError, CompletionBackend, GenerationParams, OpenAiBackend};
use offbeat::rentals::{HttpRentalsSource, RentalsSource};
use offbeat::types::ChatMessage;
use offbeat::{ConversationManager, FALLBACK_REPLY};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

mod completion_tests {
    use super::*;

    #[tokio::test]
    async fn sends_the_expected_payload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_json(json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hello"}
                ],
                "max_tokens": 800,
                "temperature": 0.6
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("Hi there")))
            .expect(1)
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(format!("{}/v1", server.uri()), Some("sk-test".into()));
        let reply = backend
            .complete(
                &[ChatMessage::system("sys"), ChatMessage::user("hello")],
                &GenerationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(reply, "Hi there");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(json!({"error": {"message": "Incorrect API key"}})),
            )
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(server.uri(), Some("bad".into()));
        let err = backend
            .complete(&[ChatMessage::user("hi")], &GenerationParams::default())
            .await
            .unwrap_err();
        match err {
            ChatError::Status { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("Incorrect API key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn no_choices_is_an_empty_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let backend = OpenAiBackend::new(server.uri(), None);
        let err = backend
            .complete(&[ChatMessage::user("hi")], &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyReply));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_http_error() {
        let backend = OpenAiBackend::new("http://127.0.0.1:9", None);
        let err = backend
            .complete(&[ChatMessage::user("hi")], &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Http(_)));
    }
}

mod rentals_tests {
    use super::*;

    #[tokio::test]
    async fn fetches_remote_listings() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rentals.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"name": "Desert Dome"}])),
            )
            .mount(&server)
            .await;

        let source = HttpRentalsSource::new(format!("{}/rentals.json", server.uri()));
        assert_eq!(source.fetch().await.unwrap(), json!([{"name": "Desert Dome"}]));
    }

    #[tokio::test]
    async fn missing_listings_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpRentalsSource::new(format!("{}/rentals.json", server.uri()));
        assert!(matches!(
            source.fetch().await,
            Err(ChatError::Status { .. })
        ));
    }
}

mod end_to_end_tests {
    use super::*;

    #[tokio::test]
    async fn full_turn_over_http() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rentals.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([{"name": "Villa A"}])),
            )
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("- Villa A\n- Villa B")),
            )
            .mount(&server)
            .await;

        let manager = ConversationManager::new(
            HttpRentalsSource::new(format!("{}/rentals.json", server.uri())),
            OpenAiBackend::new(server.uri(), Some("sk-test".into())),
        );
        let reply = manager.submit_user_turn("Looking for a beach house").await;
        assert_eq!(reply.as_deref(), Some("- Villa A\n- Villa B"));

        let transcript = manager.transcript().await;
        assert_eq!(transcript.len(), 4);
        assert_eq!(
            transcript.messages()[1].content,
            r#"Rentals data: [{"name":"Villa A"}]"#
        );
    }

    #[tokio::test]
    async fn both_collaborators_down_yields_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let manager = ConversationManager::new(
            HttpRentalsSource::new(format!("{}/rentals.json", server.uri())),
            OpenAiBackend::new(server.uri(), None),
        );
        let reply = manager.submit_user_turn("hello").await;
        assert_eq!(reply.as_deref(), Some(FALLBACK_REPLY));

        let transcript = manager.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript.messages()[1].content, "Rentals data: ");
    }
}
