//! Integration tests for the Gemini inference engine using WireMock
//!
//! These tests mock the Generative Language REST API to verify client
//! behavior without network access.

use ai_core::gemini::types::{GenerateContentRequest, GenerationConfig};
use ai_core::{GeminiInferenceEngine, InferenceConfig, InferenceEngine, InferenceError, InferenceRequest};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, method, path, query_param},
};

// =============================================================================
// Test Helpers
// =============================================================================

fn config_for_mock(base_url: &str) -> InferenceConfig {
    InferenceConfig {
        api_key: "test-key".to_string(),
        base_url: base_url.to_string(),
        default_model: "test-model".to_string(),
        temperature: 0.7,
        max_tokens: 100,
        timeout_ms: Some(5000),
    }
}

fn engine_for(server: &MockServer) -> GeminiInferenceEngine {
    GeminiInferenceEngine::new(config_for_mock(&server.uri())).expect("Failed to create engine")
}

/// Sample generateContent success response
fn generate_success_response() -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": {
                "role": "model",
                "parts": [{ "text": "Hello! How can I help you today?" }]
            },
            "finishReason": "STOP"
        }],
        "usageMetadata": {
            "promptTokenCount": 10,
            "candidatesTokenCount": 15,
            "totalTokenCount": 25
        },
        "modelVersion": "test-model"
    })
}

/// Sample models list response
fn models_list_response() -> serde_json::Value {
    serde_json::json!({
        "models": [
            { "name": "models/gemini-2.5-pro-preview-06-05" },
            { "name": "models/gemini-2.5-flash-preview-tts" },
            { "name": "models/text-embedding-004" }
        ]
    })
}

fn api_key_invalid_response() -> serde_json::Value {
    serde_json::json!({
        "error": {
            "code": 400,
            "message": "API key not valid. Please pass a valid API key.",
            "status": "INVALID_ARGUMENT",
            "details": [{
                "@type": "type.googleapis.com/google.rpc.ErrorInfo",
                "reason": "API_KEY_INVALID"
            }]
        }
    })
}

// =============================================================================
// generateContent
// =============================================================================

mod generate_tests {
    use super::*;

    #[tokio::test]
    async fn generate_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(generate_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let response = engine.generate(InferenceRequest::simple("Hello")).await.unwrap();

        assert_eq!(response.model, "test-model");
        assert!(response.content.contains("Hello"));
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 10);
        assert_eq!(usage.completion_tokens, 15);
        assert_eq!(usage.total_tokens, 25);
    }

    #[tokio::test]
    async fn generate_sends_prompt_and_generation_config() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/custom-model:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "contents": [{ "parts": [{ "text": "Hi there" }] }],
                "generationConfig": { "temperature": 0.2, "maxOutputTokens": 42 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(generate_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let request = InferenceRequest::simple("Hi there")
            .with_model("custom-model")
            .with_temperature(0.2)
            .with_max_tokens(42);

        assert!(engine.generate(request).await.is_ok());
    }

    #[tokio::test]
    async fn generate_uses_config_defaults() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": { "temperature": 0.7, "maxOutputTokens": 100 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(generate_success_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        assert!(engine.generate(InferenceRequest::simple("x")).await.is_ok());
    }

    #[tokio::test]
    async fn generate_without_text_is_empty_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "candidates": [{ "finishReason": "SAFETY" }] })),
            )
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let err = engine.generate(InferenceRequest::simple("x")).await.unwrap_err();
        assert!(matches!(err, InferenceError::EmptyResponse));
    }

    #[tokio::test]
    async fn generate_server_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let err = engine.generate(InferenceRequest::simple("Hello")).await.unwrap_err();

        assert!(matches!(err, InferenceError::ServerError(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn generate_rate_limited() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let err = engine.generate(InferenceRequest::simple("Hello")).await.unwrap_err();
        assert!(matches!(err, InferenceError::RateLimited));
    }

    #[tokio::test]
    async fn generate_invalid_json_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let err = engine.generate(InferenceRequest::simple("Hello")).await.unwrap_err();
        assert!(matches!(err, InferenceError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn raw_generate_content_returns_inline_audio() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/tts-model:generateContent"))
            .and(body_partial_json(serde_json::json!({
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": { "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Kore" } } }
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "inlineData": { "mimeType": "audio/L16;rate=24000", "data": "AAEC" } }] }
                }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let request = GenerateContentRequest::text("Say hi").with_config(GenerationConfig::audio("Kore"));
        let response = engine.generate_content("tts-model", &request).await.unwrap();

        assert_eq!(response.first_inline_data().unwrap().data, "AAEC");
    }
}

// =============================================================================
// Model listing and health
// =============================================================================

mod model_tests {
    use super::*;

    #[tokio::test]
    async fn list_models_strips_prefix() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header("x-goog-api-key", "test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(models_list_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let models = engine.list_models().await.unwrap();

        assert_eq!(models.len(), 3);
        assert!(models.contains(&"gemini-2.5-flash-preview-tts".to_string()));
    }

    #[tokio::test]
    async fn list_models_follows_pagination() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .and(query_param("pageToken", "page-2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{ "name": "models/gemini-2.5-pro-preview-tts" }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "models": [{ "name": "models/gemini-2.0-flash" }],
                "nextPageToken": "page-2"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let models = engine.list_models().await.unwrap();

        assert_eq!(
            models,
            vec![
                "gemini-2.0-flash".to_string(),
                "gemini-2.5-pro-preview-tts".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn invalid_api_key_is_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(400).set_body_json(api_key_invalid_response()))
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let err = engine.list_models().await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn forbidden_is_unauthorized() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(403).set_body_string("denied"))
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        let err = engine.list_models().await.unwrap_err();
        assert!(matches!(err, InferenceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn health_check_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(models_list_response()))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        assert!(engine.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn health_check_server_down() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        assert!(!engine.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn health_check_propagates_auth_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let engine = engine_for(&mock_server);
        assert!(engine.health_check().await.is_err());
    }

    #[tokio::test]
    async fn unreachable_server_is_connection_failure() {
        let engine = GeminiInferenceEngine::new(config_for_mock("http://127.0.0.1:1"))
            .expect("Failed to create engine");

        let err = engine.list_models().await.unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn slow_response_is_awaited_without_a_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(generate_success_response())
                    .set_delay(std::time::Duration::from_millis(1500)),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = InferenceConfig {
            timeout_ms: None,
            ..config_for_mock(&mock_server.uri())
        };
        let engine = GeminiInferenceEngine::new(config).expect("Failed to create engine");

        assert!(engine.generate(InferenceRequest::simple("Hello")).await.is_ok());
    }

    #[tokio::test]
    async fn configured_timeout_cuts_off_slow_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(generate_success_response())
                    .set_delay(std::time::Duration::from_millis(1500)),
            )
            .mount(&mock_server)
            .await;

        let config = InferenceConfig {
            timeout_ms: Some(200),
            ..config_for_mock(&mock_server.uri())
        };
        let engine = GeminiInferenceEngine::new(config).expect("Failed to create engine");

        let err = engine
            .generate(InferenceRequest::simple("Hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, InferenceError::Timeout(200)));
    }

    #[test]
    fn default_model_getter() {
        let engine = GeminiInferenceEngine::new(config_for_mock("http://localhost"))
            .expect("Failed to create engine");
        assert_eq!(engine.default_model(), "test-model");
    }
}
