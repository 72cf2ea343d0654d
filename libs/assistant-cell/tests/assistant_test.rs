use std::sync::Arc;

use assert_matches::assert_matches;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use assistant_cell::models::{ChatInput, SymptomsAnalysisInput};
use assistant_cell::services::AssistantService;
use shared_gateway::ApiGateway;
use shared_models::error::ApiError;
use shared_utils::test_utils::{authenticated_session, TestConfig};

async fn service_for(server: &MockServer) -> AssistantService {
    let session = authenticated_session("valid-token", "refresh-1").await;
    let config = TestConfig::for_server(&server.uri()).to_app_config();
    AssistantService::new(Arc::new(ApiGateway::new(&config, session)))
}

#[tokio::test]
async fn chat_posts_the_prompt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/chat"))
        .and(body_json(json!({"prompt": "¿Qué debo preguntar en un control?"})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "data": "Lleve su historial reciente."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let reply = service
        .chat(&ChatInput {
            prompt: "¿Qué debo preguntar en un control?".to_string(),
        })
        .await
        .unwrap();

    assert!(reply.success);
    assert_eq!(reply.data, "Lleve su historial reciente.");
    assert_eq!(reply.error, None);
}

#[tokio::test]
async fn symptom_analysis_failures_propagate_as_server_rejections() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/ai/analyze-symptoms"))
        .respond_with(
            ResponseTemplate::new(502).set_body_json(json!({"message": "Modelo no disponible"})),
        )
        .mount(&server)
        .await;

    let service = service_for(&server).await;
    let err = service
        .analyze_symptoms(&SymptomsAnalysisInput {
            symptoms: "Dolor de cabeza".to_string(),
        })
        .await
        .unwrap_err();

    assert_matches!(err, ApiError::ServerRejected { status, message } => {
        assert_eq!(status.as_u16(), 502);
        assert_eq!(message, "Modelo no disponible");
    });
}
