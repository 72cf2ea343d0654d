use std::sync::Arc;

use tracing::debug;

use shared_gateway::ApiGateway;
use shared_models::error::ApiError;

use crate::models::{AiAnalysisResponse, ChatInput, RecommendationInput, SymptomsAnalysisInput};

/// The AI endpoints are proxied by the backend, which holds the model
/// credentials; the client only ever talks to its own API. Responses are
/// generated text, not entity collections, so nothing here is cached.
pub struct AssistantService {
    gateway: Arc<ApiGateway>,
}

impl AssistantService {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn analyze_symptoms(
        &self,
        input: &SymptomsAnalysisInput,
    ) -> Result<AiAnalysisResponse, ApiError> {
        debug!("Requesting symptom analysis");
        self.gateway.post("/api/ai/analyze-symptoms", input).await
    }

    pub async fn generate_recommendation(
        &self,
        input: &RecommendationInput,
    ) -> Result<AiAnalysisResponse, ApiError> {
        debug!("Requesting care recommendation");
        self.gateway
            .post("/api/ai/generate-recommendation", input)
            .await
    }

    pub async fn chat(&self, input: &ChatInput) -> Result<AiAnalysisResponse, ApiError> {
        self.gateway.post("/api/ai/chat", input).await
    }
}
