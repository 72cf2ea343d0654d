use serde::{Deserialize, Serialize};

/// Envelope every AI endpoint answers with. `data` carries the generated
/// text; `error` is only set when `success` is false.
#[derive(Debug, Clone, Deserialize)]
pub struct AiAnalysisResponse {
    pub success: bool,
    pub data: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SymptomsAnalysisInput {
    pub symptoms: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationInput {
    pub symptoms: String,
    pub medical_history: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatInput {
    pub prompt: String,
}
