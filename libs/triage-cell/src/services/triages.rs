use std::sync::Arc;

use tracing::{debug, info};

use shared_gateway::ApiGateway;
use shared_models::error::ApiError;
use shared_query::{QueryCache, QueryKey};

use crate::models::{Triage, TriageCreateInput, TriageUpdateInput};

pub struct TriageService {
    gateway: Arc<ApiGateway>,
    cache: Arc<QueryCache>,
}

impl TriageService {
    pub fn new(gateway: Arc<ApiGateway>, cache: Arc<QueryCache>) -> Self {
        Self { gateway, cache }
    }

    fn root_key() -> QueryKey {
        QueryKey::new("triages")
    }

    pub async fn get_all(&self) -> Result<Vec<Triage>, ApiError> {
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(Self::root_key(), || async move {
                gateway.get("/api/triages").await
            })
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Triage, ApiError> {
        let key = Self::root_key().with(id);
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(key, || async move {
                gateway.get(&format!("/api/triages/{}", id)).await
            })
            .await
    }

    pub async fn get_by_patient(&self, patient_id: i64) -> Result<Vec<Triage>, ApiError> {
        let key = Self::root_key().with("patient").with(patient_id);
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(key, || async move {
                gateway
                    .get(&format!("/api/triages/patient/{}", patient_id))
                    .await
            })
            .await
    }

    pub async fn create(&self, input: &TriageCreateInput) -> Result<Triage, ApiError> {
        debug!(
            "Recording triage for patient {} at priority {}",
            input.patient_id, input.priority
        );
        let created: Triage = self.gateway.post("/api/triages", input).await?;
        self.cache.invalidate(&Self::root_key());
        info!("Triage {} created", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: &TriageUpdateInput) -> Result<Triage, ApiError> {
        let updated: Triage = self
            .gateway
            .put(&format!("/api/triages/{}", id), input)
            .await?;
        self.cache.invalidate(&Self::root_key());
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/api/triages/{}", id)).await?;
        self.cache.invalidate(&Self::root_key());
        info!("Triage {} deleted", id);
        Ok(())
    }
}
