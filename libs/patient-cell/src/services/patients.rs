use std::sync::Arc;

use tracing::{debug, info};

use shared_gateway::ApiGateway;
use shared_models::error::ApiError;
use shared_query::{QueryCache, QueryKey};

use crate::models::{Page, Patient, PatientCreateInput, PatientQuery, PatientUpdateInput};

pub struct PatientService {
    gateway: Arc<ApiGateway>,
    cache: Arc<QueryCache>,
}

impl PatientService {
    pub fn new(gateway: Arc<ApiGateway>, cache: Arc<QueryCache>) -> Self {
        Self { gateway, cache }
    }

    fn root_key() -> QueryKey {
        QueryKey::new("patients")
    }

    /// Paginated, filtered patient listing. Each parameter set is cached
    /// under its own key.
    pub async fn get_all(&self, query: &PatientQuery) -> Result<Page<Patient>, ApiError> {
        let key = Self::root_key().with("list").with(query.cache_segment());
        let gateway = Arc::clone(&self.gateway);
        let params = query.to_params();
        self.cache
            .get_or_fetch(key, || async move {
                gateway.get_with_params("/api/patients", &params).await
            })
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Patient, ApiError> {
        let key = Self::root_key().with(id);
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(key, || async move {
                gateway.get(&format!("/api/patients/{}", id)).await
            })
            .await
    }

    pub async fn create(&self, input: &PatientCreateInput) -> Result<Patient, ApiError> {
        debug!("Creating patient record for {}", input.identification_number);
        let created: Patient = self.gateway.post("/api/patients", input).await?;
        self.cache.invalidate(&Self::root_key());
        info!("Patient {} created", created.id);
        Ok(created)
    }

    pub async fn update(&self, id: i64, input: &PatientUpdateInput) -> Result<Patient, ApiError> {
        let updated: Patient = self
            .gateway
            .put(&format!("/api/patients/{}", id), input)
            .await?;
        self.cache.invalidate(&Self::root_key());
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway.delete(&format!("/api/patients/{}", id)).await?;
        self.cache.invalidate(&Self::root_key());
        info!("Patient {} deleted", id);
        Ok(())
    }
}
