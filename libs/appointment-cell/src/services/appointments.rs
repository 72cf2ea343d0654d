use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info};

use shared_gateway::ApiGateway;
use shared_models::error::ApiError;
use shared_query::{QueryCache, QueryKey};
use shared_utils::dates::format_date_for_input;

use crate::models::{
    Appointment, AppointmentCreateInput, AppointmentStatus, AppointmentUpdateInput,
    StatusUpdateRequest,
};

pub struct AppointmentService {
    gateway: Arc<ApiGateway>,
    cache: Arc<QueryCache>,
}

impl AppointmentService {
    pub fn new(gateway: Arc<ApiGateway>, cache: Arc<QueryCache>) -> Self {
        Self { gateway, cache }
    }

    fn root_key() -> QueryKey {
        QueryKey::new("appointments")
    }

    pub async fn get_all(&self) -> Result<Vec<Appointment>, ApiError> {
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(Self::root_key(), || async move {
                gateway.get("/api/appointments").await
            })
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Appointment, ApiError> {
        let key = Self::root_key().with(id);
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(key, || async move {
                gateway.get(&format!("/api/appointments/{}", id)).await
            })
            .await
    }

    pub async fn get_by_patient(&self, patient_id: i64) -> Result<Vec<Appointment>, ApiError> {
        let key = Self::root_key().with("patient").with(patient_id);
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(key, || async move {
                gateway
                    .get(&format!("/api/appointments/patient/{}", patient_id))
                    .await
            })
            .await
    }

    pub async fn get_by_date(&self, date: NaiveDate) -> Result<Vec<Appointment>, ApiError> {
        let date = format_date_for_input(&date);
        let key = Self::root_key().with("date").with(&date);
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(key, || async move {
                gateway.get(&format!("/api/appointments/date/{}", date)).await
            })
            .await
    }

    pub async fn create(&self, input: &AppointmentCreateInput) -> Result<Appointment, ApiError> {
        debug!(
            "Booking appointment for patient {} with {}",
            input.patient_id, input.doctor_name
        );
        let created: Appointment = self.gateway.post("/api/appointments", input).await?;
        self.cache.invalidate(&Self::root_key());
        info!("Appointment {} created", created.id);
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i64,
        input: &AppointmentUpdateInput,
    ) -> Result<Appointment, ApiError> {
        let updated: Appointment = self
            .gateway
            .put(&format!("/api/appointments/{}", id), input)
            .await?;
        self.cache.invalidate(&Self::root_key());
        Ok(updated)
    }

    pub async fn update_status(
        &self,
        id: i64,
        status: AppointmentStatus,
    ) -> Result<Appointment, ApiError> {
        let updated: Appointment = self
            .gateway
            .patch(
                &format!("/api/appointments/{}/status", id),
                &StatusUpdateRequest { status },
            )
            .await?;
        self.cache.invalidate(&Self::root_key());
        info!("Appointment {} moved to {}", id, status);
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway
            .delete(&format!("/api/appointments/{}", id))
            .await?;
        self.cache.invalidate(&Self::root_key());
        info!("Appointment {} deleted", id);
        Ok(())
    }
}
