use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, info};

use shared_gateway::ApiGateway;
use shared_models::error::ApiError;
use shared_query::{QueryCache, QueryKey};

use crate::models::{Notification, NotificationCreateInput};

pub struct NotificationService {
    gateway: Arc<ApiGateway>,
    cache: Arc<QueryCache>,
}

impl NotificationService {
    pub fn new(gateway: Arc<ApiGateway>, cache: Arc<QueryCache>) -> Self {
        Self { gateway, cache }
    }

    fn root_key() -> QueryKey {
        QueryKey::new("notifications")
    }

    pub async fn get_all(&self) -> Result<Vec<Notification>, ApiError> {
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(Self::root_key(), || async move {
                gateway.get("/api/notifications").await
            })
            .await
    }

    pub async fn get_unread(&self) -> Result<Vec<Notification>, ApiError> {
        let key = Self::root_key().with("unread");
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(key, || async move {
                gateway.get("/api/notifications/unread").await
            })
            .await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Notification, ApiError> {
        let key = Self::root_key().with(id);
        let gateway = Arc::clone(&self.gateway);
        self.cache
            .get_or_fetch(key, || async move {
                gateway.get(&format!("/api/notifications/{}", id)).await
            })
            .await
    }

    pub async fn create(&self, input: &NotificationCreateInput) -> Result<Notification, ApiError> {
        let created: Notification = self.gateway.post("/api/notifications", input).await?;
        self.cache.invalidate(&Self::root_key());
        info!("Notification {} created", created.id);
        Ok(created)
    }

    pub async fn mark_as_read(&self, id: i64) -> Result<Notification, ApiError> {
        let updated: Notification = self
            .gateway
            .patch_no_body(&format!("/api/notifications/{}/read", id))
            .await?;
        self.cache.invalidate(&Self::root_key());
        Ok(updated)
    }

    /// Issues one write per unread notification, then invalidates the cache
    /// once, after every write has completed. Nothing is marked read
    /// optimistically on the client. Returns how many were marked; if any
    /// write failed, the first failure is surfaced after the rest ran.
    pub async fn mark_all_as_read(&self) -> Result<usize, ApiError> {
        let unread = self.get_unread().await?;
        if unread.is_empty() {
            return Ok(0);
        }

        debug!("Marking {} notifications as read", unread.len());
        let writes = unread.iter().map(|notification| {
            let gateway = Arc::clone(&self.gateway);
            let path = format!("/api/notifications/{}/read", notification.id);
            async move { gateway.patch_no_body::<Notification>(&path).await }
        });
        let results = join_all(writes).await;

        self.cache.invalidate(&Self::root_key());

        let mut marked = 0;
        let mut first_error = None;
        for result in results {
            match result {
                Ok(_) => marked += 1,
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                info!("Marked {} notifications as read", marked);
                Ok(marked)
            }
        }
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.gateway
            .delete(&format!("/api/notifications/{}", id))
            .await?;
        self.cache.invalidate(&Self::root_key());
        Ok(())
    }

    /// Deletes every already-read notification, invalidating once at the end.
    pub async fn delete_all_read(&self) -> Result<usize, ApiError> {
        let read: Vec<Notification> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|notification| notification.read)
            .collect();
        if read.is_empty() {
            return Ok(0);
        }

        let deletes = read.iter().map(|notification| {
            let gateway = Arc::clone(&self.gateway);
            let path = format!("/api/notifications/{}", notification.id);
            async move { gateway.delete(&path).await }
        });
        let results = join_all(deletes).await;

        self.cache.invalidate(&Self::root_key());

        let mut deleted = 0;
        let mut first_error = None;
        for result in results {
            match result {
                Ok(()) => deleted += 1,
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                info!("Deleted {} read notifications", deleted);
                Ok(deleted)
            }
        }
    }
}
