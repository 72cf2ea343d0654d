use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::RwLock;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use shared_models::error::ApiError;

/// Logical identity of a fetched collection: the entity resource plus any
/// narrowing parameters, e.g. `appointments/patient/3`. Write operations
/// invalidate by resource prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Vec<String>);

impl QueryKey {
    pub fn new(resource: impl Into<String>) -> Self {
        Self(vec![resource.into()])
    }

    pub fn with(mut self, segment: impl ToString) -> Self {
        self.0.push(segment.to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Whole-segment prefix match: `appointments` covers
    /// `appointments/patient/3` but not `appointments-archive`.
    pub fn starts_with(&self, prefix: &QueryKey) -> bool {
        self.0.len() >= prefix.0.len()
            && self.0.iter().zip(prefix.0.iter()).all(|(a, b)| a == b)
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// Read-through cache over fetched entity collections. Entries are replaced
/// wholesale per key, never merged, so a slow response landing out of order
/// cannot corrupt a newer one.
#[derive(Default)]
pub struct QueryCache {
    entries: RwLock<HashMap<QueryKey, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached collection under `key`, running `fetch` and
    /// storing its result on a miss.
    pub async fn get_or_fetch<T, F, Fut>(&self, key: QueryKey, fetch: F) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>>,
    {
        let cached = self.entries.read().unwrap().get(&key).cloned();
        if let Some(value) = cached {
            trace!("Cache hit for {}", key);
            return Ok(serde_json::from_value(value)?);
        }

        let fresh = fetch().await?;
        let value = serde_json::to_value(&fresh)?;
        self.entries.write().unwrap().insert(key, value);
        Ok(fresh)
    }

    /// Drops every entry whose key starts with `prefix`. Called after each
    /// successful write so the next read refetches.
    pub fn invalidate(&self, prefix: &QueryKey) {
        let mut entries = self.entries.write().unwrap();
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        debug!(
            "Invalidated {} cache entries under {}",
            before - entries.len(),
            prefix
        );
    }

    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}
