// src/session.rs
//! Per-console context handed to every handler: the backend client plus the
//! location cache.
//!
//! Cache rules:
//! - every dashboard load replaces the cached list with the fresh fetch
//! - detail views and fragments fetch only when the cache is empty
//! - `invalidate` empties it; the next reader refetches

use tokio::sync::RwLock;

use crate::api_client::BackendClient;
use crate::error::ConsoleResult;
use crate::inventory::LocationIndex;
use crate::models::Location;

pub struct SessionContext {
    pub client: BackendClient,
    pub locations: LocationCache,
}

impl SessionContext {
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            locations: LocationCache::default(),
        }
    }

    /// Cached locations, fetching them first if the cache is empty.
    pub async fn locations(&self) -> ConsoleResult<Vec<Location>> {
        if let Some(cached) = self.locations.snapshot().await {
            return Ok(cached);
        }

        log::debug!("Location cache empty, fetching from backend");
        let fresh = self.client.list_locations().await?;
        self.locations.replace(fresh.clone()).await;
        Ok(fresh)
    }

    /// Always fetches, then replaces the cache.
    pub async fn refresh_locations(&self) -> ConsoleResult<Vec<Location>> {
        let fresh = self.client.list_locations().await?;
        self.locations.replace(fresh.clone()).await;
        Ok(fresh)
    }

    pub async fn location_index(&self) -> ConsoleResult<LocationIndex> {
        Ok(LocationIndex::from_locations(&self.locations().await?))
    }
}

#[derive(Default)]
pub struct LocationCache {
    inner: RwLock<Vec<Location>>,
}

impl LocationCache {
    pub async fn replace(&self, locations: Vec<Location>) {
        *self.inner.write().await = locations;
    }

    /// `None` when empty.
    pub async fn snapshot(&self) -> Option<Vec<Location>> {
        let guard = self.inner.read().await;
        if guard.is_empty() {
            None
        } else {
            Some(guard.clone())
        }
    }

    pub async fn invalidate(&self) {
        self.inner.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }
}
