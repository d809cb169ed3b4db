//! Shared fleet context for commands.
//!
//! Owns the API client plus the short-TTL caches for the camera inventory
//! and the health probe, and is passed explicitly to whatever needs fleet
//! data. Commands that look at the inventory more than once within a run
//! (list + detail, summary + export) reuse the cached batch.

use crate::api::client::CameraClient;
use crate::api::models::{Camera, Health};
use crate::libs::cache::TtlCache;
use crate::libs::config::Config;
use anyhow::Result;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

pub struct Fleet {
    client: Arc<CameraClient>,
    cameras: Mutex<TtlCache<(), Vec<Camera>>>,
    health: Mutex<TtlCache<(), Health>>,
}

impl Fleet {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Arc::new(CameraClient::new(&config.api)?);
        let cache = &config.cache;
        Ok(Self {
            client,
            cameras: Mutex::new(TtlCache::new(Duration::from_secs(cache.cameras_ttl_secs), 2)),
            health: Mutex::new(TtlCache::new(Duration::from_secs(cache.health_ttl_secs), 2)),
        })
    }

    pub fn client(&self) -> Arc<CameraClient> {
        self.client.clone()
    }

    /// Camera inventory, fetched at most once per TTL window.
    pub async fn cameras(&self) -> Result<Vec<Camera>> {
        if let Some(cached) = self.cameras.lock().get(&()) {
            return Ok(cached);
        }
        let fetched = self.client.get_all_cameras().await?;
        self.cameras.lock().insert((), fetched.clone());
        Ok(fetched)
    }

    pub async fn camera(&self, uid: &str) -> Result<Option<Camera>> {
        Ok(self.cameras().await?.into_iter().find(|c| c.uid == uid))
    }

    /// Service health. An unreachable health endpoint is reported as an
    /// error status rather than failing the surrounding command.
    pub async fn health(&self) -> Health {
        if let Some(cached) = self.health.lock().get(&()) {
            return cached;
        }
        let health = match self.client.get_health().await {
            Ok(h) => h,
            Err(e) => {
                tracing::warn!(error = %e, "health probe failed");
                Health::error()
            }
        };
        self.health.lock().insert((), health.clone());
        health
    }
}
