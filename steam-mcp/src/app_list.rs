//! Time-bounded cache of the full Steam app catalog (`ISteamApps/GetAppList`).
//!
//! One snapshot is held at a time and replaced wholesale once it is older than the TTL.
//! The lock is never held across the remote fetch, so two callers that observe a stale
//! snapshot at the same moment may both fetch; the later write wins. The catalog is
//! read-only and both writes carry equally fresh data.
//!
//! A failed refresh leaves the previous snapshot in place and is reported only to the
//! caller that triggered it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::error::SteamError;
use crate::gateway::types::AppEntry;

/// Default snapshot lifetime.
pub const DEFAULT_APP_LIST_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Fetches the full app catalog. Implemented by [`SteamGateway`](crate::gateway::SteamGateway);
/// tests substitute counting mocks.
#[async_trait]
pub trait AppListSource: Send + Sync {
    async fn fetch_app_list(&self) -> Result<Vec<AppEntry>, SteamError>;
}

struct Snapshot {
    apps: Arc<Vec<AppEntry>>,
    fetched_at: Instant,
}

/// Lazily refreshed catalog cache. Construct once per process and share behind an `Arc`.
pub struct AppListCache {
    source: Arc<dyn AppListSource>,
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl AppListCache {
    pub fn new(source: Arc<dyn AppListSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    /// Returns the catalog, fetching it when there is no snapshot or the snapshot has expired.
    pub async fn get(&self) -> Result<Arc<Vec<AppEntry>>, SteamError> {
        {
            let guard = self.snapshot.read().await;
            if let Some(snap) = guard.as_ref() {
                if snap.fetched_at.elapsed() < self.ttl {
                    tracing::debug!(apps = snap.apps.len(), "app list cache hit");
                    return Ok(Arc::clone(&snap.apps));
                }
            }
        }

        let apps = Arc::new(self.source.fetch_app_list().await?);
        {
            let mut guard = self.snapshot.write().await;
            *guard = Some(Snapshot {
                apps: Arc::clone(&apps),
                fetched_at: Instant::now(),
            });
        }
        tracing::info!(apps = apps.len(), "app list cache refreshed");
        Ok(apps)
    }

    /// Drops the snapshot; the next [`get`](Self::get) fetches.
    pub async fn invalidate(&self) {
        *self.snapshot.write().await = None;
    }
}
