//! Object-store-backed status store.
//!
//! Records live at `timers/<hostId>/<scheduleName>/status`. The host
//! identity is only known once the owning host finishes startup, so it is
//! resolved lazily on first use and cached for the process lifetime.

use std::sync::Arc;

use {async_trait::async_trait, bytes::Bytes, tokio::sync::OnceCell, tracing::warn};

use crate::{
    Error, Result,
    blob::BlobContainer,
    host::HostIdProvider,
    store::StatusStore,
    types::ScheduleStatus,
};

/// Key prefix shared by every status record.
const STATUS_PREFIX: &str = "timers";

/// Status store persisting records to a [`BlobContainer`].
///
/// All processes sharing one host identity address the same records, and
/// writes are unconditional — the last completed write wins.
pub struct BlobStore {
    container: Arc<dyn BlobContainer>,
    provider: Arc<dyn HostIdProvider>,
    host_id: OnceCell<String>,
}

impl BlobStore {
    pub fn new(container: Arc<dyn BlobContainer>, provider: Arc<dyn HostIdProvider>) -> Self {
        Self {
            container,
            provider,
            host_id: OnceCell::new(),
        }
    }

    /// Resolve and cache the host identity. Racing first callers resolve it
    /// at most once; an empty or absent identity is a configuration error,
    /// fatal to every operation since all addressing depends on it.
    async fn host_id(&self) -> Result<&str> {
        let id = self
            .host_id
            .get_or_try_init(|| async {
                match self.provider.host_id().await? {
                    Some(id) if !id.is_empty() => Ok(id),
                    _ => Err(Error::MissingHostId),
                }
            })
            .await?;
        Ok(id)
    }

    fn status_key(host_id: &str, schedule: &str) -> String {
        format!("{STATUS_PREFIX}/{host_id}/{schedule}/status")
    }
}

#[async_trait]
impl StatusStore for BlobStore {
    async fn get(&self, schedule: &str) -> Result<Option<ScheduleStatus>> {
        let host_id = self.host_id().await?;
        let key = Self::status_key(host_id, schedule);

        let Some(body) = self.container.download(&key).await? else {
            // Normal steady state for a schedule that has never fired.
            return Ok(None);
        };
        let status = serde_json::from_slice(&body)
            .map_err(|source| Error::malformed_status(schedule, source))?;
        Ok(Some(status))
    }

    async fn set(&self, schedule: &str, status: &ScheduleStatus) -> Result<()> {
        let host_id = self.host_id().await?;
        let key = Self::status_key(host_id, schedule);
        let body = Bytes::from(serde_json::to_vec(status)?);

        // Re-ensured on every write rather than cached as known-to-exist,
        // tolerating out-of-band container deletion.
        let result = match self.container.ensure().await {
            Ok(()) => self.container.upload(&key, body).await,
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            warn!(schedule, error = %e, "failed to persist schedule status");
        }
        result
    }
}
