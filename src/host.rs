//! Host identity: which deployment group owns a set of schedules.
//!
//! Scaled-out processes of one deployment share a host identity and
//! therefore share the same stored status records per schedule name.

use async_trait::async_trait;

use crate::Result;

/// Source of the host identity. Resolved asynchronously, once per process,
/// by the consuming store; expected stable for the process lifetime.
#[async_trait]
pub trait HostIdProvider: Send + Sync {
    /// The identity of this host group, or `None` when the hosting
    /// environment has not provisioned one.
    async fn host_id(&self) -> Result<Option<String>>;
}

/// Fixed identity, typically taken from deployment configuration.
pub struct FixedHostId {
    id: String,
}

impl FixedHostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

#[async_trait]
impl HostIdProvider for FixedHostId {
    async fn host_id(&self) -> Result<Option<String>> {
        Ok(Some(self.id.clone()))
    }
}

/// Identity derived from the OS hostname. Suitable for single-instance
/// deployments; scaled-out groups should configure a shared id instead.
pub struct MachineHostId;

#[async_trait]
impl HostIdProvider for MachineHostId {
    async fn host_id(&self) -> Result<Option<String>> {
        let name = hostname::get()?;
        Ok(name.into_string().ok().filter(|n| !n.is_empty()))
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_host_id() {
        let provider = FixedHostId::new("host-42");
        assert_eq!(provider.host_id().await.unwrap(), Some("host-42".into()));
    }

    #[tokio::test]
    async fn test_machine_host_id_resolves() {
        // Can't assert the value without controlling the OS, but resolution
        // itself must not fail.
        let provider = MachineHostId;
        assert!(provider.host_id().await.is_ok());
    }
}
