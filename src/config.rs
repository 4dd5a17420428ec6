//! Backend selection for the status store.

use std::{path::PathBuf, sync::Arc};

use {
    object_store::aws::AmazonS3Builder,
    serde::{Deserialize, Serialize},
    tracing::info,
};

use crate::{
    Result,
    blob::ObjectStoreContainer,
    host::HostIdProvider,
    store::StatusStore,
    store_blob::BlobStore,
    store_file::FileStore,
    store_memory::InMemoryStore,
};

/// Which persistence backend holds schedule status records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "camelCase")]
pub enum StoreConfig {
    /// No persistence; statuses vanish with the process.
    #[default]
    Memory,
    /// Single JSON file on local disk.
    File { path: PathBuf },
    /// S3-compatible object store. Credentials come from the environment.
    S3 {
        bucket: String,
        /// AWS region. Defaults to "us-east-1".
        #[serde(default = "default_region")]
        region: String,
        /// Custom endpoint for S3-compatible stacks (e.g. MinIO). Plain
        /// `http://` endpoints are allowed for local development.
        #[serde(skip_serializing_if = "Option::is_none")]
        endpoint: Option<String>,
    },
}

fn default_region() -> String {
    "us-east-1".into()
}

impl StoreConfig {
    /// Wire up the configured backend. The blob backend resolves `provider`
    /// lazily on first use; the memory and file backends ignore it.
    pub fn build(&self, provider: Arc<dyn HostIdProvider>) -> Result<Arc<dyn StatusStore>> {
        match self {
            Self::Memory => {
                info!("schedule status store: memory backend");
                Ok(Arc::new(InMemoryStore::new()))
            },
            Self::File { path } => {
                info!(path = %path.display(), "schedule status store: file backend");
                Ok(Arc::new(FileStore::new(path.clone())))
            },
            Self::S3 {
                bucket,
                region,
                endpoint,
            } => {
                let mut builder = AmazonS3Builder::from_env()
                    .with_bucket_name(bucket)
                    .with_region(region);

                if let Some(endpoint) = endpoint {
                    // object_store requires absolute endpoint URLs.
                    let url = if endpoint.starts_with("http://")
                        || endpoint.starts_with("https://")
                    {
                        endpoint.clone()
                    } else {
                        format!("https://{endpoint}")
                    };
                    builder = builder
                        .with_endpoint(&url)
                        .with_allow_http(url.starts_with("http://"));
                }

                let store = builder.build()?;
                info!(bucket = %bucket, region = %region, "schedule status store: s3 backend");
                let container = Arc::new(ObjectStoreContainer::new(Arc::new(store)));
                Ok(Arc::new(BlobStore::new(container, provider)))
            },
        }
    }
}
