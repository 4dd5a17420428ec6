//! JSON file-backed store with atomic writes.

use std::{collections::HashMap, path::PathBuf};

use {async_trait::async_trait, tokio::fs};

use crate::{Result, store::StatusStore, types::ScheduleStatus};

/// File-backed store. All statuses live in one JSON file keyed by schedule
/// name.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    async fn load_all(&self) -> Result<HashMap<String, ScheduleStatus>> {
        if !fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(HashMap::new());
        }
        let data = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Atomic write: write to temp, rename over target, keep `.bak`.
    async fn atomic_write(&self, statuses: &HashMap<String, ScheduleStatus>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(statuses)?;
        let tmp = self.path.with_extension("json.tmp");

        fs::write(&tmp, json.as_bytes()).await?;

        // Backup existing file.
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            let bak = self.path.with_extension("json.bak");
            let _ = fs::rename(&self.path, &bak).await;
        }

        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl StatusStore for FileStore {
    async fn get(&self, schedule: &str) -> Result<Option<ScheduleStatus>> {
        let mut statuses = self.load_all().await?;
        Ok(statuses.remove(schedule))
    }

    async fn set(&self, schedule: &str, status: &ScheduleStatus) -> Result<()> {
        let mut statuses = self.load_all().await?;
        statuses.insert(schedule.to_string(), status.clone());
        self.atomic_write(&statuses).await
    }
}
