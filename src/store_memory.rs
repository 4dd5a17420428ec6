//! In-memory store for testing.

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;

use crate::{Result, store::StatusStore, types::ScheduleStatus};

/// In-memory store backed by `HashMap`. No persistence — statuses vanish
/// with the process.
pub struct InMemoryStore {
    statuses: Mutex<HashMap<String, ScheduleStatus>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            statuses: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StatusStore for InMemoryStore {
    async fn get(&self, schedule: &str) -> Result<Option<ScheduleStatus>> {
        let statuses = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
        Ok(statuses.get(schedule).cloned())
    }

    async fn set(&self, schedule: &str, status: &ScheduleStatus) -> Result<()> {
        let mut statuses = self.statuses.lock().unwrap_or_else(|e| e.into_inner());
        statuses.insert(schedule.to_string(), status.clone());
        Ok(())
    }
}
