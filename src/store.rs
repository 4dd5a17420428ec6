//! Persistence contract for schedule status records.

use async_trait::async_trait;

use crate::{Result, types::ScheduleStatus};

/// Persistence backend for per-schedule status records.
///
/// Schedules are keyed by case-sensitive name; records are replaced whole.
#[async_trait]
pub trait StatusStore: Send + Sync {
    /// The most recently written record for `schedule`, or `Ok(None)` if
    /// none has ever been written. Absence is a normal outcome, not a
    /// fault; any other read failure surfaces as an error.
    async fn get(&self, schedule: &str) -> Result<Option<ScheduleStatus>>;

    /// Persist `status` as the new record for `schedule`, replacing any
    /// prior value. Overwrite-idempotent. There is no compare-and-swap:
    /// the last completed write wins, even across concurrent processes
    /// sharing one host identity. Callers that treat status bookkeeping as
    /// best-effort may ignore the returned result.
    async fn set(&self, schedule: &str, status: &ScheduleStatus) -> Result<()>;
}
