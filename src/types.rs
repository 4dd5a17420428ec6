//! The persisted status record for a named schedule.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
};

/// Durable record of one schedule's most recent and next expected firing.
///
/// Written as a whole on every update — there are no partial-field updates.
/// `last_updated` is the write time of the record itself, distinct from
/// `last`; catch-up logic uses it to judge staleness after a restart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStatus {
    /// Most recent firing that was recorded. Absent before the first one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<DateTime<Utc>>,
    /// Next expected firing, as computed at the time of the last update.
    pub next: DateTime<Utc>,
    /// When this record was written.
    pub last_updated: DateTime<Utc>,
}
