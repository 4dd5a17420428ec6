//! Durable status records for cron-scheduled triggers.
//! Remembers, across restarts and across scaled-out host instances, when each
//! named schedule last fired and when it is next due, so a missed occurrence
//! can be detected and caught up rather than silently skipped.
//! Pluggable persistence: in-memory, JSON file, or a remote object store.

pub mod blob;
pub mod config;
pub mod error;
pub mod host;
pub mod store;
pub mod store_blob;
pub mod store_file;
pub mod store_memory;
pub mod types;

pub use {
    error::{Error, Result},
    store::StatusStore,
    types::ScheduleStatus,
};
