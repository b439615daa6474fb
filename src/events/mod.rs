//! Event Log
//!
//! Append-only, ordered record of human-readable simulation events. Entries are numbered
//! by insertion order and never change once appended. Each append is mirrored to `tracing`.

pub mod log;

pub use log::{EventLog, LogEntry};
