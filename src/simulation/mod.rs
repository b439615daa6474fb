//! Simulation Runtime
//!
//! Binds the orchestrator's virtual clock to tokio time.
//!
//! ## Core Mechanisms
//! - **Driver loop**: a single background task sleeps until the next scheduled step, then
//!   advances the orchestrator. Commands wake it through a `Notify` when they schedule work.
//! - **Single writer**: all mutation happens under one mutex, so steps of different
//!   operations can never interleave.
//! - **Snapshot channel**: the current `ClusterSnapshot` is published through
//!   `tokio::sync::watch`; readers always see a whole version, never a partial update.

pub mod service;

pub use service::ScalingService;
