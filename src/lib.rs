//! Elastic Scaling Simulation Library
//!
//! A client-local simulation of a distributed database cluster growing and shrinking.
//! Nodes are plain records and "scaling" is a scripted sequence of state changes paced by
//! fixed delays; there is no real networking, consensus or persistence.
//!
//! ## Architecture Modules
//! - **`cluster`**: The state model. Node and partition records, the fixed initial topology,
//!   and immutable versioned snapshots of the node collection.
//! - **`rebalance`**: The rebalancer. Deals every storage partition out evenly across the
//!   active storage nodes.
//! - **`orchestrator`**: The scaling state machine. Validates capacity bounds, gates on a single
//!   in-flight operation and runs each operation's timed steps off a virtual clock.
//! - **`events`**: The append-only, human-readable event log.
//! - **`simulation`**: The tokio runtime that advances the orchestrator in real time and
//!   publishes snapshots to readers.
//! - **`api`**: The HTTP command surface (Axum).
//! - **`config`**: Server bind address resolution.

pub mod api;
pub mod cluster;
pub mod config;
pub mod events;
pub mod orchestrator;
pub mod rebalance;
pub mod simulation;
