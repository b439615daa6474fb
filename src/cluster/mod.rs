//! Cluster State Model
//!
//! Holds the authoritative, ordered node collection of the simulated cluster.
//! Nodes are plain records: there is no networking or persistence behind them.
//!
//! ## Core Concepts
//! - **Node kinds**: coordinators (fixed, display only), compute nodes (stateless)
//!   and storage nodes (hold partitions).
//! - **Partitions**: data region replicas. Instances sharing a group name are replicas
//!   of the same range; exactly one of them carries the leader mark.
//! - **Snapshots**: `ClusterSnapshot` is an immutable, versioned value. Mutations derive
//!   a new snapshot instead of editing the published one, so readers never observe a
//!   half-applied change.
//! - **Topology**: capacity bounds (storage 3..=6, compute 1..=3) and the fixed initial
//!   node set live in `topology`.

pub mod snapshot;
pub mod topology;
pub mod types;
