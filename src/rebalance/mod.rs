//! Partition Rebalancer
//!
//! A pure function over the node collection that spreads every storage partition evenly
//! across the active storage nodes.
//!
//! ## Placement Rules
//! - **Source**: all partitions held by *any* storage node, including draining ones, in
//!   collection order.
//! - **Quota**: `floor(n / k)` per active node, with the first `n mod k` nodes taking one extra.
//! - **Order**: partitions are dealt out sequentially, never shuffled or regrouped.
//! - **Conservation**: instances are moved, never created or dropped. Leader marks travel
//!   with their instance.

pub mod balancer;

pub use balancer::{PartitionMove, partition_moves, rebalance, target_counts};
