//! Fixed cluster topology: capacity bounds and the initial node set.

use super::types::{Node, NodeId, NodeKind, NodeStatus, Partition};

pub const MIN_STORAGE_NODES: usize = 3;
pub const MAX_STORAGE_NODES: usize = 6;
pub const MIN_COMPUTE_NODES: usize = 1;
pub const MAX_COMPUTE_NODES: usize = 3;

pub const COORDINATOR_COUNT: usize = 3;
pub const INITIAL_STORAGE_NODES: usize = 3;

/// Number of partition groups seeded at initialization. Every initial storage
/// node holds one replica of each group.
pub const PARTITION_GROUPS: usize = 6;

/// Replica suffix per initial storage node (`r1-a` lives on `Storage 1`).
const REPLICA_SUFFIXES: [char; INITIAL_STORAGE_NODES] = ['a', 'b', 'c'];

/// Builds the fixed initial node collection: three coordinators (the first one
/// leading), one active compute node and three storage nodes seeded with six
/// partitions each.
///
/// Group leadership is spread round-robin, so `Storage 1` leads regions 1 and 4,
/// `Storage 2` leads 2 and 5, `Storage 3` leads 3 and 6.
pub fn initial_nodes() -> Vec<Node> {
    let mut nodes = Vec::with_capacity(COORDINATOR_COUNT + 1 + INITIAL_STORAGE_NODES);

    for n in 1..=COORDINATOR_COUNT {
        nodes.push(
            Node::new(NodeId::new(NodeKind::Coordinator, n), NodeKind::Coordinator, NodeStatus::Active)
                .with_leader(n == 1),
        );
    }

    nodes.push(Node::new(
        NodeId::new(NodeKind::Compute, 1),
        NodeKind::Compute,
        NodeStatus::Active,
    ));

    for (replica, suffix) in REPLICA_SUFFIXES.iter().enumerate() {
        let partitions = (1..=PARTITION_GROUPS)
            .map(|group| {
                Partition::new(
                    format!("r{}-{}", group, suffix),
                    format!("Region {}", group),
                    (group - 1) % INITIAL_STORAGE_NODES == replica,
                )
            })
            .collect();

        nodes.push(
            Node::new(
                NodeId::new(NodeKind::Storage, replica + 1),
                NodeKind::Storage,
                NodeStatus::Active,
            )
            .with_partitions(partitions),
        );
    }

    nodes
}
