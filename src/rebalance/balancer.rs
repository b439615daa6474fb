use crate::cluster::types::{Node, NodeId, PartitionId};
use std::collections::HashMap;

/// Per-node partition quotas for `active` nodes sharing `total` partitions.
///
/// The first `total % active` nodes get one extra partition. Empty when there
/// are no active nodes.
pub fn target_counts(total: usize, active: usize) -> Vec<usize> {
    if active == 0 {
        return Vec::new();
    }

    let base = total / active;
    let mut remainder = total % active;

    (0..active)
        .map(|_| {
            if remainder > 0 {
                remainder -= 1;
                base + 1
            } else {
                base
            }
        })
        .collect()
}

/// Redistributes every partition held by any storage node across the active
/// storage nodes.
///
/// Partitions are gathered in storage-node order (draining nodes included) and
/// dealt out sequentially according to [`target_counts`], so the relative order
/// of partitions never changes. Non-active storage nodes end up empty and
/// non-storage nodes pass through untouched. With no active storage node the
/// input is returned unchanged.
pub fn rebalance(nodes: &[Node]) -> Vec<Node> {
    let active_storage = nodes
        .iter()
        .filter(|node| node.is_storage() && node.is_active())
        .count();

    if active_storage == 0 {
        tracing::debug!("No active storage nodes, skipping rebalance");
        return nodes.to_vec();
    }

    let mut pool = nodes
        .iter()
        .filter(|node| node.is_storage())
        .flat_map(|node| node.partitions.iter().cloned());

    let total: usize = nodes
        .iter()
        .filter(|node| node.is_storage())
        .map(|node| node.partitions.len())
        .sum();
    let mut quotas = target_counts(total, active_storage).into_iter();

    tracing::debug!(
        "Rebalancing {} partitions across {} active storage nodes",
        total,
        active_storage
    );

    nodes
        .iter()
        .map(|node| {
            if !node.is_storage() {
                return node.clone();
            }

            let partitions = if node.is_active() {
                let quota = quotas.next().unwrap_or(0);
                pool.by_ref().take(quota).collect()
            } else {
                Vec::new()
            };

            Node {
                partitions,
                ..node.clone()
            }
        })
        .collect()
}

/// A partition instance that changed owner between two node collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionMove {
    pub partition: PartitionId,
    pub from: NodeId,
    pub to: NodeId,
}

/// Lists the partition instances whose owning node differs between `before`
/// and `after`, in `after` order.
pub fn partition_moves(before: &[Node], after: &[Node]) -> Vec<PartitionMove> {
    let owners: HashMap<&PartitionId, &NodeId> = before
        .iter()
        .flat_map(|node| node.partitions.iter().map(move |p| (&p.id, &node.id)))
        .collect();

    after
        .iter()
        .flat_map(|node| node.partitions.iter().map(move |p| (p, node)))
        .filter_map(|(partition, node)| match owners.get(&partition.id) {
            Some(&from) if from != &node.id => Some(PartitionMove {
                partition: partition.id.clone(),
                from: from.clone(),
                to: node.id.clone(),
            }),
            _ => None,
        })
        .collect()
}
