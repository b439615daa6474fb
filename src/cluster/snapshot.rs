//! Immutable, versioned views of the node collection.
//!
//! A `ClusterSnapshot` is never edited in place. Every mutation derives a new
//! snapshot (fresh `Arc<[Node]>`, version + 1), so anyone holding an older
//! snapshot keeps seeing a consistent collection.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::topology::initial_nodes;
use super::types::{Node, NodeId, NodeKind, NodeStatus};

#[derive(Debug, Clone)]
pub struct ClusterSnapshot {
    version: u64,
    nodes: Arc<[Node]>,
}

impl ClusterSnapshot {
    pub fn new(version: u64, nodes: Vec<Node>) -> Self {
        Self {
            version,
            nodes: nodes.into(),
        }
    }

    /// The fixed initial topology at version 0.
    pub fn initial() -> Self {
        Self::new(0, initial_nodes())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|node| &node.id == id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter(move |node| node.kind == kind)
    }

    /// Active nodes of `kind`, in collection order.
    pub fn active_nodes(&self, kind: NodeKind) -> Vec<&Node> {
        self.nodes_of_kind(kind).filter(|node| node.is_active()).collect()
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.nodes_of_kind(kind).count()
    }

    pub fn active_count(&self, kind: NodeKind) -> usize {
        self.nodes_of_kind(kind).filter(|node| node.is_active()).count()
    }

    /// Total partition instances held by storage nodes.
    pub fn partition_count(&self) -> usize {
        self.nodes_of_kind(NodeKind::Storage)
            .map(|node| node.partitions.len())
            .sum()
    }

    /// Number of leader-marked instances per partition group.
    pub fn leaders_per_group(&self) -> BTreeMap<String, usize> {
        let mut leaders = BTreeMap::new();
        for partition in self
            .nodes_of_kind(NodeKind::Storage)
            .flat_map(|node| node.partitions.iter())
        {
            let count = leaders.entry(partition.group.clone()).or_insert(0);
            if partition.leader {
                *count += 1;
            }
        }
        leaders
    }

    /// Picks an unused label for a new node of `kind`, starting from
    /// `count(kind) + 1`.
    pub fn next_node_id(&self, kind: NodeKind) -> NodeId {
        let mut number = self.count(kind) + 1;
        loop {
            let candidate = NodeId::new(kind, number);
            if !self.contains(&candidate) {
                return candidate;
            }
            number += 1;
        }
    }

    /// Derives the next version holding `nodes`.
    pub fn successor(&self, nodes: Vec<Node>) -> Self {
        Self::new(self.version + 1, nodes)
    }

    /// Next version with `node` appended.
    pub fn with_node(&self, node: Node) -> Self {
        let mut nodes = self.nodes.to_vec();
        nodes.push(node);
        self.successor(nodes)
    }

    /// Next version with the status of `id` changed, or `None` if no such node.
    pub fn with_status(&self, id: &NodeId, status: NodeStatus) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }

        let nodes = self
            .nodes
            .iter()
            .map(|node| {
                if &node.id == id {
                    Node {
                        status,
                        ..node.clone()
                    }
                } else {
                    node.clone()
                }
            })
            .collect();

        Some(self.successor(nodes))
    }

    /// Next version with `id` removed, or `None` if no such node.
    pub fn without_node(&self, id: &NodeId) -> Option<Self> {
        if !self.contains(id) {
            return None;
        }

        let nodes = self
            .nodes
            .iter()
            .filter(|node| &node.id != id)
            .cloned()
            .collect();

        Some(self.successor(nodes))
    }
}

impl Default for ClusterSnapshot {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_snapshot_leaves_original_untouched() {
        let original = ClusterSnapshot::initial();
        let storage_1 = NodeId::new(NodeKind::Storage, 1);

        let drained = original
            .with_status(&storage_1, NodeStatus::Draining)
            .expect("Storage 1 exists");

        assert_eq!(original.get(&storage_1).unwrap().status, NodeStatus::Active);
        assert_eq!(drained.get(&storage_1).unwrap().status, NodeStatus::Draining);
        assert_eq!(drained.version(), original.version() + 1);
    }

    #[test]
    fn test_missing_node_yields_none() {
        let snapshot = ClusterSnapshot::initial();
        let ghost = NodeId("Storage 42".to_string());

        assert!(snapshot.with_status(&ghost, NodeStatus::Active).is_none());
        assert!(snapshot.without_node(&ghost).is_none());
    }
}
