use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable node label, e.g. `Storage 4`.
///
/// Labels are unique within a cluster snapshot; the orchestrator picks a fresh
/// label whenever it synthesizes a node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(kind: NodeKind, number: usize) -> Self {
        Self(format!("{} {}", kind.label(), number))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Fixed-count placement/metadata nodes. Shown for context, never scaled.
    Coordinator,
    /// Stateless query-processing nodes.
    Compute,
    /// Stateful nodes holding partitions.
    Storage,
}

impl NodeKind {
    pub fn label(self) -> &'static str {
        match self {
            NodeKind::Coordinator => "Coordinator",
            NodeKind::Compute => "Compute",
            NodeKind::Storage => "Storage",
        }
    }
}

/// Lifecycle state of a node.
///
/// Nodes only move `Joining -> Active` or `Active -> Draining -> (removed)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NodeStatus {
    Active,
    Joining,
    Draining,
    Offline,
}

/// Unique identifier of a single partition instance (one replica).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PartitionId(pub String);

impl fmt::Display for PartitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A data region replica.
///
/// Instances sharing a `group` are replicas of the same key range. The
/// `leader` mark travels with the instance when it is moved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Partition {
    pub id: PartitionId,
    pub group: String,
    #[serde(default)]
    pub leader: bool,
}

impl Partition {
    pub fn new(id: impl Into<String>, group: impl Into<String>, leader: bool) -> Self {
        Self {
            id: PartitionId(id.into()),
            group: group.into(),
            leader,
        }
    }
}

/// A single member of the simulated cluster.
///
/// `partitions` is only ever non-empty for storage nodes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub status: NodeStatus,
    #[serde(default)]
    pub leader: bool,
    #[serde(default)]
    pub partitions: Vec<Partition>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind, status: NodeStatus) -> Self {
        Self {
            id,
            kind,
            status,
            leader: false,
            partitions: Vec::new(),
        }
    }

    pub fn with_leader(mut self, leader: bool) -> Self {
        self.leader = leader;
        self
    }

    pub fn with_partitions(mut self, partitions: Vec<Partition>) -> Self {
        self.partitions = partitions;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == NodeStatus::Active
    }

    pub fn is_storage(&self) -> bool {
        self.kind == NodeKind::Storage
    }
}
