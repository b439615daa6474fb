use crate::cluster::types::{NodeId, NodeKind};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// One of the four scripted scale operations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ScaleOutStorage,
    ScaleInStorage,
    ScaleOutCompute,
    ScaleInCompute,
}

impl Operation {
    /// The node kind this operation adds or removes.
    pub fn kind(self) -> NodeKind {
        match self {
            Operation::ScaleOutStorage | Operation::ScaleInStorage => NodeKind::Storage,
            Operation::ScaleOutCompute | Operation::ScaleInCompute => NodeKind::Compute,
        }
    }

    pub fn is_scale_out(self) -> bool {
        matches!(self, Operation::ScaleOutStorage | Operation::ScaleOutCompute)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction = if self.is_scale_out() { "scale-out" } else { "scale-in" };
        write!(f, "{} {}", self.kind().label(), direction)
    }
}

/// The zero-argument command surface.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    ScaleOutStorage,
    ScaleInStorage,
    ScaleOutCompute,
    ScaleInCompute,
    Reset,
}

impl Command {
    /// The scripted operation behind this command, `None` for `Reset`.
    pub fn operation(self) -> Option<Operation> {
        match self {
            Command::ScaleOutStorage => Some(Operation::ScaleOutStorage),
            Command::ScaleInStorage => Some(Operation::ScaleInStorage),
            Command::ScaleOutCompute => Some(Operation::ScaleOutCompute),
            Command::ScaleInCompute => Some(Operation::ScaleInCompute),
            Command::Reset => None,
        }
    }
}

/// A deferred state transition within a running operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Joining node becomes active.
    Promote,
    /// Run the rebalancer over the whole collection.
    Rebalance,
    /// Drop the draining node from the collection.
    Remove,
    /// Clear the in-flight flag.
    Finish,
}

/// A step with its absolute deadline on the orchestrator clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledStep {
    pub at: Duration,
    pub step: Step,
}

/// The operation currently in flight and what is left of its script.
#[derive(Debug, Clone)]
pub struct RunningOperation {
    pub operation: Operation,
    /// The node being added or removed.
    pub target: NodeId,
    pub started_at: Duration,
    pub pending: VecDeque<ScheduledStep>,
}

/// The in-flight gate. Only one operation may run at a time.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running(RunningOperation),
}

impl Phase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }
}

/// Why a command was refused before touching any state.
///
/// The display text is what gets appended to the event log.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("Cannot scale out storage: maximum of {max} nodes reached.")]
    StorageAtMaximum { max: usize },

    #[error("Cannot scale in storage: a minimum of {min} active nodes is required.")]
    StorageAtMinimum { min: usize },

    #[error("Cannot scale out compute: maximum of {max} nodes reached.")]
    ComputeAtMaximum { max: usize },

    #[error("Cannot scale in compute: a minimum of {min} active node is required.")]
    ComputeAtMinimum { min: usize },
}

/// Result of issuing a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The operation's first step committed; the rest is scheduled.
    Started(Operation),
    /// The command finished synchronously (reset).
    Completed,
    /// A capacity bound would be violated. Logged.
    Rejected(Rejection),
    /// Another operation is in flight. Silent.
    Busy,
}

/// Which commands would currently start, plus the counts they depend on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ControlState {
    pub busy: bool,
    pub storage_nodes: usize,
    pub active_storage_nodes: usize,
    pub compute_nodes: usize,
    pub active_compute_nodes: usize,
    pub can_scale_out_storage: bool,
    pub can_scale_in_storage: bool,
    pub can_scale_out_compute: bool,
    pub can_scale_in_compute: bool,
    pub can_reset: bool,
}
