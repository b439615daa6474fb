//! Scaling State Machine
//!
//! Drives the scripted scale operations over a virtual clock. Nothing here sleeps or
//! reads wall time: a driver (the tokio `ScalingService`, or a test) moves the clock
//! forward with `advance_to` and every step whose deadline has passed runs, in order.
//!
//! ## Responsibilities
//! - **Gating**: a single in-flight operation at a time; commands issued while busy are
//!   dropped without a trace.
//! - **Bounds**: capacity checks happen before any mutation; violations are logged.
//! - **Publishing**: every transition replaces the snapshot with a new version.

use super::script::schedule;
use super::types::*;
use crate::cluster::snapshot::ClusterSnapshot;
use crate::cluster::topology::{
    MAX_COMPUTE_NODES, MAX_STORAGE_NODES, MIN_COMPUTE_NODES, MIN_STORAGE_NODES, initial_nodes,
};
use crate::cluster::types::{Node, NodeId, NodeKind, NodeStatus};
use crate::events::EventLog;
use crate::rebalance::{partition_moves, rebalance};

use std::time::Duration;

pub const WELCOME_MESSAGE: &str =
    "Welcome! This simulation shows elastic scaling of a distributed database.";
pub const STABLE_MESSAGE: &str = "The cluster is initialized and stable.";
pub const RESET_MESSAGE: &str = "Resetting cluster to initial state.";

pub struct Orchestrator {
    snapshot: ClusterSnapshot,
    log: EventLog,
    phase: Phase,
    /// Virtual time since construction.
    clock: Duration,
}

impl Orchestrator {
    /// Creates an idle orchestrator over the initial topology and writes the
    /// greeting entries to the log.
    pub fn new() -> Self {
        let mut log = EventLog::new();
        log.append(WELCOME_MESSAGE);
        log.append(STABLE_MESSAGE);

        Self {
            snapshot: ClusterSnapshot::initial(),
            log,
            phase: Phase::Idle,
            clock: Duration::ZERO,
        }
    }

    pub fn snapshot(&self) -> &ClusterSnapshot {
        &self.snapshot
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        !self.phase.is_idle()
    }

    pub fn now(&self) -> Duration {
        self.clock
    }

    /// Deadline of the next pending step, if an operation is in flight.
    pub fn next_deadline(&self) -> Option<Duration> {
        match &self.phase {
            Phase::Running(running) => running.pending.front().map(|scheduled| scheduled.at),
            Phase::Idle => None,
        }
    }

    pub fn control_state(&self) -> ControlState {
        let busy = self.is_busy();
        let allowed = |operation| !busy && self.select_target(operation).is_ok();

        ControlState {
            busy,
            storage_nodes: self.snapshot.count(NodeKind::Storage),
            active_storage_nodes: self.snapshot.active_count(NodeKind::Storage),
            compute_nodes: self.snapshot.count(NodeKind::Compute),
            active_compute_nodes: self.snapshot.active_count(NodeKind::Compute),
            can_scale_out_storage: allowed(Operation::ScaleOutStorage),
            can_scale_in_storage: allowed(Operation::ScaleInStorage),
            can_scale_out_compute: allowed(Operation::ScaleOutCompute),
            can_scale_in_compute: allowed(Operation::ScaleInCompute),
            can_reset: !busy,
        }
    }

    pub fn execute(&mut self, command: Command) -> CommandOutcome {
        match command.operation() {
            Some(operation) => self.start(operation),
            None => self.reset(),
        }
    }

    pub fn scale_out_storage(&mut self) -> CommandOutcome {
        self.start(Operation::ScaleOutStorage)
    }

    pub fn scale_in_storage(&mut self) -> CommandOutcome {
        self.start(Operation::ScaleInStorage)
    }

    pub fn scale_out_compute(&mut self) -> CommandOutcome {
        self.start(Operation::ScaleOutCompute)
    }

    pub fn scale_in_compute(&mut self) -> CommandOutcome {
        self.start(Operation::ScaleInCompute)
    }

    /// Restores the initial topology. The log is kept.
    pub fn reset(&mut self) -> CommandOutcome {
        if self.is_busy() {
            tracing::debug!("Reset ignored: an operation is in flight");
            return CommandOutcome::Busy;
        }

        self.log.append(RESET_MESSAGE);
        let snapshot = self.snapshot.successor(initial_nodes());
        self.publish(snapshot);

        CommandOutcome::Completed
    }

    /// Runs every pending step with a deadline at or before `now`, then moves the
    /// clock to `now`. Returns the number of steps executed.
    pub fn advance_to(&mut self, now: Duration) -> usize {
        let mut executed = 0;

        loop {
            match self.next_deadline() {
                Some(at) if at <= now => {}
                _ => break,
            }

            let Phase::Running(running) = &mut self.phase else {
                break;
            };
            let Some(scheduled) = running.pending.pop_front() else {
                break;
            };
            let operation = running.operation;
            let target = running.target.clone();

            self.clock = self.clock.max(scheduled.at);
            self.run_step(operation, &target, scheduled.step);
            executed += 1;
        }

        self.clock = self.clock.max(now);
        executed
    }

    pub fn advance(&mut self, by: Duration) -> usize {
        self.advance_to(self.clock + by)
    }

    /// Runs the in-flight operation to completion, moving the clock to its last
    /// deadline.
    pub fn run_until_idle(&mut self) -> usize {
        let last = match &self.phase {
            Phase::Running(running) => running.pending.back().map(|scheduled| scheduled.at),
            Phase::Idle => None,
        };

        match last {
            Some(at) => self.advance_to(at),
            None => 0,
        }
    }

    /// Checks capacity bounds and picks the node the operation acts on: a fresh
    /// label for scale-out, the last active node of the kind for scale-in.
    fn select_target(&self, operation: Operation) -> Result<NodeId, Rejection> {
        let kind = operation.kind();

        match operation {
            Operation::ScaleOutStorage => {
                if self.snapshot.count(kind) >= MAX_STORAGE_NODES {
                    return Err(Rejection::StorageAtMaximum {
                        max: MAX_STORAGE_NODES,
                    });
                }
                Ok(self.snapshot.next_node_id(kind))
            }
            Operation::ScaleOutCompute => {
                if self.snapshot.count(kind) >= MAX_COMPUTE_NODES {
                    return Err(Rejection::ComputeAtMaximum {
                        max: MAX_COMPUTE_NODES,
                    });
                }
                Ok(self.snapshot.next_node_id(kind))
            }
            Operation::ScaleInStorage => self.last_active(kind).ok_or(Rejection::StorageAtMinimum {
                min: MIN_STORAGE_NODES,
            }),
            Operation::ScaleInCompute => self.last_active(kind).ok_or(Rejection::ComputeAtMinimum {
                min: MIN_COMPUTE_NODES,
            }),
        }
    }

    /// Last active node of `kind`, provided removing it keeps the kind at or
    /// above its minimum.
    fn last_active(&self, kind: NodeKind) -> Option<NodeId> {
        let minimum = match kind {
            NodeKind::Storage => MIN_STORAGE_NODES,
            NodeKind::Compute => MIN_COMPUTE_NODES,
            NodeKind::Coordinator => return None,
        };

        let active = self.snapshot.active_nodes(kind);
        if active.len() <= minimum {
            return None;
        }
        active.last().map(|node| node.id.clone())
    }

    fn start(&mut self, operation: Operation) -> CommandOutcome {
        if self.is_busy() {
            tracing::debug!("{} ignored: an operation is in flight", operation);
            return CommandOutcome::Busy;
        }

        let target = match self.select_target(operation) {
            Ok(target) => target,
            Err(rejection) => {
                tracing::warn!("{} rejected: {}", operation, rejection);
                self.log.append(rejection.to_string());
                return CommandOutcome::Rejected(rejection);
            }
        };

        let kind = operation.kind();
        let snapshot = if operation.is_scale_out() {
            self.snapshot
                .with_node(Node::new(target.clone(), kind, NodeStatus::Joining))
        } else {
            match self.snapshot.with_status(&target, NodeStatus::Draining) {
                Some(snapshot) => snapshot,
                None => {
                    tracing::warn!("{} aborted: {} no longer exists", operation, target);
                    return CommandOutcome::Busy;
                }
            }
        };

        if operation.is_scale_out() {
            self.log.append(format!(
                "Starting {} scale-out: adding {} in joining state.",
                kind.label().to_lowercase(),
                target
            ));
        } else {
            self.log.append(format!(
                "Starting {} scale-in: {} selected for removal, draining.",
                kind.label().to_lowercase(),
                target
            ));
        }
        self.publish(snapshot);

        let pending = schedule(operation, self.clock).into();
        self.phase = Phase::Running(RunningOperation {
            operation,
            target,
            started_at: self.clock,
            pending,
        });

        tracing::info!(
            "{} started at {:?}, next step due at {:?}",
            operation,
            self.clock,
            self.next_deadline()
        );

        CommandOutcome::Started(operation)
    }

    fn run_step(&mut self, operation: Operation, target: &NodeId, step: Step) {
        tracing::debug!("{} step {:?} on {} at {:?}", operation, step, target, self.clock);

        match step {
            Step::Promote => match self.snapshot.with_status(target, NodeStatus::Active) {
                Some(snapshot) => {
                    self.log.append(format!(
                        "Node {} has joined the cluster and is now active.",
                        target
                    ));
                    self.publish(snapshot);
                }
                None => tracing::warn!("Cannot promote {}: node no longer exists", target),
            },

            Step::Rebalance => {
                let nodes = rebalance(self.snapshot.nodes());
                let moves = partition_moves(self.snapshot.nodes(), &nodes);
                for movement in &moves {
                    tracing::debug!(
                        "Partition {} moved {} -> {}",
                        movement.partition,
                        movement.from,
                        movement.to
                    );
                }

                if operation.is_scale_out() {
                    self.log.append(format!(
                        "Data rebalancing started: {} partitions moving to utilize {}.",
                        moves.len(),
                        target
                    ));
                } else {
                    self.log.append(format!(
                        "Migrating data off {}: {} partitions redistributed to the remaining nodes.",
                        target,
                        moves.len()
                    ));
                }

                let snapshot = self.snapshot.successor(nodes);
                self.publish(snapshot);
            }

            Step::Remove => match self.snapshot.without_node(target) {
                Some(snapshot) => {
                    if operation.kind() == NodeKind::Storage {
                        self.log
                            .append(format!("Data drain complete. Removing node {}.", target));
                    } else {
                        self.log.append(format!("Removing node {}.", target));
                    }
                    self.publish(snapshot);
                }
                None => tracing::warn!("Cannot remove {}: node no longer exists", target),
            },

            Step::Finish => {
                self.log
                    .append(format!("{} complete. Cluster is stable.", operation));
                self.phase = Phase::Idle;
            }
        }
    }

    fn publish(&mut self, snapshot: ClusterSnapshot) {
        tracing::debug!(
            "Publishing cluster snapshot v{} ({} nodes)",
            snapshot.version(),
            snapshot.len()
        );
        self.snapshot = snapshot;
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}
