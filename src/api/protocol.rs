//! HTTP Protocol
//!
//! Endpoint paths and the JSON bodies exchanged with whatever renders the cluster.

use crate::cluster::types::Node;
use crate::events::LogEntry;
use crate::orchestrator::{CommandOutcome, ControlState, Operation};
use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Current node collection plus command availability.
pub const ENDPOINT_CLUSTER: &str = "/cluster";
/// Event log, optionally only entries after a given id.
pub const ENDPOINT_LOG: &str = "/log";
pub const ENDPOINT_SCALE_OUT_STORAGE: &str = "/scale/storage/out";
pub const ENDPOINT_SCALE_IN_STORAGE: &str = "/scale/storage/in";
pub const ENDPOINT_SCALE_OUT_COMPUTE: &str = "/scale/compute/out";
pub const ENDPOINT_SCALE_IN_COMPUTE: &str = "/scale/compute/in";
pub const ENDPOINT_RESET: &str = "/reset";

// --- Data Transfer Objects ---

#[derive(Debug, Serialize, Deserialize)]
pub struct ClusterResponse {
    /// Snapshot version; increases with every published transition.
    pub version: u64,
    pub nodes: Vec<Node>,
    pub control: ControlState,
}

#[derive(Debug, Default, Deserialize)]
pub struct LogQuery {
    /// Only return entries with a larger id.
    pub after: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub entries: Vec<LogEntry>,
}

/// Outcome of a command, flattened for JSON.
///
/// `outcome` is one of `started`, `completed`, `rejected`, `busy`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct CommandResponse {
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&CommandOutcome> for CommandResponse {
    fn from(outcome: &CommandOutcome) -> Self {
        match outcome {
            CommandOutcome::Started(operation) => Self {
                outcome: "started".to_string(),
                operation: Some(*operation),
                message: None,
            },
            CommandOutcome::Completed => Self {
                outcome: "completed".to_string(),
                operation: None,
                message: None,
            },
            CommandOutcome::Rejected(rejection) => Self {
                outcome: "rejected".to_string(),
                operation: None,
                message: Some(rejection.to_string()),
            },
            CommandOutcome::Busy => Self {
                outcome: "busy".to_string(),
                operation: None,
                message: None,
            },
        }
    }
}
