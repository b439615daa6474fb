//! Scaling Orchestrator
//!
//! Implements storage and compute scale-out / scale-in as scripted sequences of state
//! transitions separated by fixed delays, plus a synchronous reset.
//!
//! ## Architecture Overview
//! 1. **Validation**: a command is dropped silently while another operation is in flight,
//!    and rejected (with a log entry) if it would break a capacity bound.
//! 2. **First transition**: the joining node is appended, or the chosen node is marked
//!    draining, immediately.
//! 3. **Scheduling**: the remaining steps get absolute deadlines on a virtual clock.
//! 4. **Driving**: an external driver advances the clock; due steps run strictly in order.
//!    Storage operations run the rebalancer once mid-sequence.
//! 5. **Completion**: the final step clears the in-flight flag.
//!
//! ## Submodules
//! - **`orchestrator`**: the state machine itself.
//! - **`script`**: per-operation step lists and their delays.
//! - **`types`**: commands, steps, phases, outcomes and rejections.

pub mod orchestrator;
pub mod script;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::{Command, CommandOutcome, ControlState, Operation, Phase, Rejection, Step};
