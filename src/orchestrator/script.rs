//! Fixed step scripts for each scale operation.
//!
//! Every entry is `(delay after the previous step, step)`. The first transition of an
//! operation (adding the joining node or marking the draining one) happens immediately
//! when the command is accepted and is not part of the script.

use super::types::{Operation, ScheduledStep, Step};
use std::time::Duration;

const STORAGE_SCALE_OUT: [(Duration, Step); 3] = [
    (Duration::from_millis(1000), Step::Promote),
    (Duration::from_millis(500), Step::Rebalance),
    (Duration::from_millis(2000), Step::Finish),
];

const STORAGE_SCALE_IN: [(Duration, Step); 3] = [
    (Duration::from_millis(500), Step::Rebalance),
    (Duration::from_millis(2000), Step::Remove),
    (Duration::from_millis(1000), Step::Finish),
];

const COMPUTE_SCALE_OUT: [(Duration, Step); 2] = [
    (Duration::from_millis(1000), Step::Promote),
    (Duration::from_millis(500), Step::Finish),
];

const COMPUTE_SCALE_IN: [(Duration, Step); 2] = [
    (Duration::from_millis(1000), Step::Remove),
    (Duration::from_millis(500), Step::Finish),
];

pub fn script(operation: Operation) -> &'static [(Duration, Step)] {
    match operation {
        Operation::ScaleOutStorage => &STORAGE_SCALE_OUT,
        Operation::ScaleInStorage => &STORAGE_SCALE_IN,
        Operation::ScaleOutCompute => &COMPUTE_SCALE_OUT,
        Operation::ScaleInCompute => &COMPUTE_SCALE_IN,
    }
}

/// Resolves the script of `operation` into absolute deadlines starting at `start`.
pub fn schedule(operation: Operation, start: Duration) -> Vec<ScheduledStep> {
    let mut at = start;
    script(operation)
        .iter()
        .map(|&(delay, step)| {
            at += delay;
            ScheduledStep { at, step }
        })
        .collect()
}

/// Wall time from acceptance to the final step.
pub fn total_duration(operation: Operation) -> Duration {
    script(operation).iter().map(|(delay, _)| *delay).sum()
}
