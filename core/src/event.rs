//! Progress events emitted by a run.
//!
//! Events are for observation only. Nothing in the numerical core reads
//! them back, so observing a run never changes its trajectory.

use crate::types::{Real, Step};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    RunStarted {
        steps:     Step,
        save_freq: Step,
        start:     Real,
    },
    Progress {
        step:     Step,
        steps:    Step,
        position: Real,
    },
    RunCompleted {
        steps:    Step,
        samples:  usize,
        position: Real,
    },
}

impl ProgressEvent {
    /// Stable name, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RunStarted { .. }   => "run_started",
            Self::Progress { .. }     => "progress",
            Self::RunCompleted { .. } => "run_completed",
        }
    }
}
