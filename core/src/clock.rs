//! Step clock: owns the step counter and the save/report cadence.

use crate::types::Step;
use serde::{Deserialize, Serialize};

/// Progress is reported this many times over a run.
pub const REPORT_DIVISIONS: Step = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StepClock {
    pub current_step:    Step,
    pub steps:           Step,
    pub save_freq:       Step,
    pub report_interval: Step,
}

impl StepClock {
    /// `save_freq` must be non-zero; the config validator guarantees it.
    pub fn new(steps: Step, save_freq: Step) -> Self {
        Self {
            current_step: 0,
            steps,
            save_freq,
            report_interval: (steps / REPORT_DIVISIONS).max(1),
        }
    }

    /// Advance one step. Returns the new step number, or `None` once the
    /// run is complete.
    pub fn advance(&mut self) -> Option<Step> {
        if self.current_step >= self.steps {
            return None;
        }
        self.current_step += 1;
        Some(self.current_step)
    }

    pub fn is_save_event(&self) -> bool {
        self.current_step % self.save_freq == 0
    }

    pub fn is_report_step(&self) -> bool {
        self.current_step % self.report_interval == 0
    }

    pub fn is_finished(&self) -> bool {
        self.current_step >= self.steps
    }
}
