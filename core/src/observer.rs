//! Progress observers.
//!
//! The integrator calls `on_event` at run start, every
//! [`REPORT_DIVISIONS`][crate::clock::REPORT_DIVISIONS]th of the run, and
//! at the end. Returning `ControlFlow::Break` cancels the run at that
//! point; the caller gets `SimError::Cancelled`. The return value for
//! `RunCompleted` is ignored, since the trajectory is already complete.

use crate::event::ProgressEvent;
use std::ops::ControlFlow;

pub trait ProgressObserver {
    fn on_event(&mut self, event: &ProgressEvent) -> ControlFlow<()>;
}

impl<F> ProgressObserver for F
where
    F: FnMut(&ProgressEvent) -> ControlFlow<()>,
{
    fn on_event(&mut self, event: &ProgressEvent) -> ControlFlow<()> {
        self(event)
    }
}

/// Ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressObserver for Silent {
    fn on_event(&mut self, _event: &ProgressEvent) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Reports progress through the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogProgress {
    label: Option<String>,
}

impl LogProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix every line with `label`, e.g. a replica name.
    pub fn labelled(label: impl Into<String>) -> Self {
        Self { label: Some(label.into()) }
    }

    fn prefix(&self) -> &str {
        self.label.as_deref().unwrap_or("run")
    }
}

impl ProgressObserver for LogProgress {
    fn on_event(&mut self, event: &ProgressEvent) -> ControlFlow<()> {
        match event {
            ProgressEvent::RunStarted { steps, save_freq, start } => {
                log::info!(
                    "{}: starting {steps} steps (saveFreq={save_freq}) at x={start}",
                    self.prefix()
                );
            }
            ProgressEvent::Progress { step, steps, position } => {
                let pct = *step as f64 / *steps as f64 * 100.0;
                log::info!(
                    "{}: step {step}/{steps} ({pct:.0}%) x={position}",
                    self.prefix()
                );
            }
            ProgressEvent::RunCompleted { steps, samples, position } => {
                log::info!(
                    "{}: finished {steps} steps, {samples} samples, final x={position}",
                    self.prefix()
                );
            }
        }
        ControlFlow::Continue(())
    }
}
