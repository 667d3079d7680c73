//! The trajectory integrator.
//!
//! Discretised overdamped Langevin update, one particle, one dimension:
//!
//! ```text
//! i       = node_index(clamp(x, x_min, x_max))
//! x(s+1)  = x(s) + external[i] + thermal[i] * xi,    xi ~ N(0, 1)
//! ```
//!
//! RULES:
//!   - Steps run strictly in order; step s+1 reads the position of step s.
//!   - Clamping only picks the node. The position itself is never rewritten.
//!   - Every precondition is checked before the first sample is recorded.

use crate::{
    clock::StepClock,
    config::{Method, SimulationConfig},
    error::{SimError, SimResult},
    event::ProgressEvent,
    noise::NoiseSource,
    observer::ProgressObserver,
    output::{SampleTime, SimulationOutput},
    tables::StepTables,
    types::Real,
};
use std::ops::ControlFlow;

/// One integration scheme.
pub trait Integrator {
    /// Stable name, matches the config token.
    fn name(&self) -> &'static str;

    /// Position after one step from `position`, using the tables at `node`.
    fn advance(
        &self,
        position: Real,
        node: usize,
        tables: &StepTables,
        noise: &mut dyn NoiseSource,
    ) -> Real;
}

/// Euler–Maruyama step on the precomputed tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct EulerMaruyama;

impl Integrator for EulerMaruyama {
    fn name(&self) -> &'static str {
        "first"
    }

    fn advance(
        &self,
        position: Real,
        node: usize,
        tables: &StepTables,
        noise: &mut dyn NoiseSource,
    ) -> Real {
        let xi = noise.standard_normal();
        position + tables.external[node] + tables.thermal[node] * xi
    }
}

impl Method {
    /// Scheme behind this selector. `Second` is reserved and has no
    /// scheme yet.
    pub fn integrator(&self) -> SimResult<Box<dyn Integrator>> {
        match self {
            Self::First  => Ok(Box::new(EulerMaruyama)),
            Self::Second => Err(SimError::UnsupportedMethod(self.name())),
        }
    }
}

/// Integrate one trajectory.
///
/// `tables` must come from [`build_step_tables`][crate::tables::build_step_tables]
/// for the same `config`. The output holds `steps / saveFreq + 1` samples,
/// the first being `(0, positionStart)`.
pub fn run_trajectory<N, O>(
    config: &SimulationConfig,
    tables: &StepTables,
    mut noise: &mut N,
    observer: &mut O,
) -> SimResult<SimulationOutput>
where
    N: NoiseSource + ?Sized,
    O: ProgressObserver + ?Sized,
{
    config.validate()?;
    tables.check_matches(config)?;
    let integrator = config.method.integrator()?;

    let units = config.time_units;
    let timestep = config.timestep;
    let mut clock = StepClock::new(config.steps, config.save_freq);
    let mut output = SimulationOutput::with_capacity(config.sample_count(), units);
    let mut position = config.position_start;
    output.record(SampleTime::at(0, units, timestep), position);

    let started = ProgressEvent::RunStarted {
        steps:     config.steps,
        save_freq: config.save_freq,
        start:     position,
    };
    if observer.on_event(&started).is_break() {
        return Err(SimError::Cancelled { step: 0 });
    }

    while let Some(step) = clock.advance() {
        let node = tables.external.node_index(position);
        position = integrator.advance(position, node, tables, &mut noise);

        if clock.is_save_event() {
            output.record(SampleTime::at(step, units, timestep), position);
        }

        if clock.is_report_step() && !clock.is_finished() {
            let event = ProgressEvent::Progress {
                step,
                steps: config.steps,
                position,
            };
            if let ControlFlow::Break(()) = observer.on_event(&event) {
                log::info!("run cancelled by observer at step {step}");
                return Err(SimError::Cancelled { step });
            }
        }
    }

    let completed = ProgressEvent::RunCompleted {
        steps:    config.steps,
        samples:  output.len(),
        position,
    };
    if observer.on_event(&completed).is_break() {
        log::debug!("cancel request after the final step ignored");
    }

    Ok(output)
}
