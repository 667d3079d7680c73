//! Per-node step tables.
//!
//! The force and damping landscapes are folded into two grids once per
//! run so the hot loop does a lookup and a multiply-add, never a divide:
//!
//! ```text
//! external[i] = F[i] * dt / (gamma * g[i])
//! thermal[i]  = sqrt(2 * kT * dt / (gamma * g[i]))
//! ```
//!
//! `gamma` is the bulk damping and `g[i]` the relative damping at node i.

use crate::{
    config::SimulationConfig,
    error::{SimError, SimResult},
    grid::GridField,
    types::Real,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTables {
    /// Deterministic drift per step at each node.
    pub external: GridField,
    /// Standard deviation of the stochastic displacement per step at each node.
    pub thermal:  GridField,
}

impl StepTables {
    pub fn len(&self) -> usize {
        self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.external.is_empty()
    }

    /// Whether these tables were built for the grid described by `config`.
    pub fn check_matches(&self, config: &SimulationConfig) -> SimResult<()> {
        let grid = config.force_grid();
        if !self.external.is_aligned_with(&grid) || !self.thermal.is_aligned_with(&grid) {
            return Err(SimError::TableMismatch {
                tables: self.len(),
                grid:   grid.len(),
            });
        }
        Ok(())
    }
}

/// Build the external and thermal step tables for `config`.
///
/// Rejects zero or negative damping (bulk or per node) and every other
/// malformed physical input instead of letting NaN into the tables. A
/// step that overflows `f32` is rejected too.
pub fn build_step_tables(config: &SimulationConfig) -> SimResult<StepTables> {
    config.validate_physics()?;

    let dt = config.timestep;
    let kt = config.temperature;
    let gamma = config.damping;

    let force = config.force_grid();
    let damping = config.damping_grid();

    let external: Vec<_> = force
        .values()
        .iter()
        .zip(damping.values())
        .map(|(f, g)| f * dt / (gamma * g))
        .collect();
    let thermal = damping.map(|g| (2.0 * kt * dt / (gamma * g)).sqrt());

    check_finite("external", &external)?;
    check_finite("thermal", thermal.values())?;

    if kt == 0.0 {
        log::warn!("temperature is 0; trajectory will be deterministic");
    }
    log::debug!(
        "built step tables: nodes={} dt={dt} kT={kt} gamma={gamma}",
        force.len()
    );

    Ok(StepTables {
        external: GridField::new(external, force.origin(), force.spacing()),
        thermal,
    })
}

fn check_finite(table: &'static str, steps: &[Real]) -> SimResult<()> {
    match steps.iter().enumerate().find(|(_, s)| !s.is_finite()) {
        Some((index, &value)) => Err(SimError::NonFiniteStep { table, index, value }),
        None => Ok(()),
    }
}
