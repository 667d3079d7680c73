//! End-of-run summary, serialisable to JSON.

use crate::{
    config::{SimulationConfig, TimeUnits},
    error::SimResult,
    output::SimulationOutput,
    types::{Real, Step},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps:          Step,
    pub save_freq:      Step,
    pub time_units:     TimeUnits,
    pub seed:           Option<u64>,
    pub samples:        usize,
    pub start_position: Real,
    pub final_position: Real,
    pub min_position:   Real,
    pub max_position:   Real,
    pub mean_position:  f64,
}

impl RunSummary {
    /// Summarise `output`. Returns `None` for an empty output.
    pub fn from_output(
        config: &SimulationConfig,
        seed: Option<u64>,
        output: &SimulationOutput,
    ) -> Option<Self> {
        let first = *output.positions.first()?;
        let last = *output.positions.last()?;
        let (min, max) = output
            .positions
            .iter()
            .fold((first, first), |(lo, hi), &x| (lo.min(x), hi.max(x)));
        let mean = output.positions.iter().map(|&x| x as f64).sum::<f64>()
            / output.len() as f64;

        Some(Self {
            steps:          config.steps,
            save_freq:      config.save_freq,
            time_units:     output.time_units,
            seed,
            samples:        output.len(),
            start_position: first,
            final_position: last,
            min_position:   min,
            max_position:   max,
            mean_position:  mean,
        })
    }

    pub fn to_json(&self) -> SimResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
