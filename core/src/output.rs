//! Sampled trajectory produced by one run.

use crate::{
    config::TimeUnits,
    types::{Real, Step},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on up-front allocation. Longer trajectories still grow,
/// they just aren't reserved in one shot.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 20;

/// Timestamp of one save event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SampleTime {
    /// Step index.
    Step(Step),
    /// Step index times the timestep.
    Physical(f64),
}

impl SampleTime {
    pub fn at(step: Step, units: TimeUnits, timestep: Real) -> Self {
        match units {
            TimeUnits::Steps    => Self::Step(step),
            TimeUnits::Physical => Self::Physical(step as f64 * timestep as f64),
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Self::Step(s)     => s as f64,
            Self::Physical(t) => t,
        }
    }
}

impl fmt::Display for SampleTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Step(s)     => write!(f, "{s}"),
            Self::Physical(t) => write!(f, "{t}"),
        }
    }
}

/// Append-only parallel sequences of positions and sample times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub positions:  Vec<Real>,
    pub times:      Vec<SampleTime>,
    pub time_units: TimeUnits,
}

impl SimulationOutput {
    /// Empty output sized for `capacity` samples.
    pub fn with_capacity(capacity: Step, time_units: TimeUnits) -> Self {
        let reserve = usize::try_from(capacity)
            .unwrap_or(usize::MAX)
            .min(MAX_PREALLOCATED_SAMPLES);
        Self {
            positions: Vec::with_capacity(reserve),
            times: Vec::with_capacity(reserve),
            time_units,
        }
    }

    pub fn record(&mut self, time: SampleTime, position: Real) {
        self.times.push(time);
        self.positions.push(position);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn last_position(&self) -> Option<Real> {
        self.positions.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SampleTime, Real)> + '_ {
        self.times.iter().copied().zip(self.positions.iter().copied())
    }
}
