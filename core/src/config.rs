//! Simulation configuration and its flat-file loader.
//!
//! File format: one `key value` pair per line, whitespace separated.
//! Vector values are comma-separated floats with no internal whitespace.
//! Blank lines and `#` comments are skipped. Unknown keys are ignored and
//! missing keys keep their default value.

use crate::{
    error::{SimError, SimResult},
    grid::GridField,
    types::{Real, Step},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Integration scheme selector. Only `First` has an implementation; see
/// [`crate::integrator`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[default]
    First,
    Second,
}

impl Method {
    pub fn name(&self) -> &'static str {
        match self {
            Self::First  => "first",
            Self::Second => "second",
        }
    }

    /// Numeric code used by older config files.
    pub fn code(&self) -> u8 {
        match self {
            Self::First  => 1,
            Self::Second => 2,
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" | "1"  => Ok(Self::First),
            "second" | "2" => Ok(Self::Second),
            other => Err(format!("expected 'first' or 'second', got '{other}'")),
        }
    }
}

/// Units in which save events are timestamped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnits {
    /// Raw step index `s`.
    #[default]
    Steps,
    /// Physical time `s * timestep`.
    Physical,
}

impl FromStr for TimeUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steps" | "step"     => Ok(Self::Steps),
            "physical" | "time"  => Ok(Self::Physical),
            other => Err(format!("expected 'steps' or 'physical', got '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    pub steps:                  Step,
    pub save_freq:              Step,
    /// Time units per step.
    pub timestep:               Real,
    /// Thermal energy, kB*T.
    pub temperature:            Real,
    /// Bulk damping scale.
    pub damping:                Real,
    pub position_start:         Real,
    pub position_spacing:       Real,
    pub force_vector:           Vec<Real>,
    /// Relative damping per node, dimensionless.
    pub damping_vector:         Vec<Real>,
    pub method:                 Method,
    pub time_units:             TimeUnits,
    pub seed:                   Option<u64>,
    pub trajectory_output_file: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            steps:                  1,
            save_freq:              1,
            timestep:               1.0,
            temperature:            0.0,
            damping:                1.0,
            position_start:         0.0,
            position_spacing:       1.0,
            force_vector:           Vec::new(),
            damping_vector:         Vec::new(),
            method:                 Method::First,
            time_units:             TimeUnits::Steps,
            seed:                   None,
            trajectory_output_file: PathBuf::from("trajectory.csv"),
        }
    }
}

/// Keys every usable config file should set.
const REQUIRED_KEYS: &[&str] = &[
    "steps",
    "timestep",
    "temperature",
    "damping",
    "positionSpacing",
    "forceVector",
    "dampingVector",
];

impl SimulationConfig {
    /// Load from a config file on disk.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {e}", path.display()))?;
        let config = Self::parse(&content)?;
        log::info!(
            "loaded config from {}: steps={} saveFreq={} nodes={}",
            path.display(),
            config.steps,
            config.save_freq,
            config.force_vector.len()
        );
        Ok(config)
    }

    /// Parse the flat `key value` format.
    pub fn parse(content: &str) -> SimResult<Self> {
        let mut config = Self::default();
        let mut seen: Vec<&str> = Vec::new();

        for (i, raw) in content.lines().enumerate() {
            let line_no = i + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(key), Some(value)) = (parts.next(), parts.next()) else {
                log::debug!("config line {line_no}: no value for '{line}', skipped");
                continue;
            };
            let extra: Vec<&str> = parts.collect();
            if !extra.is_empty() {
                log::warn!(
                    "config line {line_no}: '{key}' takes one value; ignoring {}",
                    extra.join(" ")
                );
            }

            match key {
                "steps"                => config.steps = parse_value(line_no, key, value)?,
                "saveFreq"             => config.save_freq = parse_value(line_no, key, value)?,
                "timestep"             => config.timestep = parse_value(line_no, key, value)?,
                "temperature"          => config.temperature = parse_value(line_no, key, value)?,
                "damping"              => config.damping = parse_value(line_no, key, value)?,
                "positionStart"        => config.position_start = parse_value(line_no, key, value)?,
                "positionSpacing"      => config.position_spacing = parse_value(line_no, key, value)?,
                "forceVector"          => config.force_vector = parse_vector(line_no, key, value)?,
                "dampingVector"        => config.damping_vector = parse_vector(line_no, key, value)?,
                "method"               => config.method = parse_value(line_no, key, value)?,
                "timeUnits"            => config.time_units = parse_value(line_no, key, value)?,
                "seed"                 => config.seed = Some(parse_value(line_no, key, value)?),
                "trajectoryOutputFile" => config.trajectory_output_file = PathBuf::from(value),
                _ => {
                    log::debug!("config line {line_no}: unrecognised key '{key}' ignored");
                    continue;
                }
            }
            seen.push(key);
        }

        for key in REQUIRED_KEYS {
            if !seen.contains(key) {
                log::warn!("config key '{key}' missing; using default");
            }
        }

        Ok(config)
    }

    /// Force samples as a grid anchored at 0.
    pub fn force_grid(&self) -> GridField {
        GridField::from_origin(self.force_vector.clone(), self.position_spacing)
    }

    /// Relative damping samples as a grid anchored at 0.
    pub fn damping_grid(&self) -> GridField {
        GridField::from_origin(self.damping_vector.clone(), self.position_spacing)
    }

    /// Number of trajectory samples a run produces, including step 0.
    pub fn sample_count(&self) -> Step {
        (self.steps / self.save_freq.max(1)).saturating_add(1)
    }

    /// Checks everything the step tables depend on.
    pub fn validate_physics(&self) -> SimResult<()> {
        if !(self.timestep > 0.0) || !self.timestep.is_finite() {
            return Err(SimError::NonPositiveTimestep(self.timestep));
        }
        if !(self.temperature >= 0.0) || !self.temperature.is_finite() {
            return Err(SimError::NegativeTemperature(self.temperature));
        }
        if !(self.damping > 0.0) || !self.damping.is_finite() {
            return Err(SimError::NonPositiveDamping(self.damping));
        }
        if !(self.position_spacing > 0.0) || !self.position_spacing.is_finite() {
            return Err(SimError::NonPositiveSpacing(self.position_spacing));
        }
        if self.force_vector.is_empty() || self.damping_vector.is_empty() {
            return Err(SimError::EmptyGrid);
        }
        if self.force_vector.len() != self.damping_vector.len() {
            return Err(SimError::GridLengthMismatch {
                force:   self.force_vector.len(),
                damping: self.damping_vector.len(),
            });
        }
        if let Some((index, &value)) = self
            .damping_vector
            .iter()
            .enumerate()
            .find(|(_, d)| !(**d > 0.0) || !d.is_finite())
        {
            return Err(SimError::NonPositiveDampingEntry { index, value });
        }
        if let Some((index, &value)) = self
            .force_vector
            .iter()
            .enumerate()
            .find(|(_, f)| !f.is_finite())
        {
            return Err(SimError::NonFiniteForce { index, value });
        }
        Ok(())
    }

    /// Full pre-run validation. Nothing is simulated unless this passes.
    pub fn validate(&self) -> SimResult<()> {
        if self.steps == 0 {
            return Err(SimError::ZeroSteps);
        }
        if self.save_freq == 0 {
            return Err(SimError::ZeroSaveFreq);
        }
        self.validate_physics()?;

        let (min, max) = self.force_grid().domain();
        if !(self.position_start >= min && self.position_start <= max) {
            return Err(SimError::StartOutOfDomain {
                position: self.position_start,
                min,
                max,
            });
        }
        if self.method != Method::First {
            return Err(SimError::UnsupportedMethod(self.method.name()));
        }
        Ok(())
    }

    /// Three-node config with a restoring force, for unit tests.
    pub fn default_test() -> Self {
        Self {
            steps:            100,
            save_freq:        10,
            timestep:         0.01,
            temperature:      1.0,
            damping:          1.0,
            position_start:   1.0,
            position_spacing: 1.0,
            force_vector:     vec![1.0, 0.0, -1.0],
            damping_vector:   vec![1.0, 1.0, 1.0],
            ..Self::default()
        }
    }
}

fn parse_value<T>(line: usize, key: &str, value: &str) -> SimResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e: T::Err| SimError::Config {
        line,
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}

fn parse_vector(line: usize, key: &str, value: &str) -> SimResult<Vec<Real>> {
    value
        .split(',')
        .filter(|item| !item.is_empty())
        .map(|item| parse_value(line, key, item))
        .collect()
}
