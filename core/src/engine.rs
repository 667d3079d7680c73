//! The simulation engine: config in, sampled trajectory out.
//!
//! PIPELINE (fixed):
//!   1. Validate the config.
//!   2. Build the step tables once.
//!   3. Integrate the trajectory with the run's own noise source.
//!
//! RULES:
//!   - One engine owns one config, one set of tables and one noise stream.
//!   - Replicas are independent whole runs, never slices of one run.

use crate::{
    config::SimulationConfig,
    error::SimResult,
    integrator::run_trajectory,
    noise::{derive_seed, NoiseSource, SeededNoise},
    observer::ProgressObserver,
    output::SimulationOutput,
    tables::{build_step_tables, StepTables},
};

pub struct SimEngine<N: NoiseSource> {
    config: SimulationConfig,
    tables: StepTables,
    noise:  N,
}

impl<N: NoiseSource> SimEngine<N> {
    /// Validate `config` and precompute its step tables.
    pub fn build(config: SimulationConfig, noise: N) -> SimResult<Self> {
        config.validate()?;
        let tables = build_step_tables(&config)?;
        Ok(Self { config, tables, noise })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn tables(&self) -> &StepTables {
        &self.tables
    }

    /// Run one trajectory. Calling this again continues the same noise
    /// stream, so the second trajectory differs from the first.
    pub fn run<O>(&mut self, observer: &mut O) -> SimResult<SimulationOutput>
    where
        O: ProgressObserver + ?Sized,
    {
        run_trajectory(&self.config, &self.tables, &mut self.noise, observer)
    }
}

impl SimEngine<SeededNoise> {
    /// Engine seeded from the config's `seed`, or from the clock when the
    /// config has none.
    pub fn from_config(config: SimulationConfig) -> SimResult<Self> {
        let noise = match config.seed {
            Some(seed) => SeededNoise::new(seed),
            None       => SeededNoise::from_entropy_seed(),
        };
        Self::build(config, noise)
    }

    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }
}

/// One finished replica of a batch.
#[derive(Debug, Clone)]
pub struct ReplicaRun {
    pub index:  u64,
    pub seed:   u64,
    pub output: SimulationOutput,
}

/// Run `count` independent trajectories of `config` one after another.
///
/// Tables are built once and shared read-only; every replica draws from
/// its own stream derived from `master_seed`, so replica k is identical
/// whether it runs alone or in a batch.
pub fn run_replicas<O>(
    config: &SimulationConfig,
    master_seed: u64,
    count: u64,
    observer: &mut O,
) -> SimResult<Vec<ReplicaRun>>
where
    O: ProgressObserver + ?Sized,
{
    config.validate()?;
    let tables = build_step_tables(config)?;

    let mut runs = Vec::new();
    for index in 0..count {
        let seed = derive_seed(master_seed, index);
        log::debug!("replica {index}: seed {seed}");
        let mut noise = SeededNoise::new(seed);
        let output = run_trajectory(config, &tables, &mut noise, observer)?;
        runs.push(ReplicaRun { index, seed, output });
    }
    Ok(runs)
}
