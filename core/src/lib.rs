//! Single-particle Brownian dynamics in one dimension.
//!
//! A particle moves through a sampled force landscape with position
//! dependent damping. The overdamped Langevin equation is integrated
//! with a fixed-step Euler–Maruyama scheme on precomputed per-node step
//! tables, and the trajectory is sampled every `saveFreq` steps.
//!
//! ```text
//! config -> build_step_tables -> run_trajectory -> SimulationOutput -> writer
//! ```

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod grid;
pub mod integrator;
pub mod noise;
pub mod observer;
pub mod output;
pub mod profile;
pub mod summary;
pub mod tables;
pub mod types;
pub mod writer;

pub use config::{Method, SimulationConfig, TimeUnits};
pub use error::{SimError, SimResult};
pub use integrator::run_trajectory;
pub use output::{SampleTime, SimulationOutput};
pub use tables::{build_step_tables, StepTables};
