use crate::types::{Real, Step};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("steps must be at least 1")]
    ZeroSteps,

    #[error("saveFreq must be at least 1")]
    ZeroSaveFreq,

    #[error("timestep must be finite and greater than 0; got {0}")]
    NonPositiveTimestep(Real),

    #[error("temperature must be finite and non-negative; got {0}")]
    NegativeTemperature(Real),

    #[error("damping must be finite and greater than 0; got {0}")]
    NonPositiveDamping(Real),

    #[error("positionSpacing must be finite and greater than 0; got {0}")]
    NonPositiveSpacing(Real),

    #[error("force and damping grids must contain at least one node")]
    EmptyGrid,

    #[error("force grid has {force} nodes but damping grid has {damping}")]
    GridLengthMismatch { force: usize, damping: usize },

    #[error("dampingVector[{index}] must be finite and greater than 0; got {value}")]
    NonPositiveDampingEntry { index: usize, value: Real },

    #[error("forceVector[{index}] is not finite: {value}")]
    NonFiniteForce { index: usize, value: Real },

    #[error("{table} step at node {index} is not finite: {value}")]
    NonFiniteStep {
        table: &'static str,
        index: usize,
        value: Real,
    },

    #[error("positionStart {position} lies outside the domain [{min}, {max}]")]
    StartOutOfDomain { position: Real, min: Real, max: Real },

    #[error("step tables have {tables} nodes but the configured grid has {grid}")]
    TableMismatch { tables: usize, grid: usize },

    #[error("integration method '{0}' is not implemented")]
    UnsupportedMethod(&'static str),

    #[error("config line {line}: invalid value '{value}' for '{key}': {reason}")]
    Config {
        line: usize,
        key: String,
        value: String,
        reason: String,
    },

    #[error("run cancelled at step {step}")]
    Cancelled { step: Step },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type SimResult<T> = Result<T, SimError>;
