//! Shared primitive types used across the entire simulation.

/// A simulation step index. Runs of ~10^10 steps occur in practice,
/// so this is always 64 bits wide.
pub type Step = u64;

/// Scalar type for positions, forces, damping and noise.
pub type Real = f32;
