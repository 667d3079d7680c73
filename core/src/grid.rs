//! Regularly spaced 1-D sampling of a physical quantity.
//!
//! Node `i` sits at `origin + i * spacing`. Every grid taking part in one
//! run (force, damping, and the two step tables) shares node count and
//! spacing, so a single index addresses all of them.

use crate::types::Real;
use serde::{Deserialize, Serialize};
use std::ops::Index;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridField {
    values:  Vec<Real>,
    origin:  Real,
    spacing: Real,
}

impl GridField {
    pub fn new(values: Vec<Real>, origin: Real, spacing: Real) -> Self {
        Self { values, origin, spacing }
    }

    /// Grid anchored at 0, the layout produced by the config loader.
    pub fn from_origin(values: Vec<Real>, spacing: Real) -> Self {
        Self::new(values, 0.0, spacing)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn origin(&self) -> Real {
        self.origin
    }

    pub fn spacing(&self) -> Real {
        self.spacing
    }

    pub fn values(&self) -> &[Real] {
        &self.values
    }

    pub fn get(&self, node: usize) -> Option<Real> {
        self.values.get(node).copied()
    }

    /// Position of the last node. Undefined for an empty grid; callers
    /// validate non-emptiness first.
    pub fn domain(&self) -> (Real, Real) {
        let last = self.values.len().saturating_sub(1) as Real;
        (self.origin, self.origin + last * self.spacing)
    }

    /// Node whose cell contains `position`.
    ///
    /// The position is clamped into the domain before the lookup, and the
    /// resulting index is clamped again to `[0, N-1]` so rounding at the
    /// upper edge can never step past the last node. The position itself
    /// is left untouched.
    pub fn node_index(&self, position: Real) -> usize {
        let (min, max) = self.domain();
        let clamped = position.max(min).min(max);
        let node = ((clamped - self.origin) / self.spacing).floor();
        // Negative or NaN casts saturate to 0.
        (node as usize).min(self.values.len().saturating_sub(1))
    }

    /// Build a grid on the same nodes by applying `f` to every value.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: FnMut(&Real) -> Real,
    {
        Self {
            values:  self.values.iter().map(f).collect(),
            origin:  self.origin,
            spacing: self.spacing,
        }
    }

    /// Whether `other` addresses the same nodes as `self`.
    pub fn is_aligned_with(&self, other: &GridField) -> bool {
        self.values.len() == other.values.len()
            && self.origin == other.origin
            && self.spacing == other.spacing
    }
}

impl Index<usize> for GridField {
    type Output = Real;

    fn index(&self, node: usize) -> &Real {
        &self.values[node]
    }
}
