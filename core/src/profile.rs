//! Analytic force profiles for demo and test inputs.

use crate::{grid::GridField, types::Real};

/// Force of the cubic test landscape, `f(x) = -(x-3)^3 + (x-3)`.
pub fn cubic_force(x: Real) -> Real {
    let u = x - 3.0;
    -u * u * u + u
}

/// Sample [`cubic_force`] on `[min, max]`.
///
/// Produces `floor((max - min) / spacing) + 1` nodes starting at `min`.
/// Returns an empty grid if `spacing` is not positive or `max < min`.
pub fn cubic_force_profile(spacing: Real, min: Real, max: Real) -> GridField {
    if !(spacing > 0.0) || !(max >= min) {
        return GridField::new(Vec::new(), min, spacing);
    }
    let n = ((max - min) / spacing).floor() as usize + 1;
    let values = (0..n)
        .map(|i| cubic_force(min + i as Real * spacing))
        .collect();
    GridField::new(values, min, spacing)
}

/// Relative damping of 1 at every node.
pub fn uniform_damping(nodes: usize, spacing: Real) -> GridField {
    GridField::from_origin(vec![1.0; nodes], spacing)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_count_covers_both_ends() {
        let grid = cubic_force_profile(0.5, 0.0, 6.0);
        assert_eq!(grid.len(), 13);
        assert_eq!(grid.domain(), (0.0, 6.0));
    }

    #[test]
    fn cubic_has_zero_force_at_the_stationary_points() {
        let grid = cubic_force_profile(1.0, 0.0, 6.0);
        // x = 2, 3, 4 are the roots of -(x-3)^3 + (x-3).
        assert_eq!(grid[2], 0.0);
        assert_eq!(grid[3], 0.0);
        assert_eq!(grid[4], 0.0);
        assert_eq!(grid[0], 24.0);
        assert_eq!(grid[6], -24.0);
    }

    #[test]
    fn bad_spacing_gives_empty_grid() {
        assert!(cubic_force_profile(0.0, 0.0, 6.0).is_empty());
        assert!(cubic_force_profile(1.0, 6.0, 0.0).is_empty());
    }
}
