//! Radially decaying velocity impulses around a transient origin.

use glam::Vec2;

use crate::grid::Grid;
use crate::params::RippleParams;

/// One transient impulse; consumed in the frame it is produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RippleEvent {
    pub origin: usize,
    pub strength: f32,
}

/// Spreads ripple impulses over a Chebyshev neighborhood
#[derive(Debug, Clone)]
pub struct RipplePropagator {
    radius: usize,
    propagation_speed: f32,
}

impl RipplePropagator {
    pub fn new(params: &RippleParams) -> Self {
        Self {
            radius: params.radius,
            propagation_speed: params.propagation_speed,
        }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    /// Impulse magnitude at grid distance `distance` (zero at and beyond the radius)
    pub fn impulse_at(&self, strength: f32, distance: usize) -> f32 {
        if distance >= self.radius {
            return 0.0;
        }
        let falloff = 1.0 - distance as f32 / self.radius as f32;
        strength * falloff * self.propagation_speed
    }

    /// Add an outward impulse to every node within the radius of `origin`
    ///
    /// Out-of-range origins and cells past the grid edge are skipped.
    pub fn propagate(&self, grid: &mut Grid, origin: usize, strength: f32) {
        if origin >= grid.len() || !strength.is_finite() {
            return;
        }

        let (ox, oy) = grid.coords(origin);
        let x_range = ox.saturating_sub(self.radius)..=(ox + self.radius).min(grid.columns() - 1);
        let y_range = oy.saturating_sub(self.radius)..=(oy + self.radius).min(grid.rows() - 1);

        for y in y_range {
            for x in x_range.clone() {
                let dx = x as f32 - ox as f32;
                let dy = y as f32 - oy as f32;
                let distance = ox.abs_diff(x).max(oy.abs_diff(y));

                let impulse = self.impulse_at(strength, distance);
                if distance == 0 || impulse == 0.0 {
                    continue;
                }

                let direction = Vec2::new(dx, dy).normalize();
                let index = grid.index(x, y);
                grid.nodes_mut()[index].velocity += direction * impulse;
            }
        }
    }

    pub fn apply(&self, grid: &mut Grid, event: RippleEvent) {
        self.propagate(grid, event.origin, event.strength);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::params::GridParams;

    fn grid(columns: usize, width: f32, height: f32) -> Grid {
        let params = GridParams {
            column_cap: 128,
            ..GridParams::default()
        };
        GridBuilder::new(params)
            .build(width, height, columns, 1.0)
            .unwrap()
    }

    fn propagator() -> RipplePropagator {
        RipplePropagator::new(&RippleParams {
            radius: 3,
            gain: 1.0,
            propagation_speed: 2.0,
        })
    }

    #[test]
    fn test_falloff_is_linear_and_zero_at_radius() {
        let p = propagator();
        assert!((p.impulse_at(1.0, 0) - 2.0).abs() < 1e-6);
        assert!((p.impulse_at(1.0, 1) - 2.0 * 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(p.impulse_at(1.0, 3), 0.0);
        assert_eq!(p.impulse_at(1.0, 10), 0.0);
    }

    #[test]
    fn test_origin_is_untouched_and_direction_outward() {
        let mut grid = grid(11, 110.0, 110.0);
        let origin = grid.index(5, 5);
        propagator().propagate(&mut grid, origin, 1.0);

        assert_eq!(grid.nodes()[origin].velocity, Vec2::ZERO);

        let right = grid.nodes()[grid.index(6, 5)].velocity;
        assert!(right.x > 0.0 && right.y.abs() < 1e-6);

        let up_left = grid.nodes()[grid.index(4, 4)].velocity;
        assert!(up_left.x < 0.0 && up_left.y < 0.0);
        assert!((up_left.x - up_left.y).abs() < 1e-6);
    }

    #[test]
    fn test_magnitude_non_increasing_with_distance() {
        let mut grid = grid(15, 150.0, 150.0);
        let origin = grid.index(7, 7);
        let p = propagator();
        p.propagate(&mut grid, origin, 1.0);

        let mut last = f32::INFINITY;
        for d in 1..=6 {
            let speed = grid.nodes()[grid.index(7 + d, 7)].velocity.length();
            assert!(speed <= last + 1e-6);
            if d >= p.radius() {
                assert_eq!(speed, 0.0);
            }
            last = speed;
        }
    }

    #[test]
    fn test_edge_ripple_is_truncated() {
        let mut grid = grid(6, 60.0, 40.0);
        let corner = grid.index(0, 0);
        propagator().propagate(&mut grid, corner, 1.0);

        let touched = grid
            .nodes()
            .iter()
            .filter(|node| node.velocity != Vec2::ZERO)
            .count();
        // 3x3 block minus the origin
        assert_eq!(touched, 8);
    }

    #[test]
    fn test_out_of_range_origin_is_noop() {
        let mut grid = grid(6, 60.0, 40.0);
        let before = grid.clone();
        propagator().propagate(&mut grid, 10_000, 1.0);
        assert_eq!(grid, before);
    }
}
