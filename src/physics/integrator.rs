//! Fixed-timestep mass-spring integration with an accumulator.

use glam::Vec2;
use log::warn;

use crate::grid::Grid;
use crate::params::PhysicsParams;

/// What one `advance` call did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Fixed macro-steps run
    pub fixed_steps: u32,
    /// Micro-updates run (`fixed_steps * substeps`)
    pub micro_steps: u32,
    /// Nodes reset to rest after going non-finite
    pub resets: usize,
}

/// Synchronous (Jacobi-style) spring integrator
#[derive(Debug, Clone)]
pub struct PhysicsIntegrator {
    params: PhysicsParams,
    accumulator_s: f64,
    simulated_s: f64,
    /// Per-node force scratch, reused across frames
    forces: Vec<Vec2>,
}

impl PhysicsIntegrator {
    pub fn new(params: PhysicsParams) -> Self {
        Self {
            params,
            accumulator_s: 0.0,
            simulated_s: 0.0,
            forces: Vec::new(),
        }
    }

    pub fn params(&self) -> &PhysicsParams {
        &self.params
    }

    /// Frame time not yet consumed by a fixed step (seconds)
    pub fn accumulator_s(&self) -> f64 {
        self.accumulator_s
    }

    /// Total time integrated so far (seconds)
    pub fn simulated_s(&self) -> f64 {
        self.simulated_s
    }

    /// Consume `frame_dt_s` of wall-clock time in whole fixed steps
    ///
    /// Leftover time carries into the next frame. Non-finite or negative
    /// deltas are ignored.
    pub fn advance(&mut self, grid: &mut Grid, frame_dt_s: f32) -> StepReport {
        let mut report = StepReport::default();
        if !frame_dt_s.is_finite() || frame_dt_s <= 0.0 {
            return report;
        }

        let fixed_step = self.params.fixed_step_s as f64;
        self.accumulator_s += frame_dt_s as f64;

        while self.accumulator_s >= fixed_step {
            report.resets += self.step_fixed(grid);
            report.fixed_steps += 1;
            report.micro_steps += self.params.substeps;
            self.accumulator_s -= fixed_step;
            self.simulated_s += fixed_step;
        }

        if report.resets > 0 {
            warn!(
                "Reset {} non-finite nodes over {} fixed steps",
                report.resets, report.fixed_steps
            );
        }
        report
    }

    /// Run one fixed step of `substeps` micro-updates, bypassing the accumulator
    ///
    /// Returns the number of nodes reset by the non-finite guard.
    pub fn step_fixed(&mut self, grid: &mut Grid) -> usize {
        let dt = self.params.micro_step_s();
        (0..self.params.substeps)
            .map(|_| self.micro_step(grid, dt))
            .sum()
    }

    fn micro_step(&mut self, grid: &mut Grid, dt: f32) -> usize {
        let PhysicsParams {
            spring_constant,
            coupling_constant,
            damping,
            max_displacement,
            ..
        } = self.params;

        // Gather every force from the same position snapshot before moving anything
        self.forces.clear();
        let nodes = grid.nodes();
        self.forces.extend(nodes.iter().map(|node| {
            let mut force = (node.rest_position() - node.position) * spring_constant;
            for &j in node.neighbors() {
                let other = &nodes[j];
                let delta = other.position - node.position;
                let distance = delta.length();
                if distance <= f32::EPSILON {
                    continue;
                }
                let rest_length = other.rest_position().distance(node.rest_position());
                force += delta / distance * (distance - rest_length) * coupling_constant;
            }
            force
        }));

        let mut resets = 0;
        for (node, &force) in grid.nodes_mut().iter_mut().zip(&self.forces) {
            node.velocity = (node.velocity + force * dt) * damping;
            node.position += node.velocity * dt;

            if !(node.position.is_finite() && node.velocity.is_finite()) {
                node.reset();
                resets += 1;
                continue;
            }

            let offset = node.position - node.rest_position();
            if offset.length() > max_displacement {
                node.position = node.rest_position() + offset.clamp_length_max(max_displacement);
            }
        }
        resets
    }
}
