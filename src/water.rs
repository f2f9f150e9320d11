//! Spectrum-driven water surface: the per-frame pipeline over one lattice.

use log::{debug, trace};
use std::time::Instant;

use crate::audio::{BandExtractor, BandState};
use crate::error::ParamsError;
use crate::grid::{Grid, GridBuilder};
use crate::lod::{AdaptiveLod, LayoutSnapshot};
use crate::params::WaterParams;
use crate::physics::{ForceField, PhysicsIntegrator, RippleEvent, StepReport};

/// Host-provided inputs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Canvas size (pixels)
    pub width: f32,
    pub height: f32,
    /// Gap between spectrum bars (pixels)
    pub bar_spacing: f32,
    /// Number of spectrum bars; requested lattice columns
    pub bar_count: usize,
    /// Wall-clock time since the previous frame (seconds)
    pub dt_s: f32,
}

impl FrameInput {
    pub fn layout(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            width: self.width,
            height: self.height,
            bar_spacing: self.bar_spacing,
            bar_count: self.bar_count,
        }
    }
}

/// What happened during one `update`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// The lattice was replaced this frame
    pub rebuilt: bool,
    /// Grid epoch after the frame
    pub epoch: u64,
    /// Ripple origins fired
    pub ripples: usize,
    pub steps: StepReport,
}

/// Water effect: owns the lattice and runs bands -> forces -> integration
///
/// The grid epoch increments on every rebuild; anything caching node
/// indices must re-fetch when it changes.
pub struct WaterSystem {
    params: WaterParams,
    builder: GridBuilder,
    lod: AdaptiveLod,
    bands: BandExtractor,
    force: ForceField,
    integrator: PhysicsIntegrator,
    grid: Option<Grid>,
    epoch: u64,
    time_s: f32,
}

impl WaterSystem {
    /// Create a water system with validated parameters
    pub fn new(params: WaterParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self {
            builder: GridBuilder::new(params.grid.clone()),
            lod: AdaptiveLod::new(params.lod.clone()),
            bands: BandExtractor::new(&params.bands),
            force: ForceField::new(params.force.clone(), &params.ripple),
            integrator: PhysicsIntegrator::new(params.physics.clone()),
            grid: None,
            epoch: 0,
            time_s: 0.0,
            params,
        })
    }

    pub fn params(&self) -> &WaterParams {
        &self.params
    }

    /// Current lattice, `None` until a non-degenerate canvas has been seen
    pub fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Simulated time (seconds)
    pub fn time_s(&self) -> f32 {
        self.time_s
    }

    pub fn bands(&self) -> &BandState {
        self.bands.state()
    }

    /// Ripples fired by the most recent frame
    pub fn ripples(&self) -> &[RippleEvent] {
        self.force.ripples()
    }

    pub fn lod(&self) -> &AdaptiveLod {
        &self.lod
    }

    pub fn integrator(&self) -> &PhysicsIntegrator {
        &self.integrator
    }

    /// Advance the simulation by one frame
    ///
    /// # Arguments
    /// * `spectrum` - Magnitudes for this frame, conventionally in [0, 1]
    /// * `input` - Canvas size, bar layout and frame delta
    pub fn update(&mut self, spectrum: &[f32], input: &FrameInput) -> FrameReport {
        let started = Instant::now();
        let dt_s = if input.dt_s.is_finite() && input.dt_s > 0.0 {
            input.dt_s
        } else {
            0.0
        };
        self.time_s += dt_s;

        let mut report = FrameReport::default();

        let layout = input.layout();
        if self.lod.should_rebuild(&layout, self.time_s) {
            report.rebuilt = self.rebuild(&layout);
        }

        self.bands.update(spectrum);

        if let Some(grid) = self.grid.as_mut() {
            report.ripples = self.force.apply(grid, self.bands.state(), self.time_s);
            report.steps = self.integrator.advance(grid, dt_s);
        }
        report.epoch = self.epoch;

        // Allocation cost of a rebuild is not steady-state frame cost
        if !report.rebuilt {
            self.lod.record_frame_time(started.elapsed().as_secs_f32());
        }

        trace!(
            "frame t={:.3}s steps={} ripples={}",
            self.time_s,
            report.steps.fixed_steps,
            report.ripples
        );
        report
    }

    /// Replace the lattice for a new layout; node state is discarded
    fn rebuild(&mut self, layout: &LayoutSnapshot) -> bool {
        let density = self.params.grid.base_density * self.lod.density_scale();
        let Some(grid) = self
            .builder
            .build(layout.width, layout.height, layout.bar_count, density)
        else {
            return false;
        };

        self.epoch += 1;
        debug!(
            "Grid epoch {}: {}x{} nodes for {:.0}x{:.0} canvas",
            self.epoch,
            grid.columns(),
            grid.rows(),
            layout.width,
            layout.height
        );
        self.grid = Some(grid);
        self.lod.mark_rebuilt(*layout, self.time_s);
        true
    }
}
