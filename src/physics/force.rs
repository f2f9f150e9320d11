//! Spectrum-band driven forces and transient detection.

use glam::Vec2;
use log::trace;
use std::f32::consts::TAU;

use super::ripple::{RippleEvent, RipplePropagator};
use crate::audio::BandState;
use crate::grid::Grid;
use crate::params::{ForceMapping, RippleParams};

/// Per-node phase seeds (fractional parts of irrational multiples)
const SEED_A: f32 = 0.618_034;
const SEED_B: f32 = 0.754_877_7;

/// Band index driving a column
pub fn band_for_column(column: usize, columns: usize, band_count: usize) -> usize {
    if columns == 0 || band_count == 0 {
        return 0;
    }
    (column * band_count / columns).min(band_count - 1)
}

/// Maps band energies to additive velocity impulses and fires ripples on transients
#[derive(Debug, Clone)]
pub struct ForceField {
    mapping: ForceMapping,
    ripple_gain: f32,
    propagator: RipplePropagator,
    /// Ripples of the most recent frame only
    ripples: Vec<RippleEvent>,
}

impl ForceField {
    pub fn new(mapping: ForceMapping, ripple: &RippleParams) -> Self {
        Self {
            mapping,
            ripple_gain: ripple.gain,
            propagator: RipplePropagator::new(ripple),
            ripples: Vec::new(),
        }
    }

    pub fn propagator(&self) -> &RipplePropagator {
        &self.propagator
    }

    /// Ripple events produced by the last `apply` or `detect_transients` call
    pub fn ripples(&self) -> &[RippleEvent] {
        &self.ripples
    }

    /// Spectrum force on node `index` at `time_s` (px/s velocity impulse)
    pub fn force_at(&self, grid: &Grid, bands: &BandState, index: usize, time_s: f32) -> Vec2 {
        let m = &self.mapping;
        let (x, y) = grid.coords(index);
        let band = band_for_column(x, grid.columns(), bands.len());
        let magnitude = bands.current()[band];
        let delta = bands.delta(band);

        let phase = time_s * m.wave_speed + x as f32 * m.phase_x + y as f32 * m.phase_y;
        let wave = Vec2::new(
            delta * m.shear_gain * phase.cos(),
            // Canvas y grows downward: positive energy pushes up
            -magnitude * m.vertical_gain * phase.sin(),
        );

        let seed_a = (index as f32 * SEED_A).fract() * TAU;
        let seed_b = (index as f32 * SEED_B).fract() * TAU;
        let (freq_a, freq_b) = m.turbulence_freqs;
        let turbulence = Vec2::new(
            (time_s * freq_a + seed_a).sin(),
            (time_s * freq_b + seed_b).cos(),
        ) * magnitude
            * m.turbulence_gain;

        wave + turbulence
    }

    /// Collect ripple origins for every band whose magnitude jumped past the threshold
    ///
    /// Each node in a column mapped to such a band becomes an origin with
    /// `strength = delta * gain`.
    pub fn detect_transients(&mut self, grid: &Grid, bands: &BandState) -> &[RippleEvent] {
        self.ripples.clear();
        if grid.is_empty() || bands.is_empty() {
            return &self.ripples;
        }

        for band in 0..bands.len() {
            let delta = bands.delta(band);
            if !(delta > self.mapping.transient_threshold) {
                continue;
            }
            let strength = delta * self.ripple_gain;
            for x in 0..grid.columns() {
                if band_for_column(x, grid.columns(), bands.len()) != band {
                    continue;
                }
                for y in 0..grid.rows() {
                    self.ripples.push(RippleEvent {
                        origin: grid.index(x, y),
                        strength,
                    });
                }
            }
        }

        &self.ripples
    }

    /// Add spectrum forces to every node and inject ripples for transients
    ///
    /// Returns the number of ripple events fired this frame.
    pub fn apply(&mut self, grid: &mut Grid, bands: &BandState, time_s: f32) -> usize {
        if grid.is_empty() || bands.is_empty() {
            self.ripples.clear();
            return 0;
        }

        for index in 0..grid.len() {
            let force = self.force_at(grid, bands, index, time_s);
            if force.is_finite() {
                grid.nodes_mut()[index].velocity += force;
            }
        }

        self.detect_transients(grid, bands);
        for &event in &self.ripples {
            self.propagator.apply(grid, event);
        }

        if !self.ripples.is_empty() {
            trace!("{} ripple origins at t={:.3}s", self.ripples.len(), time_s);
        }
        self.ripples.len()
    }
}
