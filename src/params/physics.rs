//! Mass-spring integration, spectrum force mapping and ripple parameters.

use crate::error::ParamsError;

/// Fixed-step integrator constants
#[derive(Debug, Clone)]
pub struct PhysicsParams {
    /// Fixed macro-step duration (seconds)
    pub fixed_step_s: f32,

    /// Micro-updates per fixed step
    pub substeps: u32,

    /// Pull toward rest position (1/s²)
    pub spring_constant: f32,

    /// Hooke coupling between lattice neighbors (1/s²)
    pub coupling_constant: f32,

    /// Velocity decay per micro-update, in (0, 1]
    pub damping: f32,

    /// Maximum distance from rest position (pixels)
    pub max_displacement: f32,
}

impl Default for PhysicsParams {
    fn default() -> Self {
        Self {
            fixed_step_s: 1.0 / 60.0,
            substeps: 2,
            spring_constant: 40.0,
            coupling_constant: 25.0,
            damping: 0.9,
            max_displacement: 18.0,
        }
    }
}

impl PhysicsParams {
    /// Duration of one micro-update (seconds)
    pub fn micro_step_s(&self) -> f32 {
        self.fixed_step_s / self.substeps as f32
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if !(self.fixed_step_s > 0.0) {
            return Err(ParamsError::OutOfRange {
                name: "fixed_step_s",
                value: self.fixed_step_s,
            });
        }
        if self.substeps == 0 {
            return Err(ParamsError::ZeroSubsteps);
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ParamsError::OutOfRange {
                name: "damping",
                value: self.damping,
            });
        }
        if !(self.max_displacement > 0.0) {
            return Err(ParamsError::OutOfRange {
                name: "max_displacement",
                value: self.max_displacement,
            });
        }
        Ok(())
    }
}

/// Mapping from band energies to per-node velocity impulses
#[derive(Debug, Clone)]
pub struct ForceMapping {
    /// Travelling wave angular speed (rad/s)
    pub wave_speed: f32,

    /// Wave phase advance per column (rad)
    pub phase_x: f32,

    /// Wave phase advance per row (rad)
    pub phase_y: f32,

    /// Vertical push per unit band magnitude (px/s, applied once per frame)
    pub vertical_gain: f32,

    /// Horizontal shear per unit band delta (px/s)
    pub shear_gain: f32,

    /// Turbulence per unit band magnitude (px/s)
    pub turbulence_gain: f32,

    /// Turbulence oscillator frequencies (rad/s)
    pub turbulence_freqs: (f32, f32),

    /// Frame-to-frame band increase that counts as a transient
    pub transient_threshold: f32,
}

impl Default for ForceMapping {
    fn default() -> Self {
        Self {
            wave_speed: 2.4,
            phase_x: 0.35,
            phase_y: 0.5,
            vertical_gain: 6.0,
            shear_gain: 20.0,
            turbulence_gain: 2.0,
            turbulence_freqs: (1.7, 2.3),
            transient_threshold: 0.12,
        }
    }
}

/// Radial impulse injected around transient origins
#[derive(Debug, Clone)]
pub struct RippleParams {
    /// Chebyshev radius in grid cells
    pub radius: usize,

    /// Ripple strength per unit band delta
    pub gain: f32,

    /// Impulse scale applied to strength * falloff (px/s per unit)
    pub propagation_speed: f32,
}

impl Default for RippleParams {
    fn default() -> Self {
        Self {
            radius: 3,
            gain: 40.0,
            propagation_speed: 0.5,
        }
    }
}

impl RippleParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.radius == 0 {
            return Err(ParamsError::ZeroRippleRadius);
        }
        Ok(())
    }
}
