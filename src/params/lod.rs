//! Adaptive level-of-detail thresholds and frame budget.

use crate::error::ParamsError;

/// Rebuild detection and frame-time driven density control
#[derive(Debug, Clone)]
pub struct LodParams {
    /// Relative canvas width/height change that triggers a rebuild
    /// 0.05 = 5%
    pub size_threshold: f32,

    /// Relative bar spacing change that triggers a rebuild
    /// 0.2 = 20%
    pub spacing_threshold: f32,

    /// Smallest relative density change worth a rebuild
    /// Smaller adjustments are skipped unless they reach a bound
    pub density_threshold: f32,

    /// Minimum simulated time between rebuilds (seconds)
    pub cooldown_s: f32,

    /// Frame processing budget (seconds)
    /// 0.004 = 4ms for the lattice on top of the rest of the frame
    pub frame_budget_s: f32,

    /// Exponential moving average weight of a new frame-time sample
    pub average_alpha: f32,

    /// Below `recovery_ratio * frame_budget_s` the density recovers
    pub recovery_ratio: f32,

    /// Multiplicative density recovery per measured lattice
    /// Must exceed `1 + density_threshold` to have any effect
    pub recovery_step: f32,

    /// Density multiplier bounds (min, max)
    pub density_bounds: (f32, f32),

    /// Disable frame-time adaptation (multiplier pinned at the upper bound)
    pub adaptive: bool,
}

impl Default for LodParams {
    fn default() -> Self {
        Self {
            size_threshold: 0.05,
            spacing_threshold: 0.2,
            density_threshold: 0.1,
            cooldown_s: 0.5,
            frame_budget_s: 0.004,
            average_alpha: 0.1,
            recovery_ratio: 0.6,
            recovery_step: 1.25,
            density_bounds: (0.5, 1.0),
            adaptive: true,
        }
    }
}

impl LodParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        let (min, max) = self.density_bounds;
        if !(min > 0.0 && min <= max && max <= 1.0) {
            return Err(ParamsError::DensityBounds { min, max });
        }
        if self.frame_budget_s <= 0.0 {
            return Err(ParamsError::OutOfRange {
                name: "frame_budget_s",
                value: self.frame_budget_s,
            });
        }
        if !(self.average_alpha > 0.0 && self.average_alpha <= 1.0) {
            return Err(ParamsError::OutOfRange {
                name: "average_alpha",
                value: self.average_alpha,
            });
        }
        if self.recovery_step < 1.0 {
            return Err(ParamsError::OutOfRange {
                name: "recovery_step",
                value: self.recovery_step,
            });
        }
        if self.cooldown_s < 0.0 {
            return Err(ParamsError::OutOfRange {
                name: "cooldown_s",
                value: self.cooldown_s,
            });
        }
        Ok(())
    }
}
