//! Quality tier presets and the aggregated parameter set.

use super::{BandParams, ForceMapping, GridParams, LodParams, PhysicsParams, RippleParams};
use crate::error::ParamsError;

/// Quality tier preset selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityTier {
    /// Coarse lattice, single substep, orthogonal coupling only
    Low,

    #[default]
    Medium,

    /// Dense lattice, three substeps, diagonal coupling
    High,
}

/// Complete, immutable configuration of one water effect instance
#[derive(Debug, Clone, Default)]
pub struct WaterParams {
    pub grid: GridParams,
    pub physics: PhysicsParams,
    pub bands: BandParams,
    pub force: ForceMapping,
    pub ripple: RippleParams,
    pub lod: LodParams,
}

impl WaterParams {
    /// Build the preset for a quality tier
    pub fn for_tier(tier: QualityTier) -> Self {
        let mut params = Self::default();
        match tier {
            QualityTier::Low => {
                params.grid.column_cap = 24;
                params.physics.substeps = 1;
            }
            QualityTier::Medium => {
                params.grid.column_cap = 40;
                params.physics.substeps = 2;
            }
            QualityTier::High => {
                params.grid.column_cap = 64;
                params.grid.advanced = true;
                params.physics.substeps = 3;
            }
        }
        params
    }

    /// Validate every sub-configuration
    pub fn validate(&self) -> Result<(), ParamsError> {
        self.physics.validate()?;
        self.bands.validate()?;
        self.ripple.validate()?;
        self.lod.validate()?;
        if self.grid.column_cap == 0 {
            return Err(ParamsError::OutOfRange {
                name: "column_cap",
                value: 0.0,
            });
        }
        if !(self.grid.base_density > 0.0) {
            return Err(ParamsError::OutOfRange {
                name: "base_density",
                value: self.grid.base_density,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_presets_validate() {
        for tier in [QualityTier::Low, QualityTier::Medium, QualityTier::High] {
            assert!(WaterParams::for_tier(tier).validate().is_ok());
        }
    }

    #[test]
    fn test_only_high_tier_enables_diagonals() {
        assert!(!WaterParams::for_tier(QualityTier::Low).grid.advanced);
        assert!(!WaterParams::for_tier(QualityTier::Medium).grid.advanced);
        assert!(WaterParams::for_tier(QualityTier::High).grid.advanced);
    }

    #[test]
    fn test_invalid_damping_rejected() {
        let mut params = WaterParams::default();
        params.physics.damping = 1.5;
        assert!(matches!(
            params.validate(),
            Err(ParamsError::OutOfRange { name: "damping", .. })
        ));
    }

    #[test]
    fn test_inverted_density_bounds_rejected() {
        let mut params = WaterParams::default();
        params.lod.density_bounds = (0.9, 0.5);
        assert!(matches!(
            params.validate(),
            Err(ParamsError::DensityBounds { .. })
        ));
    }
}
