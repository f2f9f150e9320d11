//! Spectrum analysis and band extraction configuration.

use crate::error::ParamsError;

/// Band reduction applied to the incoming magnitude array
#[derive(Debug, Clone)]
pub struct BandParams {
    /// Number of contiguous frequency bands (fixed per instantiation)
    pub band_count: usize,

    /// Exponential smoothing factor in (0, 1]
    /// 1.0 = no smoothing, small values = heavy smoothing
    pub smoothing: f32,
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            band_count: 8,
            smoothing: 0.3,
        }
    }
}

impl BandParams {
    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.band_count == 0 {
            return Err(ParamsError::ZeroBands);
        }
        if !(self.smoothing > 0.0 && self.smoothing <= 1.0) {
            return Err(ParamsError::OutOfRange {
                name: "smoothing",
                value: self.smoothing,
            });
        }
        Ok(())
    }
}

/// FFT analysis configuration for PCM-driven spectrum sources
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// FFT window size (must be power of 2)
    pub fft_size: usize,

    /// Magnitude mapped to 1.0 after normalisation (linear FFT units)
    pub reference_magnitude: f32,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fft_size: 1024,
            reference_magnitude: 64.0,
        }
    }
}

impl AnalyzerConfig {
    /// Number of magnitudes produced per analysis (positive frequencies only)
    pub fn spectrum_len(&self) -> usize {
        self.fft_size / 2
    }

    /// Validate configuration (FFT size must be power of 2, etc.)
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.fft_size.is_power_of_two() || self.fft_size < 2 {
            return Err(ParamsError::FftSize(self.fft_size));
        }
        if self.reference_magnitude <= 0.0 {
            return Err(ParamsError::OutOfRange {
                name: "reference_magnitude",
                value: self.reference_magnitude,
            });
        }
        Ok(())
    }
}
