//! FFT analysis of PCM windows into normalized magnitude spectra.

use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

use crate::error::ParamsError;
use crate::params::AnalyzerConfig;

/// Hann-windowed forward FFT with reusable buffers
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buffer: Vec<Complex<f32>>,
    magnitudes: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, ParamsError> {
        config.validate()?;

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(config.fft_size);
        let window = hann_table(config.fft_size);

        Ok(Self {
            buffer: vec![Complex::new(0.0, 0.0); config.fft_size],
            magnitudes: vec![0.0; config.spectrum_len()],
            fft,
            window,
            config,
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze one window of mono samples
    ///
    /// Shorter input is zero-padded; longer input is truncated to `fft_size`.
    /// Returns magnitudes in [0, 1] for the positive-frequency bins.
    pub fn analyze(&mut self, samples: &[f32]) -> &[f32] {
        for (i, slot) in self.buffer.iter_mut().enumerate() {
            let sample = samples.get(i).copied().unwrap_or(0.0);
            *slot = Complex::new(sample * self.window[i], 0.0);
        }

        self.fft.process(&mut self.buffer);

        let reference = self.config.reference_magnitude;
        for (magnitude, bin) in self.magnitudes.iter_mut().zip(&self.buffer) {
            *magnitude = (bin.norm() / reference).clamp(0.0, 1.0);
        }

        &self.magnitudes
    }
}

/// Symmetric Hann taper of `size` coefficients, `sin^2(pi * i / (size - 1))`
pub fn hann_table(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    let last = (size - 1) as f32;
    (0..size)
        .map(|i| (PI * i as f32 / last).sin().powi(2))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_taper_is_symmetric_hann() {
        for fft_size in [256, 1024] {
            let analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
                fft_size,
                ..AnalyzerConfig::default()
            })
            .unwrap();
            let window = &analyzer.window;
            assert_eq!(window.len(), fft_size);

            for i in 0..fft_size / 2 {
                assert!((window[i] - window[fft_size - 1 - i]).abs() < 1e-5);
            }
            assert!(window[0].abs() < 1e-6);
            assert!(window.iter().all(|&w| (0.0..=1.0).contains(&w)));

            // Coherent gain of a Hann taper is one half
            let gain = window.iter().sum::<f32>() / (fft_size - 1) as f32;
            assert!((gain - 0.5).abs() < 1e-3, "gain {} for {}", gain, fft_size);
        }
        assert_eq!(hann_table(1), vec![1.0]);
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let config = AnalyzerConfig {
            fft_size: 1000,
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            SpectrumAnalyzer::new(config),
            Err(ParamsError::FftSize(1000))
        ));
    }

    #[test]
    fn test_silence_is_zero() {
        let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
        let spectrum = analyzer.analyze(&[0.0; 1024]);
        assert_eq!(spectrum.len(), 512);
        assert!(spectrum.iter().all(|&m| m == 0.0));
    }

    #[test]
    fn test_sine_peaks_at_its_bin() {
        let config = AnalyzerConfig::default();
        let size = config.fft_size;
        let mut analyzer = SpectrumAnalyzer::new(config).unwrap();

        let bin = 32;
        let samples: Vec<f32> = (0..size)
            .map(|i| 0.1 * (2.0 * PI * bin as f32 * i as f32 / size as f32).sin())
            .collect();
        let spectrum = analyzer.analyze(&samples);

        let peak = spectrum
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, bin);
        assert!(spectrum.iter().all(|&m| (0.0..=1.0).contains(&m)));
    }
}
