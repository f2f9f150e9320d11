//! Per-frame spectrum sources for driving the simulation without a live device.

use noise::{NoiseFn, OpenSimplex};
use std::path::Path;

use super::fft::SpectrumAnalyzer;
use crate::error::WaterResult;
use crate::params::AnalyzerConfig;

/// Anything that yields one magnitude array per rendered frame
pub trait SpectrumSource {
    /// Advance by `dt_s` seconds and return the spectrum for this frame,
    /// or `None` once the source is exhausted
    fn next_spectrum(&mut self, dt_s: f32) -> Option<&[f32]>;
}

/// Spectrum frames analyzed from a WAV file
pub struct WavSpectrumSource {
    samples: Vec<f32>,
    sample_rate: u32,
    cursor: f64,
    analyzer: SpectrumAnalyzer,
}

impl WavSpectrumSource {
    /// Load and down-mix a WAV file to mono
    pub fn open(path: impl AsRef<Path>, config: AnalyzerConfig) -> WaterResult<Self> {
        let mut reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        let channels = spec.channels.max(1) as usize;

        let interleaved: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
            hound::SampleFormat::Int => {
                let scale = 1.0 / (1_i64 << (spec.bits_per_sample.max(1) - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|v| v as f32 * scale))
                    .collect::<Result<_, _>>()?
            }
        };

        let samples = interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
            .collect();

        Self::from_samples(samples, spec.sample_rate, config)
    }

    /// Wrap already decoded mono samples
    pub fn from_samples(
        samples: Vec<f32>,
        sample_rate: u32,
        config: AnalyzerConfig,
    ) -> WaterResult<Self> {
        Ok(Self {
            samples,
            sample_rate,
            cursor: 0.0,
            analyzer: SpectrumAnalyzer::new(config)?,
        })
    }

    /// Total duration in seconds
    pub fn duration_s(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate.max(1) as f32
    }
}

impl SpectrumSource for WavSpectrumSource {
    fn next_spectrum(&mut self, dt_s: f32) -> Option<&[f32]> {
        let start = self.cursor as usize;
        if start >= self.samples.len() {
            return None;
        }
        self.cursor += dt_s.max(0.0) as f64 * self.sample_rate as f64;

        let end = (start + self.analyzer.config().fft_size).min(self.samples.len());
        Some(self.analyzer.analyze(&self.samples[start..end]))
    }
}

/// Deterministic procedural spectrum with a periodic low-frequency kick
pub struct SyntheticSpectrumSource {
    simplex: OpenSimplex,
    spectrum: Vec<f32>,
    time_s: f32,
    kick_period_s: f32,
}

impl SyntheticSpectrumSource {
    pub fn new(seed: u32, len: usize) -> Self {
        Self {
            simplex: OpenSimplex::new(seed),
            spectrum: vec![0.0; len],
            time_s: 0.0,
            kick_period_s: 0.5,
        }
    }
}

impl SpectrumSource for SyntheticSpectrumSource {
    fn next_spectrum(&mut self, dt_s: f32) -> Option<&[f32]> {
        self.time_s += dt_s.max(0.0);
        let len = self.spectrum.len().max(1) as f32;

        // Kick envelope: instant attack, exponential release
        let phase = (self.time_s % self.kick_period_s) / self.kick_period_s;
        let kick = (-phase * 8.0).exp();

        for (i, value) in self.spectrum.iter_mut().enumerate() {
            let position = i as f32 / len;
            let n = self
                .simplex
                .get([i as f64 * 0.05, self.time_s as f64 * 0.8]) as f32;
            let tilt = 1.0 - position * 0.7;
            let body = 0.5 * (n + 1.0) * 0.6 * tilt;
            let low = if position < 0.125 { kick * 0.9 } else { 0.0 };
            *value = (body + low).clamp(0.0, 1.0);
        }

        Some(&self.spectrum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_is_deterministic() {
        let mut a = SyntheticSpectrumSource::new(7, 64);
        let mut b = SyntheticSpectrumSource::new(7, 64);
        for _ in 0..10 {
            let left = a.next_spectrum(1.0 / 60.0).unwrap().to_vec();
            let right = b.next_spectrum(1.0 / 60.0).unwrap();
            assert_eq!(left.as_slice(), right);
        }
    }

    #[test]
    fn test_synthetic_values_in_unit_range() {
        let mut source = SyntheticSpectrumSource::new(1, 128);
        for _ in 0..120 {
            let spectrum = source.next_spectrum(1.0 / 60.0).unwrap();
            assert!(spectrum.iter().all(|&v| (0.0..=1.0).contains(&v)));
        }
    }

    #[test]
    fn test_wav_source_exhausts() {
        let config = AnalyzerConfig {
            fft_size: 256,
            ..AnalyzerConfig::default()
        };
        let mut source = WavSpectrumSource::from_samples(vec![0.0; 1000], 1000, config).unwrap();
        assert!((source.duration_s() - 1.0).abs() < 1e-6);

        let mut frames = 0;
        while let Some(spectrum) = source.next_spectrum(0.25) {
            assert_eq!(spectrum.len(), 128);
            frames += 1;
        }
        assert_eq!(frames, 4);
    }
}
