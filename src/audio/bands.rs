//! Reduction of a full magnitude array to a few smoothed bands.

use crate::params::BandParams;

/// Smoothed band magnitudes plus one frame of history
#[derive(Debug, Clone, PartialEq)]
pub struct BandState {
    current: Vec<f32>,
    previous: Vec<f32>,
}

impl BandState {
    pub fn new(band_count: usize) -> Self {
        Self {
            current: vec![0.0; band_count],
            previous: vec![0.0; band_count],
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn current(&self) -> &[f32] {
        &self.current
    }

    pub fn previous(&self) -> &[f32] {
        &self.previous
    }

    /// Frame-to-frame change of band `index`
    pub fn delta(&self, index: usize) -> f32 {
        self.current[index] - self.previous[index]
    }

    /// Carry the current values forward unchanged, so every delta is zero
    pub fn hold(&mut self) {
        self.previous.copy_from_slice(&self.current);
    }

    /// Shift current values into history and store a new frame
    ///
    /// Missing trailing values are treated as zero; extras are ignored.
    pub fn push(&mut self, values: &[f32]) {
        std::mem::swap(&mut self.current, &mut self.previous);
        for (i, band) in self.current.iter_mut().enumerate() {
            *band = values.get(i).copied().unwrap_or(0.0);
        }
    }
}

/// Partitions a spectrum into contiguous buckets and smooths each one
#[derive(Debug, Clone)]
pub struct BandExtractor {
    smoothing: f32,
    state: BandState,
    raw: Vec<f32>,
}

impl BandExtractor {
    pub fn new(params: &BandParams) -> Self {
        Self {
            smoothing: params.smoothing,
            state: BandState::new(params.band_count),
            raw: vec![0.0; params.band_count],
        }
    }

    pub fn state(&self) -> &BandState {
        &self.state
    }

    /// Fold one frame of spectrum into the band state
    ///
    /// An empty spectrum keeps the band values but ages the history, so a
    /// transient seen on the last real frame does not fire again.
    pub fn update(&mut self, spectrum: &[f32]) {
        if self.state.is_empty() {
            return;
        }
        if spectrum.is_empty() {
            self.state.hold();
            return;
        }

        let band_count = self.state.len();
        let bucket = (spectrum.len() / band_count).max(1);

        for (i, raw) in self.raw.iter_mut().enumerate() {
            let start = (i * bucket).min(spectrum.len());
            let end = ((i + 1) * bucket).min(spectrum.len());
            let slice = &spectrum[start..end];

            let average = if slice.is_empty() {
                0.0
            } else {
                slice
                    .iter()
                    .map(|&v| if v.is_finite() { v } else { 0.0 })
                    .sum::<f32>()
                    / slice.len() as f32
            };

            let previous = self.state.current[i];
            *raw = previous + (average - previous) * self.smoothing;
        }

        self.state.push(&self.raw);
    }
}
