//! Adaptive level of detail: rebuild detection and frame-time driven density.

use log::{debug, info};

use crate::params::LodParams;

/// Exponential moving average of frame processing time
///
/// Until `1 / alpha` samples have been seen the average is the plain mean
/// of what arrived, so the first frame does not stand in for the whole
/// window.
#[derive(Debug, Clone)]
pub struct PerformanceSample {
    alpha: f32,
    average_s: f32,
    samples: usize,
}

impl PerformanceSample {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha,
            average_s: 0.0,
            samples: 0,
        }
    }

    /// Fold in one frame duration (seconds)
    pub fn record(&mut self, frame_time_s: f32) {
        self.samples += 1;
        let weight = self.alpha.max(1.0 / self.samples as f32);
        self.average_s += (frame_time_s - self.average_s) * weight;
    }

    /// Current average, zero before the first sample
    pub fn average_s(&self) -> f32 {
        self.average_s
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Enough samples have arrived for the average to span a full window
    pub fn is_warm(&self) -> bool {
        self.samples as f32 * self.alpha >= 1.0
    }

    /// Forget all samples
    pub fn reset(&mut self) {
        self.average_s = 0.0;
        self.samples = 0;
    }
}

/// Layout inputs that determine grid dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSnapshot {
    pub width: f32,
    pub height: f32,
    pub bar_spacing: f32,
    pub bar_count: usize,
}

#[derive(Debug, Clone, Copy)]
struct BuildRecord {
    layout: LayoutSnapshot,
    density_scale: f32,
    at_s: f32,
}

/// Decides when to rebuild the grid and how densely
#[derive(Debug, Clone)]
pub struct AdaptiveLod {
    params: LodParams,
    frame_time: PerformanceSample,
    density_scale: f32,
    last_build: Option<BuildRecord>,
    /// Density changed since the last build and has not been measured yet
    rebuild_pending: bool,
}

impl AdaptiveLod {
    pub fn new(params: LodParams) -> Self {
        Self {
            frame_time: PerformanceSample::new(params.average_alpha),
            density_scale: params.density_bounds.1,
            last_build: None,
            rebuild_pending: false,
            params,
        }
    }

    /// Density multiplier to use for the next rebuild
    pub fn density_scale(&self) -> f32 {
        self.density_scale
    }

    pub fn frame_time(&self) -> &PerformanceSample {
        &self.frame_time
    }

    /// Whether the grid must be rebuilt for this layout at time `now_s`
    ///
    /// Always true before the first build. Afterwards a size, spacing,
    /// bar count or pending density change is required, and the cooldown
    /// since the last rebuild must have elapsed.
    pub fn should_rebuild(&self, layout: &LayoutSnapshot, now_s: f32) -> bool {
        let Some(last) = self.last_build else {
            return true;
        };

        let p = &self.params;
        let changed = relative_change(last.layout.width, layout.width) > p.size_threshold
            || relative_change(last.layout.height, layout.height) > p.size_threshold
            || relative_change(last.layout.bar_spacing, layout.bar_spacing) > p.spacing_threshold
            || last.layout.bar_count != layout.bar_count
            || self.rebuild_pending;

        changed && now_s - last.at_s >= p.cooldown_s
    }

    /// Record that a rebuild happened with the current density
    ///
    /// Frame timing restarts so the next adjustment is measured on the new
    /// lattice.
    pub fn mark_rebuilt(&mut self, layout: LayoutSnapshot, now_s: f32) {
        self.last_build = Some(BuildRecord {
            layout,
            density_scale: self.density_scale,
            at_s: now_s,
        });
        self.rebuild_pending = false;
        self.frame_time.reset();
    }

    /// A density change is waiting for the next rebuild
    pub fn rebuild_pending(&self) -> bool {
        self.rebuild_pending
    }

    /// Fold in one frame processing time and adapt the density multiplier
    ///
    /// Only a warm moving average is consulted, and only one adjustment is
    /// made per built lattice: after a change the multiplier holds until
    /// `mark_rebuilt` and a fresh warm-up. Over budget the scale becomes
    /// `built * sqrt(budget / avg)`; below `recovery_ratio * budget` it
    /// steps up by `recovery_step`; in between it holds. Changes smaller
    /// than `density_threshold` are skipped unless they reach a bound.
    pub fn record_frame_time(&mut self, frame_time_s: f32) {
        if !self.params.adaptive || !frame_time_s.is_finite() || frame_time_s < 0.0 {
            return;
        }
        self.frame_time.record(frame_time_s);

        if self.rebuild_pending || !self.frame_time.is_warm() {
            return;
        }

        let budget = self.params.frame_budget_s;
        let average = self.frame_time.average_s();
        let target = if average > budget {
            self.density_scale * (budget / average).sqrt()
        } else if average < budget * self.params.recovery_ratio {
            self.density_scale * self.params.recovery_step
        } else {
            return;
        };

        let (min, max) = self.params.density_bounds;
        let target = target.clamp(min, max);
        let at_bound = target == min || target == max;
        let significant =
            relative_change(self.density_scale, target) > self.params.density_threshold;

        if target != self.density_scale && (significant || at_bound) {
            info!(
                "LOD density {:.2} -> {:.2} (avg frame {:.2}ms, budget {:.2}ms)",
                self.density_scale,
                target,
                average * 1000.0,
                budget * 1000.0
            );
            self.density_scale = target;
            self.rebuild_pending = true;
        } else {
            debug!("LOD density held at {:.2}", self.density_scale);
        }
    }
}

fn relative_change(old: f32, new: f32) -> f32 {
    (new - old).abs() / old.abs().max(f32::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(width: f32, height: f32, bar_spacing: f32, bar_count: usize) -> LayoutSnapshot {
        LayoutSnapshot {
            width,
            height,
            bar_spacing,
            bar_count,
        }
    }

    fn built_lod() -> AdaptiveLod {
        let mut lod = AdaptiveLod::new(LodParams::default());
        lod.mark_rebuilt(layout(800.0, 400.0, 10.0, 32), 0.0);
        lod
    }

    #[test]
    fn test_first_frame_always_rebuilds() {
        let lod = AdaptiveLod::new(LodParams::default());
        assert!(lod.should_rebuild(&layout(800.0, 400.0, 10.0, 32), 0.0));
    }

    #[test]
    fn test_small_resize_ignored() {
        let lod = built_lod();
        assert!(!lod.should_rebuild(&layout(820.0, 410.0, 11.0, 32), 5.0));
    }

    #[test]
    fn test_resize_waits_for_cooldown() {
        let lod = built_lod();
        let resized = layout(900.0, 400.0, 10.0, 32);
        assert!(!lod.should_rebuild(&resized, 0.2));
        assert!(lod.should_rebuild(&resized, 0.5));
    }

    #[test]
    fn test_spacing_and_bar_count_triggers() {
        let lod = built_lod();
        assert!(lod.should_rebuild(&layout(800.0, 400.0, 12.5, 32), 1.0));
        assert!(lod.should_rebuild(&layout(800.0, 400.0, 10.0, 33), 1.0));
    }

    #[test]
    fn test_moving_average() {
        let mut sample = PerformanceSample::new(0.5);
        assert_eq!(sample.average_s(), 0.0);
        sample.record(0.002);
        sample.record(0.004);
        assert!((sample.average_s() - 0.003).abs() < 1e-7);
        assert!(sample.is_warm());
    }

    #[test]
    fn test_warm_up_uses_plain_mean() {
        let mut sample = PerformanceSample::new(0.1);
        sample.record(0.016);
        for _ in 0..9 {
            sample.record(0.002);
        }
        assert_eq!(sample.samples(), 10);
        assert!(sample.is_warm());
        assert!((sample.average_s() - 0.0034).abs() < 1e-6);

        sample.reset();
        assert!(!sample.is_warm());
        assert_eq!(sample.average_s(), 0.0);
    }

    #[test]
    fn test_first_frame_spike_does_not_reduce_density() {
        let mut lod = AdaptiveLod::new(LodParams::default());
        lod.record_frame_time(0.016);
        assert_eq!(lod.density_scale(), 1.0);

        let mut lod = built_lod();
        lod.record_frame_time(0.016);
        for _ in 0..9 {
            lod.record_frame_time(0.002);
        }
        assert_eq!(lod.density_scale(), 1.0);
        assert!(!lod.rebuild_pending());
    }

    #[test]
    fn test_single_spike_does_not_reduce_density() {
        let mut lod = built_lod();
        for _ in 0..30 {
            lod.record_frame_time(0.003);
        }
        lod.record_frame_time(0.012);
        assert_eq!(lod.density_scale(), 1.0);
    }

    #[test]
    fn test_sustained_overload_reduces_density_within_bounds() {
        let mut lod = built_lod();
        for _ in 0..600 {
            lod.record_frame_time(0.016);
        }
        let scale = lod.density_scale();
        assert!(scale < 1.0);
        assert!(scale >= 0.5);
        assert!((scale - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_overload_does_not_compound_before_rebuild() {
        let mut lod = built_lod();
        let same = layout(800.0, 400.0, 10.0, 32);
        let once = (0.004f32 / 0.0064).sqrt();

        for _ in 0..600 {
            lod.record_frame_time(0.0064);
        }
        assert!((lod.density_scale() - once).abs() < 1e-5);
        assert!(lod.rebuild_pending());

        // The reduced lattice is still too slow: one more measured step
        lod.mark_rebuilt(same, 1.0);
        for _ in 0..600 {
            lod.record_frame_time(0.0064);
        }
        assert!((lod.density_scale() - once * once).abs() < 1e-5);
    }

    #[test]
    fn test_density_change_triggers_rebuild_after_cooldown() {
        let mut lod = built_lod();
        let same = layout(800.0, 400.0, 10.0, 32);
        for _ in 0..60 {
            lod.record_frame_time(0.016);
        }
        assert!(lod.density_scale() < 0.9);
        assert!(!lod.should_rebuild(&same, 0.3));
        assert!(lod.should_rebuild(&same, 1.0));

        lod.mark_rebuilt(same, 1.0);
        assert!(!lod.rebuild_pending());
        assert!(!lod.should_rebuild(&same, 1.2));
    }

    #[test]
    fn test_small_adjustment_skipped() {
        let mut lod = built_lod();
        // sqrt(0.004 / 0.0045) is about 0.94, inside the 10% threshold
        for _ in 0..600 {
            lod.record_frame_time(0.0045);
        }
        assert_eq!(lod.density_scale(), 1.0);
        assert!(!lod.rebuild_pending());
    }

    #[test]
    fn test_density_recovers_when_fast() {
        let mut lod = built_lod();
        let same = layout(800.0, 400.0, 10.0, 32);
        for _ in 0..120 {
            lod.record_frame_time(0.016);
        }
        let reduced = lod.density_scale();
        assert!((reduced - 0.5).abs() < 1e-6);

        for frame in 120..1200 {
            let now_s = frame as f32 / 60.0;
            if lod.should_rebuild(&same, now_s) {
                lod.mark_rebuilt(same, now_s);
            }
            lod.record_frame_time(0.0005);
        }
        assert!(lod.density_scale() > reduced);
        assert_eq!(lod.density_scale(), 1.0);
    }

    #[test]
    fn test_non_adaptive_pins_density() {
        let params = LodParams {
            adaptive: false,
            ..LodParams::default()
        };
        let mut lod = AdaptiveLod::new(params);
        for _ in 0..600 {
            lod.record_frame_time(0.05);
        }
        assert_eq!(lod.density_scale(), 1.0);
    }
}
