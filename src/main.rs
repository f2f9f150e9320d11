//! Ripplegrid - headless driver for the spectrum-driven water surface
//!
//! Feeds a synthetic or WAV-derived spectrum through the lattice simulation,
//! logs per-second statistics and optionally writes a PNG of the final frame.

use clap::Parser;
use log::{info, warn};

use ripplegrid::cli::Args;
use ripplegrid::error::WaterResult;
use ripplegrid::snapshot::save_snapshot;
use ripplegrid::water::WaterSystem;

/// Statistics accumulated over one logging window
#[derive(Default)]
struct WindowStats {
    frames: usize,
    fixed_steps: u32,
    ripples: usize,
    resets: usize,
    rebuilds: usize,
}

fn main() -> WaterResult<()> {
    env_logger::init();

    let args = Args::parse();
    let mut water = WaterSystem::new(args.water_params())?;
    let mut source = args.create_source()?;
    let input = args.frame_input();

    let frames_per_window = (args.fps.round() as usize).max(1);
    let mut stats = WindowStats::default();

    for frame in 0..args.frames {
        let Some(spectrum) = source.next_spectrum(input.dt_s) else {
            info!("Spectrum source exhausted after {} frames", frame);
            break;
        };

        let report = water.update(spectrum, &input);
        stats.frames += 1;
        stats.fixed_steps += report.steps.fixed_steps;
        stats.ripples += report.ripples;
        stats.resets += report.steps.resets;
        stats.rebuilds += report.rebuilt as usize;

        if stats.frames == frames_per_window {
            let max_displacement = water.grid().map_or(0.0, |grid| grid.max_displacement());
            info!(
                "t={:.1}s epoch={} steps={} ripples={} rebuilds={} resets={} max_disp={:.2}px density={:.2}",
                water.time_s(),
                report.epoch,
                stats.fixed_steps,
                stats.ripples,
                stats.rebuilds,
                stats.resets,
                max_displacement,
                water.lod().density_scale()
            );
            stats = WindowStats::default();
        }
    }

    if let Some(path) = &args.snapshot {
        match water.grid() {
            Some(grid) => {
                save_snapshot(grid, args.width as u32, args.height as u32, path)?;
                info!("Snapshot written to {}", path.display());
            }
            None => warn!("No grid to snapshot (degenerate canvas?)"),
        }
    }

    Ok(())
}
