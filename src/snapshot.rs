//! Debug rasterisation of the lattice to a PNG.

use glam::Vec2;
use image::{Rgb, RgbImage};
use std::path::Path;

use crate::error::WaterResult;
use crate::grid::Grid;

const BACKGROUND: Rgb<u8> = Rgb([8, 12, 24]);
const CONNECTION: Rgb<u8> = Rgb([30, 90, 140]);
const NODE: Rgb<u8> = Rgb([150, 220, 255]);

/// Draw neighbor connections and node markers at their current positions
pub fn render_snapshot(grid: &Grid, width: u32, height: u32) -> RgbImage {
    let mut image = RgbImage::from_pixel(width, height, BACKGROUND);

    for (a, b) in grid.edges() {
        let from = grid.nodes()[a].position;
        let to = grid.nodes()[b].position;
        draw_line(&mut image, from, to, CONNECTION);
    }

    for node in grid.nodes() {
        let p = node.position;
        for dy in -1..=1 {
            for dx in -1..=1 {
                put(&mut image, p + Vec2::new(dx as f32, dy as f32), NODE);
            }
        }
    }

    image
}

/// Render and write a PNG snapshot
pub fn save_snapshot(grid: &Grid, width: u32, height: u32, path: impl AsRef<Path>) -> WaterResult<()> {
    render_snapshot(grid, width, height).save(path)?;
    Ok(())
}

fn draw_line(image: &mut RgbImage, from: Vec2, to: Vec2, color: Rgb<u8>) {
    let steps = from.distance(to).ceil().max(1.0) as usize;
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        put(image, from.lerp(to, t), color);
    }
}

fn put(image: &mut RgbImage, p: Vec2, color: Rgb<u8>) {
    if !p.is_finite() || p.x < 0.0 || p.y < 0.0 {
        return;
    }
    let (x, y) = (p.x as u32, p.y as u32);
    if x < image.width() && y < image.height() {
        image.put_pixel(x, y, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridBuilder;
    use crate::params::GridParams;

    #[test]
    fn test_snapshot_marks_nodes() {
        let grid = GridBuilder::new(GridParams::default())
            .build(112.0, 70.0, 8, 1.0)
            .unwrap();
        let image = render_snapshot(&grid, 112, 70);

        assert_eq!(image.dimensions(), (112, 70));
        let rest = grid.nodes()[0].rest_position();
        assert_eq!(*image.get_pixel(rest.x as u32, rest.y as u32), NODE);
        assert_eq!(*image.get_pixel(0, 0), BACKGROUND);
    }
}
