//! Lattice construction from canvas size, bar layout and density.

use glam::Vec2;
use log::debug;

use super::{Grid, GridNode};
use crate::params::GridParams;

const MIN_COLUMNS: usize = 3;
const MIN_ROWS: usize = 2;
/// Rows per column on very tall canvases; the rest of the height stays empty
const MAX_ROWS_PER_COLUMN: usize = 8;

/// Builds grids; a pure function of its inputs
#[derive(Debug, Clone)]
pub struct GridBuilder {
    params: GridParams,
}

impl GridBuilder {
    pub fn new(params: GridParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &GridParams {
        &self.params
    }

    /// Column count for a requested column count and density
    pub fn columns_for(&self, requested_columns: usize, density: f32) -> usize {
        let capped = requested_columns.min(self.params.column_cap) as f32;
        ((capped * density).round() as usize).max(MIN_COLUMNS)
    }

    /// Build a lattice at rest filling the canvas
    ///
    /// Returns `None` for a zero-sized or non-finite canvas.
    ///
    /// # Arguments
    /// * `width`, `height` - Canvas size in pixels
    /// * `requested_columns` - Desired columns before cap and density (usually the bar count)
    /// * `density` - Multiplier applied to the capped column count
    pub fn build(
        &self,
        width: f32,
        height: f32,
        requested_columns: usize,
        density: f32,
    ) -> Option<Grid> {
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let density = if density.is_finite() && density > 0.0 {
            density
        } else {
            1.0
        };

        let columns = self.columns_for(requested_columns, density);
        let rows = ((columns as f32 * height / width).round() as usize)
            .clamp(MIN_ROWS, columns * MAX_ROWS_PER_COLUMN);
        let spacing = width / columns as f32;

        // Center the lattice, splitting leftover space evenly on both sides
        let origin = Vec2::new(
            (width - (columns - 1) as f32 * spacing) / 2.0,
            (height - (rows - 1) as f32 * spacing) / 2.0,
        );

        let mut nodes = Vec::with_capacity(columns * rows);
        for y in 0..rows {
            for x in 0..columns {
                let rest = origin + Vec2::new(x as f32, y as f32) * spacing;
                nodes.push(GridNode::at_rest(rest));
            }
        }

        for y in 0..rows {
            for x in 0..columns {
                let i = y * columns + x;
                let neighbors = &mut nodes[i].neighbors;
                if x > 0 {
                    neighbors.push(i - 1);
                }
                if y > 0 {
                    neighbors.push(i - columns);
                }
                if x + 1 < columns {
                    neighbors.push(i + 1);
                }
                if y + 1 < rows {
                    neighbors.push(i + columns);
                }
                if self.params.advanced && y > 0 {
                    if x > 0 {
                        neighbors.push(i - columns - 1);
                    }
                    if x + 1 < columns {
                        neighbors.push(i - columns + 1);
                    }
                }
            }
        }

        debug!(
            "Built {}x{} grid (spacing {:.2}px, density {:.2}, advanced {})",
            columns, rows, spacing, density, self.params.advanced
        );

        Some(Grid {
            columns,
            rows,
            spacing,
            origin,
            advanced: self.params.advanced,
            nodes,
        })
    }
}
