//! Grid arena: layout metadata plus the owned node array.

use glam::Vec2;

use super::{GridNode, SurfaceVertex};

/// Lattice of point masses, rebuilt wholesale whenever its layout changes
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    pub(super) columns: usize,
    pub(super) rows: usize,
    pub(super) spacing: f32,
    pub(super) origin: Vec2,
    pub(super) advanced: bool,
    pub(super) nodes: Vec<GridNode>,
}

impl Grid {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Distance between adjacent rest positions (pixels)
    pub fn spacing(&self) -> f32 {
        self.spacing
    }

    /// Rest position of node (0, 0)
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Whether diagonal coupling was wired
    pub fn is_advanced(&self) -> bool {
        self.advanced
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[GridNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [GridNode] {
        &mut self.nodes
    }

    /// Linear index of grid coordinate (x, y), row-major
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.columns + x
    }

    /// Grid coordinate (column, row) of a linear index
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.columns, index / self.columns)
    }

    /// Largest distance of any node from its rest position
    pub fn max_displacement(&self) -> f32 {
        self.nodes
            .iter()
            .map(|node| node.displacement().length())
            .fold(0.0, f32::max)
    }

    /// Return every node to rest with zero velocity
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.reset();
        }
    }

    /// Each neighbor connection exactly once, as (lower, higher) index pairs
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.nodes.iter().enumerate().flat_map(move |(i, node)| {
            node.neighbors().iter().filter_map(move |&j| {
                let pair = (i.min(j), i.max(j));
                // Orthogonal links are wired both ways; report them from the lower index.
                // Diagonals are one-way and always point at the row above.
                if i < j || !self.nodes[j].neighbors().contains(&i) {
                    Some(pair)
                } else {
                    None
                }
            })
        })
    }

    /// Vertex snapshot for upload to a renderer
    pub fn vertices(&self) -> Vec<SurfaceVertex> {
        self.nodes.iter().map(SurfaceVertex::from).collect()
    }

    /// Refill an existing vertex buffer without reallocating in steady state
    pub fn write_vertices(&self, out: &mut Vec<SurfaceVertex>) {
        out.clear();
        out.extend(self.nodes.iter().map(SurfaceVertex::from));
    }
}
