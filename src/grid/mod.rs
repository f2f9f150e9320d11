//! Point-mass lattice: node arena, neighbor graph and construction.

mod builder;
mod lattice;

// Re-export public types
pub use builder::GridBuilder;
pub use lattice::Grid;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// One point mass of the lattice
#[derive(Debug, Clone, PartialEq)]
pub struct GridNode {
    /// Current location (pixels), mutated every micro-update
    pub position: Vec2,
    /// Undisplaced anchor, fixed at build time
    rest_position: Vec2,
    pub velocity: Vec2,
    /// Indices into the owning grid's node arena
    neighbors: Vec<usize>,
}

impl GridNode {
    fn at_rest(rest_position: Vec2) -> Self {
        Self {
            position: rest_position,
            rest_position,
            velocity: Vec2::ZERO,
            neighbors: Vec::new(),
        }
    }

    pub fn rest_position(&self) -> Vec2 {
        self.rest_position
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    /// Offset from the rest position
    pub fn displacement(&self) -> Vec2 {
        self.position - self.rest_position
    }

    /// Snap back to the rest state
    pub fn reset(&mut self) {
        self.position = self.rest_position;
        self.velocity = Vec2::ZERO;
    }
}

/// Vertex data handed to renderers (current + rest position)
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SurfaceVertex {
    pub position: [f32; 2],
    pub rest_position: [f32; 2],
}

impl From<&GridNode> for SurfaceVertex {
    fn from(node: &GridNode) -> Self {
        Self {
            position: node.position.to_array(),
            rest_position: node.rest_position.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_reset_restores_rest_state() {
        let mut node = GridNode::at_rest(Vec2::new(3.0, 4.0));
        node.position += Vec2::new(2.0, -1.0);
        node.velocity = Vec2::new(10.0, 0.0);
        assert_eq!(node.displacement(), Vec2::new(2.0, -1.0));

        node.reset();
        assert_eq!(node.position, node.rest_position());
        assert_eq!(node.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_surface_vertex_is_pod() {
        let vertices = [SurfaceVertex::default(); 4];
        let bytes: &[u8] = bytemuck::cast_slice(&vertices);
        assert_eq!(bytes.len(), 4 * 4 * std::mem::size_of::<f32>());
    }
}
