//! Lattice layout parameters.

/// Grid construction parameters
#[derive(Debug, Clone)]
pub struct GridParams {
    /// Upper bound on columns before density scaling
    pub column_cap: usize,

    /// Base density multiplier applied on top of the LOD scale
    pub base_density: f32,

    /// Wire upper-left/upper-right diagonals for extra stiffness
    pub advanced: bool,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            column_cap: 40,
            base_density: 1.0,
            advanced: false,
        }
    }
}
