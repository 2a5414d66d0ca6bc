//! Enumeration types used throughout the game.

use serde::{Deserialize, Serialize};

/// Top-level game state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
}

/// Mesh variant of a target visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetShape {
    Sphere,
    Cube,
    Octahedron,
    Torus,
    Cone,
    Icosahedron,
}

impl TargetShape {
    /// Every shape, in pool cycling order.
    pub const ALL: [TargetShape; 6] = [
        TargetShape::Sphere,
        TargetShape::Cube,
        TargetShape::Octahedron,
        TargetShape::Torus,
        TargetShape::Cone,
        TargetShape::Icosahedron,
    ];

    /// Shape for a pool slot. Deterministic so the pool looks varied without
    /// randomness in appearance.
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Radius of the bounding sphere enclosing the mesh, before scaling.
    pub fn bounding_radius(self) -> f32 {
        match self {
            TargetShape::Sphere => 0.6,
            // Half-diagonal of a 0.9 cube.
            TargetShape::Cube => 0.78,
            TargetShape::Octahedron => 0.7,
            // Ring radius plus tube radius.
            TargetShape::Torus => 0.75,
            TargetShape::Cone => 0.72,
            TargetShape::Icosahedron => 0.65,
        }
    }

    /// Base colour (0xRRGGBB) for this shape.
    pub fn color(self) -> u32 {
        match self {
            TargetShape::Sphere => 0xff_44_44,
            TargetShape::Cube => 0xff_aa_00,
            TargetShape::Octahedron => 0xaa_44_ff,
            TargetShape::Torus => 0x00_cc_ff,
            TargetShape::Cone => 0x44_ff_88,
            TargetShape::Icosahedron => 0xff_44_aa,
        }
    }
}
