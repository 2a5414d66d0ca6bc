//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::TargetShape;
use crate::types::VisualHandle;

/// Marks an entity as a pooled target and carries its stable pool index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub id: u32,
}

/// Polar placement of a target around the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Angle around the vertical axis (radians), 0 = viewer's initial forward.
    pub bearing: f32,
    /// Normalized height factor; world height is `elevation * distance`.
    pub elevation: f32,
    /// Radial distance from the viewer. Never below the damage threshold while alive.
    pub distance: f32,
    /// Per-target phase offset of the drift oscillation.
    pub drift_phase: f32,
}

/// Whether a pooled target is currently in play.
/// Dead targets are hidden and skipped by motion, damage, and hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alive(pub bool);

/// World-space pose derived from `Placement` each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    /// Accumulated spin about the visual's own axis (radians).
    pub spin: f32,
}

/// Renderable attached to a target. The simulation never inspects the
/// handle; it only pushes pose and visibility to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub handle: VisualHandle,
    pub shape: TargetShape,
    pub color: u32,
}
