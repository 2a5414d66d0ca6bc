//! Target motion model.
//!
//! Pure functions that turn a polar `Placement` plus the simulation clock into
//! a world position. No ECS dependency; systems call into these.

use glam::Vec3;

use arshooter_core::components::Placement;
use arshooter_core::config::GameConfig;

/// Parameters of the secondary sinusoidal motion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftParams {
    /// Angular speed of the oscillation (rad/s).
    pub speed: f32,
    /// Lateral amplitude as a fraction of distance.
    pub amplitude: f32,
    /// Vertical amplitude relative to `amplitude`.
    pub bob_ratio: f32,
}

impl DriftParams {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            speed: config.drift_speed,
            amplitude: config.drift_amplitude,
            bob_ratio: config.bob_ratio,
        }
    }
}

/// One fixed approach step. The result never drops below `floor`.
pub fn approach(distance: f32, speed: f32, floor: f32) -> f32 {
    (distance - speed).max(floor)
}

/// Horizontal unit vector from the viewer toward `bearing`.
pub fn radial_direction(bearing: f32) -> Vec3 {
    let (sin, cos) = bearing.sin_cos();
    Vec3::new(sin, 0.0, -cos)
}

/// Horizontal unit vector perpendicular to the radial direction.
pub fn lateral_direction(bearing: f32) -> Vec3 {
    let (sin, cos) = bearing.sin_cos();
    Vec3::new(cos, 0.0, sin)
}

/// Lateral and vertical drift offsets at time `t` (seconds).
pub fn drift_offsets(placement: &Placement, params: &DriftParams, t: f64) -> (f32, f32) {
    let phase = (t * params.speed as f64 + placement.drift_phase as f64) as f32;
    let reach = params.amplitude * placement.distance;
    let lateral = phase.sin() * reach;
    let vertical = phase.cos() * reach * params.bob_ratio;
    (lateral, vertical)
}

/// World position of a target relative to `origin` (the viewer's eye).
pub fn world_position(placement: &Placement, params: &DriftParams, origin: Vec3, t: f64) -> Vec3 {
    let (lateral, vertical) = drift_offsets(placement, params, t);
    let height = placement.elevation * placement.distance + vertical;

    origin
        + radial_direction(placement.bearing) * placement.distance
        + lateral_direction(placement.bearing) * lateral
        + Vec3::Y * height
}
