//! Fundamental geometric and simulation types.
//!
//! Scene axes follow the usual right-handed camera convention:
//! x = right, y = up, -z = the viewer's initial forward direction.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{FAR_PLANE, MAX_PITCH, NEAR_PLANE};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of simulated frames.
    pub frame: u64,
    /// Accumulated (clamped) simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one frame of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.frame += 1;
        self.elapsed_secs += dt;
    }
}

/// Opaque handle to a renderable owned by the render backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VisualHandle(pub u64);

/// A half-line used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing `direction`. Returns `None` for a zero direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Point at ray parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Smallest non-negative ray parameter at which the ray enters the sphere,
    /// or `None` if it misses. An origin inside the sphere yields the exit point.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_origin = self.origin - center;
        let b = to_origin.dot(self.direction);
        let c = to_origin.length_squared() - radius * radius;
        let discriminant = b * b - c;
        if discriminant < 0.0 {
            return None;
        }

        let root = discriminant.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else if far >= 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// The player's point of view. Aiming is done by turning the viewer;
/// the reticle always points along [`Viewer::forward`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Viewer {
    pub position: Vec3,
    /// Rotation about the vertical axis (radians). 0 looks down -z,
    /// positive turns toward +x. Matches target bearing.
    pub yaw: f32,
    /// Rotation above the horizon (radians), clamped to ±[`MAX_PITCH`].
    pub pitch: f32,
}

impl Viewer {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Set the orientation, wrapping yaw and clamping pitch.
    pub fn set_orientation(&mut self, yaw: f32, pitch: f32) {
        if yaw.is_finite() {
            self.yaw = yaw.rem_euclid(std::f32::consts::TAU);
        }
        if pitch.is_finite() {
            self.pitch = pitch.clamp(-MAX_PITCH, MAX_PITCH);
        }
    }

    /// Turn to face `point`. No-op if `point` is the viewer position.
    pub fn look_at(&mut self, point: Vec3) {
        let delta = point - self.position;
        let horizontal = (delta.x * delta.x + delta.z * delta.z).sqrt();
        if horizontal == 0.0 && delta.y == 0.0 {
            return;
        }
        let yaw = delta.x.atan2(-delta.z);
        let pitch = delta.y.atan2(horizontal);
        self.set_orientation(yaw, pitch);
    }

    /// Unit vector the reticle points along.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// The fire ray: from the eye along the forward axis.
    pub fn aim_ray(&self) -> Ray {
        Ray {
            origin: self.position,
            direction: self.forward(),
        }
    }
}

/// Perspective projection parameters, recomputed on viewport resize.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub fov_deg: f32,
    /// Width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    /// Projection for a viewport. A zero height falls back to a square aspect.
    pub fn for_viewport(width: u32, height: u32, fov_deg: f32) -> Self {
        let aspect = if height == 0 {
            1.0
        } else {
            width as f32 / height as f32
        };
        Self {
            fov_deg,
            aspect,
            near: NEAR_PLANE,
            far: FAR_PLANE,
        }
    }

    /// Horizontal field of view in degrees, derived from the vertical one.
    pub fn horizontal_fov_deg(&self) -> f32 {
        let half_v = (self.fov_deg.to_radians() * 0.5).tan();
        (2.0 * (half_v * self.aspect).atan()).to_degrees()
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::for_viewport(1, 1, crate::constants::FIELD_OF_VIEW_DEG)
    }
}
