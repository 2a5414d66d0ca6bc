//! Per-frame target motion: fixed approach step, spin, and pose update.

use std::f32::consts::TAU;

use glam::Vec3;
use hecs::World;

use arshooter_core::components::{Alive, Placement, Pose};
use arshooter_core::config::GameConfig;

use crate::motion::{approach, world_position, DriftParams};

/// Move every alive target one approach step closer and advance its spin.
///
/// The step is a fixed per-frame decrement; frame delta only reaches motion
/// through the drift phase. Distance is floored at the damage threshold.
pub fn advance(world: &mut World, config: &GameConfig) {
    for (_entity, (placement, alive, pose)) in
        world.query_mut::<(&mut Placement, &Alive, &mut Pose)>()
    {
        if !alive.0 {
            continue;
        }
        placement.distance = approach(
            placement.distance,
            config.approach_speed,
            config.min_distance,
        );
        pose.spin = (pose.spin + config.spin_per_frame).rem_euclid(TAU);
    }
}

/// Recompute world positions of alive targets at simulation time `t`.
pub fn update_poses(world: &mut World, config: &GameConfig, origin: Vec3, t: f64) {
    let params = DriftParams::from_config(config);
    for (_entity, (placement, alive, pose)) in world.query_mut::<(&Placement, &Alive, &mut Pose)>()
    {
        if !alive.0 {
            continue;
        }
        pose.position = world_position(placement, &params, origin, t);
    }
}
