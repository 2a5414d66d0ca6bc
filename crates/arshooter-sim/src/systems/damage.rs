//! Damage-range detection.
//!
//! Finds alive targets that have reached the damage threshold. Cooldown,
//! health, and respawn are applied by the engine, in pool order.

use hecs::{Entity, World};

use arshooter_core::components::{Alive, Placement, Target};

use crate::registry::TargetRegistry;

/// An alive target sitting at the damage threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breach {
    pub entity: Entity,
    pub target_id: u32,
}

/// Collect breaching targets in pool order.
pub fn collect_breaches(
    world: &World,
    registry: &TargetRegistry,
    min_distance: f32,
) -> Vec<Breach> {
    registry
        .entities()
        .iter()
        .filter_map(|&entity| {
            let mut query = world
                .query_one::<(&Target, &Alive, &Placement)>(entity)
                .ok()?;
            let (target, alive, placement) = query.get()?;
            (alive.0 && placement.distance <= min_distance).then_some(Breach {
                entity,
                target_id: target.id,
            })
        })
        .collect()
}
