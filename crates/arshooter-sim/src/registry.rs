//! Target pool: spawn factories and respawn geometry.
//!
//! The pool is allocated once. Targets are never despawned while the game
//! runs; a kill or a damage event only flips `Alive` and rewrites `Placement`.

use std::f32::consts::TAU;

use hecs::{Entity, World};
use log::warn;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arshooter_core::components::{Alive, Placement, Pose, Target, Visual};
use arshooter_core::config::GameConfig;
use arshooter_core::enums::TargetShape;

use crate::render::RenderBackend;

/// Fixed-size pool of target entities, indexed by target id.
#[derive(Debug, Default)]
pub struct TargetRegistry {
    entities: Vec<Entity>,
}

impl TargetRegistry {
    /// Spawn `config.pool_size` targets and their visuals.
    pub fn populate<B: RenderBackend>(
        world: &mut World,
        backend: &mut B,
        rng: &mut ChaCha8Rng,
        config: &GameConfig,
    ) -> Self {
        let entities = (0..config.pool_size)
            .map(|index| spawn(world, backend, rng, config, index))
            .collect();
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity(&self, index: usize) -> Option<Entity> {
        self.entities.get(index).copied()
    }

    /// Entities in pool order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Respawn the target in slot `index`. Out-of-range indices are ignored.
    pub fn respawn(
        &self,
        world: &mut World,
        index: usize,
        rng: &mut ChaCha8Rng,
        config: &GameConfig,
    ) -> bool {
        match self.entity(index) {
            Some(entity) => respawn_entity(world, entity, rng, config),
            None => {
                warn!("respawn requested for pool slot {index} (pool size {})", self.len());
                false
            }
        }
    }

    /// Give every target a fresh initial-spawn configuration (used on restart).
    pub fn reseed_all(&self, world: &mut World, rng: &mut ChaCha8Rng, config: &GameConfig) {
        for &entity in &self.entities {
            if let Ok(mut placement) = world.get::<&mut Placement>(entity) {
                *placement = spawn_placement(rng, config);
            }
            if let Ok(mut alive) = world.get::<&mut Alive>(entity) {
                alive.0 = true;
            }
            if let Ok(mut pose) = world.get::<&mut Pose>(entity) {
                pose.spin = 0.0;
            }
        }
    }

    /// Release every visual and empty the pool.
    pub fn release_visuals<B: RenderBackend>(&mut self, world: &mut World, backend: &mut B) {
        for entity in self.entities.drain(..) {
            if let Ok(visual) = world.get::<&Visual>(entity) {
                backend.release_visual(visual.handle);
            }
            let _ = world.despawn(entity);
        }
    }
}

/// Spawn one target for pool slot `index`. Shape and colour cycle by index.
pub fn spawn<B: RenderBackend>(
    world: &mut World,
    backend: &mut B,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    index: usize,
) -> Entity {
    let shape = TargetShape::for_index(index);
    let color = shape.color();
    let handle = backend.create_visual(shape, color);

    world.spawn((
        Target { id: index as u32 },
        spawn_placement(rng, config),
        Alive(true),
        Pose::default(),
        Visual {
            handle,
            shape,
            color,
        },
    ))
}

/// Initial placement: random bearing and elevation, distance anywhere in
/// `[spawn_radius * spawn_near_factor, spawn_radius]`.
pub fn spawn_placement(rng: &mut ChaCha8Rng, config: &GameConfig) -> Placement {
    Placement {
        bearing: rng.gen_range(0.0..TAU),
        elevation: rng.gen_range(config.elevation_min..=config.elevation_max),
        distance: rng.gen_range(config.spawn_near_radius()..=config.spawn_radius),
        drift_phase: rng.gen_range(0.0..TAU),
    }
}

/// Respawn placement: fresh random angles, full spawn radius.
pub fn respawn_placement(rng: &mut ChaCha8Rng, config: &GameConfig) -> Placement {
    Placement {
        bearing: rng.gen_range(0.0..TAU),
        elevation: rng.gen_range(config.elevation_min..=config.elevation_max),
        distance: config.spawn_radius,
        drift_phase: rng.gen_range(0.0..TAU),
    }
}

/// Reset a target's placement and bring it back to life.
/// Touches only that target's own components.
pub fn respawn_entity(
    world: &mut World,
    entity: Entity,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
) -> bool {
    let Ok(mut placement) = world.get::<&mut Placement>(entity) else {
        return false;
    };
    *placement = respawn_placement(rng, config);
    drop(placement);

    if let Ok(mut alive) = world.get::<&mut Alive>(entity) {
        alive.0 = true;
    }
    true
}
