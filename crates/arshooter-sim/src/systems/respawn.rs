//! Deferred respawn timers for killed targets.
//!
//! Timers run on the simulation clock, so they pause with the game and are
//! cancelled wholesale on restart and dispose.

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use arshooter_core::config::GameConfig;
use arshooter_core::events::FeedbackEvent;

use crate::registry;

/// A scheduled respawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingRespawn {
    pub entity: Entity,
    pub target_id: u32,
    /// Simulation time (seconds) at which the slot refills.
    pub due_secs: f64,
}

/// Cancellable set of pending respawns.
#[derive(Debug, Default)]
pub struct RespawnQueue {
    pending: Vec<PendingRespawn>,
}

impl RespawnQueue {
    /// Schedule a respawn, replacing any timer already pending for `entity`.
    pub fn schedule(&mut self, entity: Entity, target_id: u32, due_secs: f64) {
        self.pending.retain(|p| p.entity != entity);
        self.pending.push(PendingRespawn {
            entity,
            target_id,
            due_secs,
        });
    }

    /// Drop every pending timer. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return timers due at `now`, earliest first.
    pub fn take_due(&mut self, now: f64) -> Vec<PendingRespawn> {
        let (mut due, waiting): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_secs <= now);
        self.pending = waiting;
        due.sort_by(|a, b| a.due_secs.total_cmp(&b.due_secs));
        due
    }
}

/// Fire every due timer.
pub fn run(
    world: &mut World,
    queue: &mut RespawnQueue,
    rng: &mut ChaCha8Rng,
    config: &GameConfig,
    now: f64,
    feedback: &mut Vec<FeedbackEvent>,
) {
    for due in queue.take_due(now) {
        if registry::respawn_entity(world, due.entity, rng, config) {
            feedback.push(FeedbackEvent::TargetRespawned {
                target_id: due.target_id,
            });
        }
    }
}
