//! Snapshot system: reads the ECS world and builds a `GameStateSnapshot`.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use arshooter_core::components::{Alive, Placement, Pose, Target, Visual};
use arshooter_core::events::FeedbackEvent;
use arshooter_core::state::{GameState, GameStateSnapshot, TargetView};
use arshooter_core::types::{Projection, SimTime, Viewer};

/// Build a complete snapshot of the current frame.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    state: &GameState,
    viewer: &Viewer,
    projection: &Projection,
    feedback: &[FeedbackEvent],
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase: state.phase(),
        score: state.score(),
        health: state.health(),
        max_health: state.max_health(),
        viewer: *viewer,
        projection: *projection,
        targets: build_targets(world),
        feedback: feedback.to_vec(),
    }
}

/// Target views ordered by pool id.
fn build_targets(world: &World) -> Vec<TargetView> {
    let mut targets: Vec<TargetView> = world
        .query::<(&Target, &Alive, &Placement, &Pose, &Visual)>()
        .iter()
        .map(|(_, (target, alive, placement, pose, visual))| TargetView {
            id: target.id,
            alive: alive.0,
            shape: visual.shape,
            position: pose.position,
            bearing: placement.bearing,
            distance: placement.distance,
        })
        .collect();
    targets.sort_by_key(|t| t.id);
    targets
}
