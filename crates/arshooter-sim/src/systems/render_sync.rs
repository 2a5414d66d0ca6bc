//! Pushes alive target poses to the render backend.

use hecs::World;

use arshooter_core::components::{Alive, Pose, Visual};

use crate::render::RenderBackend;

/// Sync every alive target. Dead targets were hidden when killed and get
/// no writes until they respawn.
pub fn run<B: RenderBackend>(world: &World, backend: &mut B) {
    for (_entity, (alive, pose, visual)) in world.query::<(&Alive, &Pose, &Visual)>().iter() {
        if alive.0 {
            backend.update_visual(visual.handle, pose, true);
        }
    }
}
