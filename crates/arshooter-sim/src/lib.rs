//! Simulation engine for the AR shooter.
//!
//! Owns the hecs ECS world, advances it once per displayed frame, resolves
//! fire actions with ray hit tests, and produces `GameStateSnapshot`s for the
//! host. Runs without any graphics context.

pub mod engine;
pub mod listener;
pub mod motion;
pub mod registry;
pub mod render;
pub mod systems;

pub use arshooter_core as core;
pub use engine::{GameEngine, SimConfig};
pub use listener::{GameCallbacks, GameListener};
pub use render::{HeadlessBackend, RenderBackend};

#[cfg(test)]
mod tests;
