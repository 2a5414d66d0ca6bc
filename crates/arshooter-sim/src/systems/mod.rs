//! ECS systems that operate on the simulation world each frame.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! They never touch score or health; the engine applies those.

pub mod damage;
pub mod motion;
pub mod render_sync;
pub mod respawn;
pub mod snapshot;
