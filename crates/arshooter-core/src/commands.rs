//! Player commands sent from the overlay/host to the engine.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Fire along the reticle. Ignored during game over.
    Fire,
    /// Start a new game. Only honoured during game over.
    Restart,
    /// Turn the viewer (device orientation), radians.
    Aim { yaw: f32, pitch: f32 },
}
