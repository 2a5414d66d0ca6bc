//! Events emitted by the simulation.
//!
//! [`GameEvent`]s are the outbound contract with the host and are delivered
//! through the engine's listener. [`FeedbackEvent`]s are presentation cues
//! (sound, hit markers) carried in the frame snapshot only.

use serde::{Deserialize, Serialize};

/// State changes the host page is notified about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Score changed to `score`.
    ScoreChanged { score: u32 },
    /// Health changed to `health`.
    HealthChanged { health: u32 },
    /// The `Playing -> GameOver` transition. Fires once per game.
    GameOver { final_score: u32 },
}

/// UI feedback cues for the frame in which they happened.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FeedbackEvent {
    /// A fire action resolved.
    ShotFired { hit: bool },
    /// A target was destroyed by a hit.
    TargetKilled { target_id: u32, distance: f32 },
    /// A target reached damage range and hurt the player.
    PlayerDamaged { target_id: u32, health: u32 },
    /// A target reached damage range during the cooldown and was recycled harmlessly.
    DamageDeflected { target_id: u32 },
    /// A killed target's slot refilled after the respawn delay.
    TargetRespawned { target_id: u32 },
}
