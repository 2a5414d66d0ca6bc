//! Game state value object and the snapshots handed to the host each frame.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{GamePhase, TargetShape};
use crate::events::FeedbackEvent;
use crate::types::{Projection, SimTime, Viewer};

/// Score, health, and game-over flag for one running game.
///
/// Fields are private so that `health` stays within `[0, max_health]`
/// and the game-over flag is only ever raised by running out of health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    score: u32,
    health: u32,
    max_health: u32,
    game_over: bool,
}

/// Result of applying one damage event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Health dropped to the contained value and the game continues.
    Wounded(u32),
    /// Health reached zero; the game is now over.
    Killed,
    /// The game was already over; nothing changed.
    Ignored,
}

impl GameState {
    /// Fresh `Playing` state.
    pub fn new(max_health: u32) -> Self {
        Self {
            score: 0,
            health: max_health,
            max_health,
            game_over: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn phase(&self) -> GamePhase {
        if self.game_over {
            GamePhase::GameOver
        } else {
            GamePhase::Playing
        }
    }

    /// Add `points` and return the new score. No-op during game over.
    pub fn award(&mut self, points: u32) -> Option<u32> {
        if self.game_over {
            return None;
        }
        self.score = self.score.saturating_add(points);
        Some(self.score)
    }

    /// Remove one point of health, entering game over at zero.
    pub fn take_damage(&mut self) -> DamageOutcome {
        if self.game_over {
            return DamageOutcome::Ignored;
        }
        self.health = self.health.saturating_sub(1);
        if self.health == 0 {
            self.game_over = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded(self.health)
        }
    }

    /// Back to the initial `Playing` state.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_health);
    }
}

/// Complete game state broadcast to the host after each frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub score: u32,
    pub health: u32,
    pub max_health: u32,
    pub viewer: Viewer,
    pub projection: Projection,
    pub targets: Vec<TargetView>,
    pub feedback: Vec<FeedbackEvent>,
}

impl GameStateSnapshot {
    /// Overlay view of this snapshot.
    pub fn hud(&self) -> HudView {
        HudView::new(
            self.score,
            self.health,
            self.max_health,
            self.phase == GamePhase::GameOver,
        )
    }
}

/// A pooled target as seen by the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetView {
    pub id: u32,
    pub alive: bool,
    pub shape: TargetShape,
    pub position: Vec3,
    pub bearing: f32,
    pub distance: f32,
}

/// What the overlay draws. Purely derived from pushed state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudView {
    pub score: u32,
    /// One entry per health point; `pips[i]` is full iff `i < health`.
    pub health_pips: Vec<bool>,
    pub game_over: bool,
    pub fire_enabled: bool,
    pub restart_visible: bool,
}

impl HudView {
    pub fn new(score: u32, health: u32, max_health: u32, game_over: bool) -> Self {
        Self {
            score,
            health_pips: (0..max_health).map(|i| i < health).collect(),
            game_over,
            fire_enabled: !game_over,
            restart_visible: game_over,
        }
    }

    /// Number of full pips.
    pub fn health(&self) -> u32 {
        self.health_pips.iter().filter(|full| **full).count() as u32
    }
}
