//! Text overlay: score, health pips, reticle, fire and restart controls.
//!
//! Purely presentational. State arrives as pushed [`GameEvent`]s; the
//! overlay never reads the engine directly.

use std::fmt::Write;

use arshooter_core::commands::PlayerCommand;
use arshooter_core::events::GameEvent;
use arshooter_core::state::HudView;

use crate::camera::Backdrop;

const WIDTH: usize = 41;

/// The two interactive controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlInput {
    Fire,
    Restart,
}

#[derive(Debug, Clone)]
pub struct Overlay {
    score: u32,
    health: u32,
    max_health: u32,
    game_over: bool,
    final_score: u32,
    backdrop: Backdrop,
}

impl Overlay {
    pub fn new(max_health: u32) -> Self {
        Self {
            score: 0,
            health: max_health,
            max_health,
            game_over: false,
            final_score: 0,
            backdrop: Backdrop::Pending,
        }
    }

    /// Apply one pushed state change.
    pub fn apply(&mut self, event: &GameEvent) {
        match *event {
            GameEvent::ScoreChanged { score } => self.score = score,
            GameEvent::HealthChanged { health } => {
                self.health = health.min(self.max_health);
                // Health only rises again on restart.
                if health > 0 {
                    self.game_over = false;
                }
            }
            GameEvent::GameOver { final_score } => {
                self.game_over = true;
                self.final_score = final_score;
            }
        }
    }

    pub fn set_backdrop(&mut self, backdrop: Backdrop) {
        self.backdrop = backdrop;
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn hud(&self) -> HudView {
        HudView::new(self.score, self.health, self.max_health, self.game_over)
    }

    /// Map a control activation to a command. Controls that are not active
    /// in the current state do nothing.
    pub fn control(&self, input: ControlInput) -> Option<PlayerCommand> {
        let hud = self.hud();
        match input {
            ControlInput::Fire if hud.fire_enabled => Some(PlayerCommand::Fire),
            ControlInput::Restart if hud.restart_visible => Some(PlayerCommand::Restart),
            _ => None,
        }
    }

    /// Render the overlay as a block of text.
    pub fn render(&self) -> String {
        let hud = self.hud();
        let mut out = String::new();

        let pips: String = hud
            .health_pips
            .iter()
            .map(|full| if *full { '#' } else { '-' })
            .collect();
        let score = format!("SCORE {}", hud.score);
        let health = format!("HEALTH [{pips}]");
        let gap = WIDTH.saturating_sub(score.len() + health.len()).max(1);
        let _ = writeln!(out, "{score}{}{health}", " ".repeat(gap));

        match &self.backdrop {
            Backdrop::Live { device } => {
                let _ = writeln!(out, "{}", centered(&format!("(camera: {device})")));
            }
            Backdrop::Pending => {
                let _ = writeln!(out, "{}", centered("(starting camera)"));
            }
            Backdrop::Static { message } => {
                let _ = writeln!(out, "{}", centered(&format!("[ {message} ]")));
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "{}", centered("-+-"));
        let _ = writeln!(out);

        if hud.game_over {
            let _ = writeln!(out, "{}", centered("GAME OVER"));
            let _ = writeln!(out, "{}", centered(&format!("final score {}", self.final_score)));
            let _ = writeln!(out, "{}", centered("[r] restart"));
        } else {
            let _ = writeln!(out, "{}", centered("[f] FIRE"));
        }
        out
    }
}

fn centered(text: &str) -> String {
    let pad = WIDTH.saturating_sub(text.chars().count()) / 2;
    format!("{}{text}", " ".repeat(pad))
}
