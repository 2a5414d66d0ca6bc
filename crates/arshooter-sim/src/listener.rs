//! Outbound notifications from the engine to its host.

use arshooter_core::events::GameEvent;

/// Receives the three host callbacks. All methods default to no-ops.
pub trait GameListener {
    fn on_score_change(&mut self, _score: u32) {}
    fn on_health_change(&mut self, _health: u32) {}
    /// Called once per game, at the `Playing -> GameOver` transition.
    fn on_game_over(&mut self) {}
}

/// Listener that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopListener;

impl GameListener for NoopListener {}

/// Closure-based listener for hosts that register callbacks one by one.
#[derive(Default)]
pub struct GameCallbacks {
    score: Option<Box<dyn FnMut(u32)>>,
    health: Option<Box<dyn FnMut(u32)>>,
    game_over: Option<Box<dyn FnMut()>>,
}

impl GameCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_score_change(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.score = Some(Box::new(f));
        self
    }

    pub fn on_health_change(mut self, f: impl FnMut(u32) + 'static) -> Self {
        self.health = Some(Box::new(f));
        self
    }

    pub fn on_game_over(mut self, f: impl FnMut() + 'static) -> Self {
        self.game_over = Some(Box::new(f));
        self
    }
}

impl GameListener for GameCallbacks {
    fn on_score_change(&mut self, score: u32) {
        if let Some(f) = self.score.as_mut() {
            f(score);
        }
    }

    fn on_health_change(&mut self, health: u32) {
        if let Some(f) = self.health.as_mut() {
            f(health);
        }
    }

    fn on_game_over(&mut self) {
        if let Some(f) = self.game_over.as_mut() {
            f();
        }
    }
}

/// Route one event to the matching callback.
pub fn dispatch(listener: &mut dyn GameListener, event: &GameEvent) {
    match *event {
        GameEvent::ScoreChanged { score } => listener.on_score_change(score),
        GameEvent::HealthChanged { health } => listener.on_health_change(health),
        GameEvent::GameOver { .. } => listener.on_game_over(),
    }
}
