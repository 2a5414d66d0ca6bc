//! Game loop thread: drives the engine at the display frame rate.
//!
//! The engine is created inside this thread and never leaves it, so the
//! simulation stays single-threaded. Commands arrive over `mpsc`; callbacks
//! go back to the host as [`GameEvent`]s and the latest snapshot is stored in
//! shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::{debug, error, info};

use arshooter_core::constants::FRAME_RATE;
use arshooter_core::events::GameEvent;
use arshooter_core::state::GameStateSnapshot;
use arshooter_sim::engine::{GameEngine, SimConfig};
use arshooter_sim::listener::GameListener;
use arshooter_sim::render::HeadlessBackend;

use crate::state::GameLoopCommand;

/// Nominal duration of one displayed frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// Forwards engine callbacks to the host as events.
pub struct ChannelListener {
    tx: mpsc::Sender<GameEvent>,
    score: u32,
}

impl ChannelListener {
    pub fn new(tx: mpsc::Sender<GameEvent>) -> Self {
        Self { tx, score: 0 }
    }

    fn send(&self, event: GameEvent) {
        // The host may already have gone away during shutdown.
        if self.tx.send(event).is_err() {
            debug!("dropping {event:?}: host channel closed");
        }
    }
}

impl GameListener for ChannelListener {
    fn on_score_change(&mut self, score: u32) {
        self.score = score;
        self.send(GameEvent::ScoreChanged { score });
    }

    fn on_health_change(&mut self, health: u32) {
        self.send(GameEvent::HealthChanged { health });
    }

    fn on_game_over(&mut self) {
        self.send(GameEvent::GameOver {
            final_score: self.score,
        });
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    events: mpsc::Sender<GameEvent>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("arshooter-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot, events);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown or channel disconnect, then disposes
/// the engine.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
    events: mpsc::Sender<GameEvent>,
) {
    let mut engine = match GameEngine::new(
        config,
        HeadlessBackend::new(),
        Box::new(ChannelListener::new(events)),
    ) {
        Ok(engine) => engine,
        Err(err) => {
            error!("game loop not started: {err}");
            return;
        }
    };
    let mut last_frame = Instant::now();
    let mut next_frame_time = last_frame;

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Player(cmd)) => engine.handle_command(cmd),
                Ok(GameLoopCommand::Resize { width, height }) => engine.resize(width, height),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    engine.dispose();
                    info!("game loop stopped after {} frames", engine.time().frame);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one frame by the measured wall-clock delta
        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f64();
        last_frame = now;
        let snapshot = engine.tick(dt);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next frame
        next_frame_time += FRAME_DURATION;
        let now = Instant::now();
        if next_frame_time > now {
            std::thread::sleep(next_frame_time - now);
        } else if now - next_frame_time > FRAME_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_frame_time = now;
        }
    }
}
