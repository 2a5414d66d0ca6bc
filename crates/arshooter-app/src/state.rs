//! Application state shared between the host thread and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use arshooter_core::commands::PlayerCommand;
use arshooter_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the engine.
    Player(PlayerCommand),
    /// The viewport changed size.
    Resize { width: u32, height: u32 },
    /// Dispose the engine and end the thread.
    Shutdown,
}

/// Shared application state.
///
/// - `mpsc::Sender` sits behind a `Mutex` so the state stays `Sync`
/// - `Option`s are `None` until a game is started
/// - the latest snapshot is shared with the game loop thread
#[derive(Default)]
pub struct AppState {
    /// Channel to the game loop. `None` before `start_game`.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous status queries.
    /// Updated by the game loop thread after each frame.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
    /// Game loop thread, joined on stop.
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
    /// Whether the game loop is currently running.
    pub running: Mutex<bool>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
