//! Host-facing session calls.
//!
//! These bridge host requests (keyboard, page controls) to the game loop
//! thread via the command channel.

use std::io;
use std::sync::mpsc;

use log::info;
use thiserror::Error;

use arshooter_core::commands::PlayerCommand;
use arshooter_core::config::ConfigError;
use arshooter_core::events::GameEvent;
use arshooter_core::state::GameStateSnapshot;
use arshooter_sim::engine::SimConfig;

use crate::game_loop;
use crate::state::{AppState, GameLoopCommand};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("game already running")]
    AlreadyRunning,
    #[error("game not started")]
    NotStarted,
    #[error("game loop is no longer receiving commands")]
    Disconnected,
    #[error("shared state lock poisoned")]
    Poisoned,
    #[error("failed to spawn game loop: {0}")]
    Spawn(#[from] io::Error),
    #[error("game loop thread panicked")]
    Panicked,
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Start a game. Spawns the game loop thread if not already running.
pub fn start_game(
    state: &AppState,
    config: SimConfig,
    events: mpsc::Sender<GameEvent>,
) -> Result<(), SessionError> {
    let mut running = state.running.lock().map_err(|_| SessionError::Poisoned)?;
    if *running {
        return Err(SessionError::AlreadyRunning);
    }
    config.game.validate()?;

    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(config, state.latest_snapshot.clone(), events)?;

    *state.command_tx.lock().map_err(|_| SessionError::Poisoned)? = Some(cmd_tx);
    *state.loop_handle.lock().map_err(|_| SessionError::Poisoned)? = Some(handle);
    *running = true;
    Ok(())
}

/// Send a player command to the engine.
pub fn send_command(state: &AppState, command: PlayerCommand) -> Result<(), SessionError> {
    send(state, GameLoopCommand::Player(command))
}

/// Report a new viewport size.
pub fn resize(state: &AppState, width: u32, height: u32) -> Result<(), SessionError> {
    send(state, GameLoopCommand::Resize { width, height })
}

/// Latest snapshot, if the loop has produced one.
pub fn get_snapshot(state: &AppState) -> Result<Option<GameStateSnapshot>, SessionError> {
    let lock = state
        .latest_snapshot
        .lock()
        .map_err(|_| SessionError::Poisoned)?;
    Ok(lock.clone())
}

/// Stop the game: the engine is disposed and the loop thread joined.
/// Stopping a session that is not running is a no-op.
pub fn stop_game(state: &AppState) -> Result<(), SessionError> {
    let mut running = state.running.lock().map_err(|_| SessionError::Poisoned)?;
    if !*running {
        return Ok(());
    }
    *running = false;

    if let Some(tx) = state
        .command_tx
        .lock()
        .map_err(|_| SessionError::Poisoned)?
        .take()
    {
        // A disconnected loop has already shut itself down.
        let _ = tx.send(GameLoopCommand::Shutdown);
    }
    let handle = state
        .loop_handle
        .lock()
        .map_err(|_| SessionError::Poisoned)?
        .take();
    if let Some(handle) = handle {
        handle.join().map_err(|_| SessionError::Panicked)?;
    }
    info!("session stopped");
    Ok(())
}

fn send(state: &AppState, command: GameLoopCommand) -> Result<(), SessionError> {
    let tx_lock = state.command_tx.lock().map_err(|_| SessionError::Poisoned)?;
    match tx_lock.as_ref() {
        Some(tx) => tx.send(command).map_err(|_| SessionError::Disconnected),
        None => Err(SessionError::NotStarted),
    }
}
