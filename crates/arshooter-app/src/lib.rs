//! AR shooter host application.
//!
//! Wires the headless engine to a frame-driver thread, the camera backdrop,
//! and the text overlay, and exposes the session calls the binary uses.

pub mod camera;
pub mod cli;
pub mod config;
pub mod game_loop;
pub mod input;
pub mod logging;
pub mod overlay;
pub mod session;
pub mod state;

pub use arshooter_core as core;
