//! Core types and definitions for the AR shooter.
//!
//! This crate defines the vocabulary shared across all other crates:
//! tuning constants, configuration, components, commands, state snapshots,
//! events, and view geometry. It has no dependency on any runtime or
//! rendering framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod state;
pub mod types;
