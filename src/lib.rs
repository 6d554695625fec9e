//! Spampede - a grid snake that eats spam, steered by hand or by BFS.
//!
//! This module exposes the engine for testing and for the terminal front-end.

pub mod audio;
pub mod core;
pub mod utils;

pub use crate::core::{ControlMode, Direction, GameConfig, GameInput, SpampedeGame, TickResult};
