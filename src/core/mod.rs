//! Spampede simulation engine: board, snake, spam, search and the tick loop.

pub mod board;
pub mod config;
pub mod constants;
pub mod food;
pub mod game;
pub mod logic;
pub mod search;
pub mod snake;
pub mod types;

pub use board::{Board, Cell};
pub use config::{ConfigError, GameConfig};
pub use game::{LayoutError, SpampedeGame};
pub use logic::{GameInput, TickEvent, TickResult};
pub use search::SearchOutcome;
pub use snake::Snake;
pub use types::*;
