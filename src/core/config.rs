//! Game configuration, loaded from `~/.spampede/config.json` by the binary.

use super::constants::*;
use super::types::{Direction, Position, ReversePolicy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunables for one game. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board height in cells, perimeter walls included.
    pub rows: usize,
    /// Board width in cells, perimeter walls included.
    pub cols: usize,
    pub start_length: usize,
    pub start_heading: Direction,
    /// Ticks between movement steps.
    pub movement_cadence: u64,
    /// Ticks between unconditional spam drops. Zero disables the trickle.
    pub refill_cadence: u64,
    /// Wall-clock length of one tick, used by the front-end timer.
    pub tick_interval_ms: u64,
    pub reverse_policy: ReversePolicy,
    /// Interior wall cells.
    pub obstacles: Vec<Position>,
    pub sound: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            start_length: DEFAULT_START_LENGTH,
            start_heading: Direction::East,
            movement_cadence: DEFAULT_MOVEMENT_CADENCE,
            refill_cadence: DEFAULT_REFILL_CADENCE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            reverse_policy: ReversePolicy::Allow,
            obstacles: Vec::new(),
            sound: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("board must be at least {min}x{min} cells, got {rows}x{cols}")]
    BoardTooSmall { rows: usize, cols: usize, min: usize },
    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),
    #[error("a snake of length {length} heading {heading:?} does not fit at {head}")]
    SnakeDoesNotFit {
        length: usize,
        heading: Direction,
        head: Position,
    },
    #[error("obstacle at {0} is outside the board")]
    ObstacleOutOfBounds(Position),
    #[error("obstacle at {0} overlaps the starting snake")]
    ObstacleOnSnake(Position),
}

impl GameConfig {
    /// Where the head starts: the middle of the board.
    pub fn start_head(&self) -> Position {
        Position::new(self.rows / 2, self.cols / 2)
    }

    /// Cells the starting snake occupies, head first.
    pub fn start_body(&self) -> Vec<Position> {
        let back = self.start_heading.opposite();
        std::iter::successors(Some(self.start_head()), |p| p.step(back))
            .take(self.start_length)
            .collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows < MIN_BOARD_SIDE || self.cols < MIN_BOARD_SIDE {
            return Err(ConfigError::BoardTooSmall {
                rows: self.rows,
                cols: self.cols,
                min: MIN_BOARD_SIDE,
            });
        }
        if self.start_length == 0 {
            return Err(ConfigError::ZeroValue("start_length"));
        }
        if self.movement_cadence == 0 {
            return Err(ConfigError::ZeroValue("movement_cadence"));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroValue("tick_interval_ms"));
        }

        let body = self.start_body();
        let interior = |p: &Position| {
            p.row > 0 && p.col > 0 && p.row + 1 < self.rows && p.col + 1 < self.cols
        };
        if body.len() < self.start_length || !body.iter().all(interior) {
            return Err(ConfigError::SnakeDoesNotFit {
                length: self.start_length,
                heading: self.start_heading,
                head: self.start_head(),
            });
        }

        for obstacle in &self.obstacles {
            if obstacle.row >= self.rows || obstacle.col >= self.cols {
                return Err(ConfigError::ObstacleOutOfBounds(*obstacle));
            }
            if body.contains(obstacle) {
                return Err(ConfigError::ObstacleOnSnake(*obstacle));
            }
        }
        Ok(())
    }
}
