//! Spampede game state: board, snake, control mode and phase.

use super::board::Board;
use super::config::{ConfigError, GameConfig};
use super::snake::Snake;
use super::types::{CellKind, ControlMode, Direction, GamePhase, Position};
use std::fmt;
use thiserror::Error;
use tracing::info;

/// One running (or finished) game. Owns its board exclusively; the snake
/// refers to board cells by position.
#[derive(Debug, Clone)]
pub struct SpampedeGame {
    pub(crate) config: GameConfig,
    pub(crate) board: Board,
    pub(crate) snake: Snake,
    pub(crate) mode: ControlMode,
    pub(crate) phase: GamePhase,
    /// Ticks completed since the game started.
    pub(crate) tick_count: u64,
    /// Snapshot restored by `new_game`.
    start: (Board, Snake),
}

/// Problems reading an ASCII board layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("layout has no rows")]
    Empty,
    #[error("row {row} is {len} cells wide, expected {expected}")]
    RaggedRow { row: usize, len: usize, expected: usize },
    #[error("unknown symbol {symbol:?} at {at}")]
    UnknownSymbol { symbol: char, at: Position },
    #[error("boundary cell {0} must be a wall")]
    OpenBoundary(Position),
    #[error("layout has no snake head")]
    MissingHead,
    #[error("layout has more than one snake head")]
    MultipleHeads,
    /// A segment touches two unclaimed body cells, so the order is unknown.
    /// Coiled snakes where a segment touches a non-consecutive one (such as
    /// `Ho` over `oo`) hit this too; the `o` notation cannot describe them.
    #[error("body at {0} has more than one way to continue")]
    AmbiguousBody(Position),
    #[error("body cell {0} is not connected to the head")]
    DisconnectedBody(Position),
}

impl SpampedeGame {
    /// Create a game from a validated config, ready to tick.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut board = Board::with_obstacles(config.rows, config.cols, &config.obstacles);
        let snake = Snake::spawn(
            &mut board,
            config.start_head(),
            config.start_length,
            config.start_heading,
        );
        Ok(Self::from_parts(config, board, snake))
    }

    fn from_parts(config: GameConfig, board: Board, snake: Snake) -> Self {
        Self {
            config,
            start: (board.clone(), snake.clone()),
            board,
            snake,
            mode: ControlMode::Manual,
            phase: GamePhase::Running,
            tick_count: 0,
        }
    }

    /// Build a game from a text layout, one string per board row:
    /// `#` wall, `.` or space open, `$` spam, `H` snake head, `o` snake body.
    ///
    /// The body order is found by walking from the head through adjacent body
    /// cells, so each segment may touch at most one unclaimed body cell.
    /// Tightly coiled bodies are rejected with [`LayoutError::AmbiguousBody`]. The
    /// heading points from the second segment to the head; a lone head uses
    /// `config.start_heading`. Board size in `config` is replaced by the
    /// layout's size.
    pub fn from_layout(layout: &[&str], mut config: GameConfig) -> Result<Self, LayoutError> {
        let expected = layout.first().ok_or(LayoutError::Empty)?.chars().count();
        config.rows = layout.len();
        config.cols = expected;
        config.obstacles.clear();

        let mut board = Board::new(config.rows, config.cols);
        let mut head = None;
        let mut body_cells = Vec::new();

        for (row, line) in layout.iter().enumerate() {
            let len = line.chars().count();
            if len != expected {
                return Err(LayoutError::RaggedRow { row, len, expected });
            }
            for (col, symbol) in line.chars().enumerate() {
                let at = Position::new(row, col);
                let kind = match symbol {
                    '#' => CellKind::Wall,
                    '.' | ' ' => CellKind::Open,
                    '$' => CellKind::Spam,
                    'H' => {
                        if head.replace(at).is_some() {
                            return Err(LayoutError::MultipleHeads);
                        }
                        CellKind::Body
                    }
                    'o' => {
                        body_cells.push(at);
                        CellKind::Body
                    }
                    _ => return Err(LayoutError::UnknownSymbol { symbol, at }),
                };
                if board.is_boundary(at) {
                    if kind != CellKind::Wall {
                        return Err(LayoutError::OpenBoundary(at));
                    }
                    continue;
                }
                if kind == CellKind::Wall {
                    config.obstacles.push(at);
                }
                if kind != CellKind::Body {
                    board.set_kind(at, kind);
                }
            }
        }

        let head = head.ok_or(LayoutError::MissingHead)?;
        let mut body = vec![head];
        loop {
            let last = body[body.len() - 1];
            let mut next = body_cells.iter().filter(|p| p.is_adjacent(last));
            let Some(&segment) = next.next() else {
                break;
            };
            if next.next().is_some() {
                return Err(LayoutError::AmbiguousBody(last));
            }
            body_cells.retain(|p| *p != segment);
            body.push(segment);
        }
        if let Some(&stray) = body_cells.first() {
            return Err(LayoutError::DisconnectedBody(stray));
        }

        let heading = match body.get(1) {
            Some(&neck) => Direction::between(neck, head).unwrap_or(config.start_heading),
            None => config.start_heading,
        };
        config.start_length = body.len();
        config.start_heading = heading;

        let snake = Snake::from_body(&mut board, body, heading);
        Ok(Self::from_parts(config, board, snake))
    }

    /// Reset board, snake, mode, phase and tick counter to the starting state.
    pub fn new_game(&mut self) {
        let (board, snake) = self.start.clone();
        self.board = board;
        self.snake = snake;
        self.mode = ControlMode::Manual;
        self.phase = GamePhase::Running;
        self.tick_count = 0;
        info!(length = self.snake.len(), head = %self.snake.head(), "new game");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Positions of every spam currently on the board.
    pub fn food_cells(&self) -> Vec<Position> {
        self.board.spam_cells().collect()
    }

    /// Segments gained since the start of the game.
    pub fn growth(&self) -> usize {
        self.snake.len().saturating_sub(self.start.1.len())
    }
}

/// Same symbols as the layout format, with `H` on the head.
impl fmt::Display for SpampedeGame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let head = self.snake.head();
        for row in 0..self.board.rows() {
            let line: String = (0..self.board.cols())
                .map(|col| {
                    let pos = Position::new(row, col);
                    if pos == head {
                        'H'
                    } else {
                        self.board.kind(pos).symbol()
                    }
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
