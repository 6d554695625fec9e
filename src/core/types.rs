//! Shared value types for the Spampede engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cardinal heading of the snake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Neighbor enumeration order. Search tie-breaking depends on it.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// Returns the opposite direction.
    pub fn opposite(&self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    /// Returns the (d_row, d_col) delta for this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    /// Direction of the single step from `from` to `to`, if they are 4-adjacent.
    pub fn between(from: Position, to: Position) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|dir| from.step(*dir) == Some(to))
    }

    /// Arrow glyph, used by the predecessor dump.
    pub fn arrow(&self) -> char {
        match self {
            Self::North => '^',
            Self::South => 'v',
            Self::East => '>',
            Self::West => '<',
        }
    }
}

/// A cell coordinate. Rows grow southward, columns grow eastward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The position one step away in `dir`. `None` if it would leave the
    /// non-negative quadrant; upper bounds are the board's concern.
    pub fn step(self, dir: Direction) -> Option<Position> {
        let (d_row, d_col) = dir.delta();
        Some(Position {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// Grid-adjacent horizontally or vertically (never diagonally).
    pub fn is_adjacent(self, other: Position) -> bool {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col) == 1
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Type tag of a board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Open,
    Wall,
    Body,
    Spam,
}

impl CellKind {
    pub fn symbol(&self) -> char {
        match self {
            Self::Open => '.',
            Self::Wall => '#',
            Self::Body => 'o',
            Self::Spam => '$',
        }
    }
}

/// Who picks the next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    #[default]
    Manual,
    Ai,
}

impl ControlMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Manual => "Manual",
            Self::Ai => "AI",
        }
    }
}

/// Step-controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    #[default]
    Running,
    GameOver,
}

/// What to do with a heading that points straight back into the neck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReversePolicy {
    /// Apply it; the next advance runs into the second segment.
    #[default]
    Allow,
    /// Drop it when the snake is longer than one segment.
    Ignore,
}

/// Why a game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCause {
    Wall,
    Body,
    /// The search found no spam and the head has no open neighbor.
    NoLegalMove,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_opposite() {
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_ne!(dir.opposite(), dir);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::East.opposite(), Direction::West);
    }

    #[test]
    fn test_direction_delta() {
        assert_eq!(Direction::North.delta(), (-1, 0));
        assert_eq!(Direction::South.delta(), (1, 0));
        assert_eq!(Direction::East.delta(), (0, 1));
        assert_eq!(Direction::West.delta(), (0, -1));
    }

    #[test]
    fn test_step_stops_at_origin() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.step(Direction::North), None);
        assert_eq!(origin.step(Direction::West), None);
        assert_eq!(origin.step(Direction::South), Some(Position::new(1, 0)));
        assert_eq!(origin.step(Direction::East), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_direction_between() {
        let a = Position::new(4, 4);
        assert_eq!(Direction::between(a, Position::new(3, 4)), Some(Direction::North));
        assert_eq!(Direction::between(a, Position::new(4, 5)), Some(Direction::East));
        assert_eq!(Direction::between(a, Position::new(5, 5)), None);
        assert_eq!(Direction::between(a, a), None);
    }

    #[test]
    fn test_adjacency_excludes_diagonals() {
        let a = Position::new(2, 2);
        assert!(a.is_adjacent(Position::new(2, 3)));
        assert!(a.is_adjacent(Position::new(1, 2)));
        assert!(!a.is_adjacent(Position::new(3, 3)));
        assert!(!a.is_adjacent(a));
    }

    #[test]
    fn test_reverse_policy_serde_names() {
        let json = serde_json::to_string(&ReversePolicy::Ignore).unwrap();
        assert_eq!(json, "\"ignore\"");
        let parsed: ReversePolicy = serde_json::from_str("\"allow\"").unwrap();
        assert_eq!(parsed, ReversePolicy::Allow);
    }
}
