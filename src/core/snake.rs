//! The snake: an ordered body on the board plus its heading.

use super::board::Board;
use super::types::{CellKind, Direction, Position, ReversePolicy};
use std::collections::VecDeque;

/// Snake body segments, head at the front (index 0), and the current heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
}

impl Snake {
    /// Lay out a straight snake of `length` segments with its head at `head`,
    /// trailing away from `heading`, and tag its cells Body.
    ///
    /// Segments that would leave the board are dropped, so the snake can come
    /// out shorter than asked; config validation keeps that from happening.
    pub fn spawn(board: &mut Board, head: Position, length: usize, heading: Direction) -> Self {
        let mut body = VecDeque::with_capacity(length);
        let mut pos = Some(head);
        for _ in 0..length.max(1) {
            let Some(segment) = pos.filter(|p| board.contains(*p)) else {
                break;
            };
            board.set_kind(segment, CellKind::Body);
            body.push_back(segment);
            pos = segment.step(heading.opposite());
        }
        Self { body, heading }
    }

    /// Adopt an existing ordered body (head first) and tag it Body.
    pub fn from_body(board: &mut Board, body: Vec<Position>, heading: Direction) -> Self {
        debug_assert!(
            body.windows(2).all(|w| w[0].is_adjacent(w[1])),
            "snake body must be contiguous"
        );
        for &segment in &body {
            board.set_kind(segment, CellKind::Body);
        }
        Self {
            body: body.into(),
            heading,
        }
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// The segment right behind the head, if any.
    pub fn neck(&self) -> Option<Position> {
        self.body.get(1).copied()
    }

    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// The cell the head would move onto in manual mode.
    pub fn next_cell_in_heading(&self, board: &Board) -> Option<Position> {
        board.neighbor_in(self.head(), self.heading)
    }

    /// Change heading. Returns false if the policy dropped the request.
    ///
    /// `Ignore` checks the neck rather than the pending heading, so several
    /// turns between two moves still cannot point the head back into the body.
    pub fn set_heading(&mut self, direction: Direction, policy: ReversePolicy) -> bool {
        if policy == ReversePolicy::Ignore && self.points_at_neck(direction) {
            return false;
        }
        self.heading = direction;
        true
    }

    fn points_at_neck(&self, direction: Direction) -> bool {
        self.neck()
            .is_some_and(|neck| self.head().step(direction) == Some(neck))
    }

    /// Move the head onto `cell` and tag it Body.
    pub fn advance_head(&mut self, board: &mut Board, cell: Position) {
        debug_assert!(
            cell.is_adjacent(self.head()),
            "advance from {} to non-adjacent {}",
            self.head(),
            cell
        );
        board.set_kind(cell, CellKind::Body);
        self.body.push_front(cell);
    }

    /// Drop the last segment and reopen its cell.
    pub fn retract_tail(&mut self, board: &mut Board) -> Option<Position> {
        if self.body.len() <= 1 {
            return None;
        }
        let tail = self.body.pop_back()?;
        board.set_kind(tail, CellKind::Open);
        Some(tail)
    }

    /// Swap head and tail roles. Every body cell stays Body; only the order and
    /// the heading change.
    pub fn reverse(&mut self) {
        self.body.make_contiguous().reverse();
        self.heading = match self.neck() {
            Some(neck) => Direction::between(neck, self.head()).unwrap_or(self.heading),
            None => self.heading.opposite(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with_snake() -> (Board, Snake) {
        let mut board = Board::new(7, 7);
        let snake = Snake::spawn(&mut board, Position::new(3, 3), 3, Direction::East);
        (board, snake)
    }

    #[test]
    fn test_spawn_trails_behind_heading() {
        let (board, snake) = board_with_snake();
        assert_eq!(
            snake.body().iter().copied().collect::<Vec<_>>(),
            vec![Position::new(3, 3), Position::new(3, 2), Position::new(3, 1)]
        );
        assert_eq!(snake.heading(), Direction::East);
        for seg in snake.body() {
            assert!(board.cell(*seg).unwrap().is_body());
        }
    }

    #[test]
    fn test_next_cell_in_heading_is_pure() {
        let (board, snake) = board_with_snake();
        let before = snake.clone();
        assert_eq!(snake.next_cell_in_heading(&board), Some(Position::new(3, 4)));
        assert_eq!(snake, before);
    }

    #[test]
    fn test_advance_and_retract_keep_length() {
        let (mut board, mut snake) = board_with_snake();
        let old_tail = snake.tail();

        snake.advance_head(&mut board, Position::new(3, 4));
        snake.retract_tail(&mut board);

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(3, 4));
        assert!(board.cell(old_tail).unwrap().is_open());
        assert!(board.cell(Position::new(3, 4)).unwrap().is_body());
    }

    #[test]
    fn test_retract_keeps_last_segment() {
        let mut board = Board::new(5, 5);
        let mut snake = Snake::spawn(&mut board, Position::new(2, 2), 1, Direction::North);
        assert_eq!(snake.retract_tail(&mut board), None);
        assert_eq!(snake.len(), 1);
    }

    #[test]
    fn test_set_heading_allow_policy_accepts_reversal() {
        let (_, mut snake) = board_with_snake();
        assert!(snake.set_heading(Direction::West, ReversePolicy::Allow));
        assert_eq!(snake.heading(), Direction::West);
    }

    #[test]
    fn test_set_heading_ignore_policy_rejects_reversal() {
        let (_, mut snake) = board_with_snake();
        assert!(!snake.set_heading(Direction::West, ReversePolicy::Ignore));
        assert_eq!(snake.heading(), Direction::East);
        assert!(snake.set_heading(Direction::North, ReversePolicy::Ignore));
        assert_eq!(snake.heading(), Direction::North);
    }

    #[test]
    fn test_ignore_policy_checks_neck_not_pending_heading() {
        let (_, mut snake) = board_with_snake();
        assert!(snake.set_heading(Direction::North, ReversePolicy::Ignore));
        // West is not opposite the pending North, but it is where the neck is
        assert!(!snake.set_heading(Direction::West, ReversePolicy::Ignore));
        assert_eq!(snake.heading(), Direction::North);
        assert!(snake.set_heading(Direction::East, ReversePolicy::Ignore));
    }

    #[test]
    fn test_ignore_policy_follows_reversed_body() {
        let (_, mut snake) = board_with_snake();
        snake.reverse();
        // Head is now (3, 1) with the neck to the East
        assert!(!snake.set_heading(Direction::East, ReversePolicy::Ignore));
        assert!(snake.set_heading(Direction::South, ReversePolicy::Ignore));
    }

    #[test]
    fn test_ignore_policy_lets_single_segment_turn_around() {
        let mut board = Board::new(5, 5);
        let mut snake = Snake::spawn(&mut board, Position::new(2, 2), 1, Direction::East);
        assert!(snake.set_heading(Direction::West, ReversePolicy::Ignore));
    }

    #[test]
    fn test_reverse_swaps_ends_and_heading() {
        let (board, mut snake) = board_with_snake();
        snake.reverse();

        assert_eq!(snake.head(), Position::new(3, 1));
        assert_eq!(snake.tail(), Position::new(3, 3));
        assert_eq!(snake.heading(), Direction::West);
        for seg in snake.body() {
            assert!(board.cell(*seg).unwrap().is_body());
        }
    }

    #[test]
    fn test_reverse_is_involution() {
        let mut board = Board::new(8, 8);
        let body = vec![
            Position::new(2, 2),
            Position::new(3, 2),
            Position::new(3, 3),
            Position::new(3, 4),
            Position::new(4, 4),
        ];
        let mut snake = Snake::from_body(&mut board, body, Direction::North);
        let original = snake.clone();

        snake.reverse();
        assert_ne!(snake, original);
        assert_eq!(snake.heading(), Direction::South);

        snake.reverse();
        assert_eq!(snake, original);
    }

    #[test]
    fn test_reverse_single_segment_flips_heading() {
        let mut board = Board::new(5, 5);
        let mut snake = Snake::spawn(&mut board, Position::new(2, 2), 1, Direction::North);
        snake.reverse();
        assert_eq!(snake.heading(), Direction::South);
        snake.reverse();
        assert_eq!(snake.heading(), Direction::North);
    }
}
