//! Breadth-first search toward the nearest spam, used by AI mode.
//!
//! Search bookkeeping (visited flag, predecessor) lives on the board's cells
//! and is cleared at the start of every pass, so a finished search can still
//! be inspected with [`describe_predecessors`].

use super::board::Board;
use super::types::{Direction, Position};
use rand::Rng;
use std::collections::VecDeque;
use tracing::{debug, warn};

/// Result of planning one AI move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// First step of a shortest path to the nearest spam.
    TowardSpam {
        next: Position,
        spam: Position,
        /// Path length in steps from the head to `spam`.
        distance: usize,
    },
    /// No spam is reachable; a random open neighbor was picked instead.
    Wander(Position),
    /// No spam is reachable and the head has no open neighbor.
    Trapped,
}

impl SearchOutcome {
    /// The cell to move the head to, if there is one.
    pub fn next_cell(&self) -> Option<Position> {
        match *self {
            Self::TowardSpam { next, .. } | Self::Wander(next) => Some(next),
            Self::Trapped => None,
        }
    }
}

/// Run a BFS from `head` and return the spam cell dequeued first.
///
/// Neighbors are expanded in North, South, East, West order, so among
/// equidistant spam the one discovered first wins.
pub fn find_nearest_spam(board: &mut Board, head: Position) -> Option<Position> {
    board.reset_search_state();

    let mut frontier = VecDeque::new();
    board.mark_visited(head, None);
    frontier.push_back(head);

    while let Some(current) = frontier.pop_front() {
        if board.cell(current).is_some_and(|c| c.is_spam()) {
            return Some(current);
        }
        for neighbor in board.neighbors(current) {
            let Some(cell) = board.cell(neighbor) else {
                continue;
            };
            if cell.is_passable() && !cell.is_visited() {
                board.mark_visited(neighbor, Some(current));
                frontier.push_back(neighbor);
            }
        }
    }
    None
}

/// Follow predecessors back from `target` to the cell whose predecessor is
/// `head`. Returns that cell and the number of steps from `head` to `target`.
fn first_step_toward(board: &Board, head: Position, target: Position) -> Option<(Position, usize)> {
    let mut cell = target;
    let mut distance = 1;
    loop {
        let parent = board.predecessor(cell)?;
        if parent == head {
            return Some((cell, distance));
        }
        cell = parent;
        distance += 1;
    }
}

/// Plan the next AI move from `head`.
pub fn plan_move<R: Rng>(board: &mut Board, head: Position, rng: &mut R) -> SearchOutcome {
    if let Some(spam) = find_nearest_spam(board, head) {
        if let Some((next, distance)) = first_step_toward(board, head, spam) {
            debug!(%head, %next, %spam, distance, "path to spam");
            return SearchOutcome::TowardSpam {
                next,
                spam,
                distance,
            };
        }
    }

    match board.random_open_neighbor(head, rng) {
        Some(next) => {
            debug!(%head, %next, "no reachable spam, wandering");
            SearchOutcome::Wander(next)
        }
        None => {
            warn!(%head, "no reachable spam and no open neighbor");
            SearchOutcome::Trapped
        }
    }
}

/// The cell AI mode moves the head to, or `None` when trapped.
pub fn next_cell_from_bfs<R: Rng>(
    board: &mut Board,
    head: Position,
    rng: &mut R,
) -> Option<Position> {
    plan_move(board, head, rng).next_cell()
}

/// Full shortest path from `head` to the nearest spam, excluding the head and
/// ending on the spam cell.
pub fn shortest_path(board: &mut Board, head: Position) -> Option<Vec<Position>> {
    let spam = find_nearest_spam(board, head)?;
    let mut path = vec![spam];
    let mut cell = spam;
    while let Some(parent) = board.predecessor(cell) {
        if parent == head {
            path.reverse();
            return Some(path);
        }
        path.push(parent);
        cell = parent;
    }
    None
}

/// Render the predecessor tree of the last search: each visited cell shows an
/// arrow toward the cell it was discovered from, `@` marks the search root,
/// and unvisited cells show their type symbol.
pub fn describe_predecessors(board: &Board) -> String {
    let mut out = String::with_capacity((board.cols() + 1) * board.rows());
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            let pos = Position::new(row, col);
            let Some(cell) = board.cell(pos) else {
                continue;
            };
            let symbol = match cell.predecessor() {
                Some(parent) => Direction::between(pos, parent).map_or('?', |d| d.arrow()),
                None if cell.is_visited() => '@',
                None => cell.kind().symbol(),
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}
