//! Board and cell model.
//!
//! The board owns every cell in one row-major vector. Everything else (the
//! snake body, search predecessors) refers to cells by [`Position`].

use super::types::{CellKind, Direction, Position};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

/// One grid position with its type tag and per-search bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    position: Position,
    kind: CellKind,
    visited: bool,
    predecessor: Option<Position>,
}

impl Cell {
    fn new(position: Position, kind: CellKind) -> Self {
        Self {
            position,
            kind,
            visited: false,
            predecessor: None,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn row(&self) -> usize {
        self.position.row
    }

    pub fn col(&self) -> usize {
        self.position.col
    }

    pub fn kind(&self) -> CellKind {
        self.kind
    }

    pub fn is_wall(&self) -> bool {
        self.kind == CellKind::Wall
    }

    pub fn is_body(&self) -> bool {
        self.kind == CellKind::Body
    }

    pub fn is_spam(&self) -> bool {
        self.kind == CellKind::Spam
    }

    pub fn is_open(&self) -> bool {
        self.kind == CellKind::Open
    }

    /// Open or Spam: a cell the head may move onto.
    pub fn is_passable(&self) -> bool {
        matches!(self.kind, CellKind::Open | CellKind::Spam)
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn has_predecessor(&self) -> bool {
        self.predecessor.is_some()
    }

    /// Cell this one was discovered from in the last search pass.
    pub fn predecessor(&self) -> Option<Position> {
        self.predecessor
    }
}

/// The playing field: a fixed grid walled on its perimeter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    food_count: usize,
}

impl Board {
    /// Create a board with Wall on the perimeter and Open everywhere else.
    pub fn new(rows: usize, cols: usize) -> Self {
        let cells = (0..rows)
            .flat_map(|row| (0..cols).map(move |col| Position::new(row, col)))
            .map(|pos| {
                let kind = if Self::on_perimeter(rows, cols, pos) {
                    CellKind::Wall
                } else {
                    CellKind::Open
                };
                Cell::new(pos, kind)
            })
            .collect();

        Self {
            rows,
            cols,
            cells,
            food_count: 0,
        }
    }

    /// Like [`Board::new`] plus interior walls. Out-of-range obstacles are skipped.
    pub fn with_obstacles(rows: usize, cols: usize, obstacles: &[Position]) -> Self {
        let mut board = Self::new(rows, cols);
        for &pos in obstacles {
            if board.contains(pos) {
                board.set_kind(pos, CellKind::Wall);
            }
        }
        board
    }

    fn on_perimeter(rows: usize, cols: usize, pos: Position) -> bool {
        pos.row == 0 || pos.col == 0 || pos.row + 1 == rows || pos.col + 1 == cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of cells currently tagged Spam.
    pub fn food_count(&self) -> usize {
        self.food_count
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn is_boundary(&self, pos: Position) -> bool {
        Self::on_perimeter(self.rows, self.cols, pos)
    }

    fn index(&self, pos: Position) -> Option<usize> {
        self.contains(pos).then(|| pos.row * self.cols + pos.col)
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index(pos).map(|i| &self.cells[i])
    }

    fn cell_mut(&mut self, pos: Position) -> Option<&mut Cell> {
        let i = self.index(pos)?;
        Some(&mut self.cells[i])
    }

    /// Type tag at `pos`; anything off the board reads as Wall.
    pub fn kind(&self, pos: Position) -> CellKind {
        self.cell(pos).map_or(CellKind::Wall, Cell::kind)
    }

    /// Retag a cell, keeping the food count in step with the Spam tags.
    pub fn set_kind(&mut self, pos: Position, kind: CellKind) {
        debug_assert!(
            kind == CellKind::Wall || !self.is_boundary(pos),
            "boundary cell {pos} must stay Wall"
        );
        let Some(cell) = self.cell_mut(pos) else {
            return;
        };
        let was_spam = cell.kind == CellKind::Spam;
        cell.kind = kind;
        match (was_spam, kind == CellKind::Spam) {
            (false, true) => self.food_count += 1,
            (true, false) => self.food_count -= 1,
            _ => {}
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn open_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|c| c.is_open())
            .map(Cell::position)
    }

    pub fn spam_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .filter(|c| c.is_spam())
            .map(Cell::position)
    }

    /// The in-bounds cell one step from `pos` in `dir`.
    pub fn neighbor_in(&self, pos: Position, dir: Direction) -> Option<Position> {
        pos.step(dir).filter(|next| self.contains(*next))
    }

    /// In-bounds 4-neighbors of `pos`, always in North, South, East, West order.
    pub fn neighbors(&self, pos: Position) -> Vec<Position> {
        Direction::ALL
            .iter()
            .filter_map(|dir| self.neighbor_in(pos, *dir))
            .collect()
    }

    /// A uniformly chosen Open neighbor, or `None` when boxed in.
    pub fn random_open_neighbor<R: Rng>(&self, pos: Position, rng: &mut R) -> Option<Position> {
        let open: Vec<Position> = self
            .neighbors(pos)
            .into_iter()
            .filter(|n| self.kind(*n) == CellKind::Open)
            .collect();
        open.choose(rng).copied()
    }

    /// Clear visited flags and predecessors left by the previous search.
    pub fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.visited = false;
            cell.predecessor = None;
        }
    }

    /// Record that `pos` was reached during the current search pass.
    pub(crate) fn mark_visited(&mut self, pos: Position, predecessor: Option<Position>) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.visited = true;
            cell.predecessor = predecessor;
        }
    }

    pub fn is_visited(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(Cell::is_visited)
    }

    pub fn predecessor(&self, pos: Position) -> Option<Position> {
        self.cell(pos).and_then(Cell::predecessor)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            let line: String = row.iter().map(|c| c.kind.symbol()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
