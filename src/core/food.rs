//! Spam placement.

use super::board::Board;
use super::types::{CellKind, Position};
use rand::seq::IteratorRandom;
use rand::Rng;

/// Drop one spam on a uniformly random Open cell. `None` if the board is full.
pub fn place_food<R: Rng>(board: &mut Board, rng: &mut R) -> Option<Position> {
    let cell = board.open_cells().choose(rng)?;
    board.set_kind(cell, CellKind::Spam);
    Some(cell)
}

/// Whether the step controller should drop spam on this tick: always when the
/// board has none, and otherwise once every `refill_cadence` ticks.
pub fn should_add_food(food_count: usize, tick: u64, refill_cadence: u64) -> bool {
    food_count == 0 || (refill_cadence > 0 && tick % refill_cadence == 0)
}
