//! Spampede step controller: control inputs and the per-tick state machine.

use super::food::{place_food, should_add_food};
use super::game::SpampedeGame;
use super::search::next_cell_from_bfs;
use super::types::{
    CellKind, CollisionCause, ControlMode, Direction, GamePhase, Position, ReversePolicy,
};
use rand::Rng;
use tracing::{debug, info};

/// UI-agnostic control inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameInput {
    Heading(Direction),
    Reverse,
    Mode(ControlMode),
    NewGame,
}

/// Something that happened during a tick, for the presentation and audio
/// collaborators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickEvent {
    /// The head moved one cell.
    Moved { from: Position, to: Position },
    /// The head landed on spam; `length` is the new body length.
    SpamEaten { cell: Position, length: usize },
    /// New spam was dropped on the board.
    SpamPlaced { cell: Position },
    /// The game ended. `cell` is what the head would have hit.
    GameOver {
        cause: CollisionCause,
        cell: Option<Position>,
    },
}

/// Outcome of one call to [`SpampedeGame::tick`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickResult {
    /// This was a movement tick and the snake moved.
    pub moved: bool,
    pub events: Vec<TickEvent>,
}

impl TickResult {
    pub fn ate_spam(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::SpamEaten { .. }))
    }

    pub fn ended_game(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, TickEvent::GameOver { .. }))
    }
}

impl SpampedeGame {
    /// Steer the snake. Takes effect on the next movement tick; the last
    /// heading set before it wins. Returns whether the heading changed hands
    /// to the snake (false after game over or when the reverse policy drops it).
    pub fn set_heading(&mut self, direction: Direction) -> bool {
        if self.is_game_over() {
            return false;
        }
        self.snake.set_heading(direction, self.config.reverse_policy)
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        if self.is_game_over() || self.mode == mode {
            return;
        }
        info!(mode = mode.name(), "control mode changed");
        self.mode = mode;
    }

    /// Swap the snake's head and tail. No-op after game over.
    pub fn reverse(&mut self) {
        if self.is_game_over() {
            return;
        }
        self.snake.reverse();
        debug!(head = %self.snake.head(), heading = ?self.snake.heading(), "snake reversed");
    }

    /// Apply a control input. Returns true if the game state changed.
    pub fn process_input(&mut self, input: GameInput) -> bool {
        match input {
            GameInput::NewGame => {
                self.new_game();
                true
            }
            _ if self.is_game_over() => false,
            GameInput::Heading(direction) => {
                let before = self.snake.heading();
                self.set_heading(direction) && before != direction
            }
            GameInput::Reverse => {
                self.reverse();
                true
            }
            GameInput::Mode(mode) => {
                let changed = self.mode != mode;
                self.set_mode(mode);
                changed
            }
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// The snake moves only on ticks that are a multiple of the movement
    /// cadence. Spam is replenished on every tick the game is still running.
    /// Once the game is over this does nothing until [`SpampedeGame::new_game`].
    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> TickResult {
        let mut result = TickResult::default();
        if self.is_game_over() {
            return result;
        }

        if self.tick_count % self.config.movement_cadence.max(1) == 0 {
            self.step(rng, &mut result);
        }

        if !self.is_game_over()
            && should_add_food(
                self.board.food_count(),
                self.tick_count,
                self.config.refill_cadence,
            )
        {
            if let Some(cell) = place_food(&mut self.board, rng) {
                debug!(%cell, food = self.board.food_count(), "spam placed");
                result.events.push(TickEvent::SpamPlaced { cell });
            }
        }

        self.tick_count += 1;
        result
    }

    /// One movement step: pick the next cell, then collide, eat or move.
    fn step<R: Rng>(&mut self, rng: &mut R, result: &mut TickResult) {
        let head = self.snake.head();
        let next = match self.mode {
            ControlMode::Ai => next_cell_from_bfs(&mut self.board, head, rng),
            ControlMode::Manual => self.snake.next_cell_in_heading(&self.board),
        };

        let Some(next) = next else {
            self.end_game(CollisionCause::NoLegalMove, None, result);
            return;
        };

        match self.board.kind(next) {
            CellKind::Wall => self.end_game(CollisionCause::Wall, Some(next), result),
            CellKind::Body => self.end_game(CollisionCause::Body, Some(next), result),
            CellKind::Spam => {
                self.snake.advance_head(&mut self.board, next);
                self.point_heading(head, next);
                let length = self.snake.len();
                info!(cell = %next, length, "spam eaten");
                result.moved = true;
                result.events.push(TickEvent::Moved { from: head, to: next });
                result.events.push(TickEvent::SpamEaten { cell: next, length });
            }
            CellKind::Open => {
                self.snake.advance_head(&mut self.board, next);
                self.snake.retract_tail(&mut self.board);
                self.point_heading(head, next);
                debug!(from = %head, to = %next, "moved");
                result.moved = true;
                result.events.push(TickEvent::Moved { from: head, to: next });
            }
        }
    }

    /// Keep the heading in line with the last move, so AI moves leave a sane
    /// heading behind when control goes back to manual.
    fn point_heading(&mut self, from: Position, to: Position) {
        if let Some(dir) = Direction::between(from, to) {
            self.snake.set_heading(dir, ReversePolicy::Allow);
        }
    }

    fn end_game(&mut self, cause: CollisionCause, cell: Option<Position>, result: &mut TickResult) {
        self.phase = GamePhase::GameOver;
        info!(
            ?cause,
            cell = ?cell,
            length = self.snake.len(),
            ticks = self.tick_count,
            "game over"
        );
        debug!("final board:\n{}", self);
        result.events.push(TickEvent::GameOver { cause, cell });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(1234)
    }

    /// Every tick moves and spam only refills when the board runs out.
    fn every_tick() -> GameConfig {
        GameConfig {
            movement_cadence: 1,
            refill_cadence: 0,
            ..Default::default()
        }
    }

    fn layout_game(layout: &[&str]) -> SpampedeGame {
        SpampedeGame::from_layout(layout, every_tick()).unwrap()
    }

    #[test]
    fn test_manual_move_keeps_length() {
        let mut game = layout_game(&["#######", "#.$...#", "#.ooH.#", "#######"]);
        let mut rng = rng();

        let result = game.tick(&mut rng);

        assert!(result.moved);
        assert_eq!(game.snake().head(), Position::new(2, 5));
        assert_eq!(game.snake().len(), 3);
        assert!(game.board().cell(Position::new(2, 2)).unwrap().is_open());
        assert_eq!(game.tick_count(), 1);
    }

    #[test]
    fn test_eating_grows_by_one() {
        let mut game = layout_game(&["#######", "#.oH$.#", "#.....#", "#######"]);
        let mut rng = rng();

        let result = game.tick(&mut rng);

        assert!(result.ate_spam());
        assert_eq!(game.snake().len(), 3);
        assert_eq!(game.snake().head(), Position::new(1, 4));
        // The eaten spam is gone and a replacement was dropped the same tick
        assert!(game.board().cell(Position::new(1, 4)).unwrap().is_body());
        assert_eq!(game.board().food_count(), 1);
        assert!(result
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::SpamPlaced { .. })));
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let mut game = layout_game(&["#####", "#.oH#", "#..$#", "#####"]);
        let mut rng = rng();

        let result = game.tick(&mut rng);

        assert!(game.is_game_over());
        assert_eq!(
            result.events,
            vec![TickEvent::GameOver {
                cause: CollisionCause::Wall,
                cell: Some(Position::new(1, 4)),
            }]
        );
        // Head did not move and no spam was added
        assert_eq!(game.snake().head(), Position::new(1, 3));
        assert_eq!(game.board().food_count(), 1);
    }

    #[test]
    fn test_reverse_into_neck_is_fatal_by_default() {
        let mut game = layout_game(&["#######", "#.oH..#", "#..$..#", "#######"]);
        let mut rng = rng();

        assert!(game.set_heading(Direction::West));
        game.tick(&mut rng);

        assert!(game.is_game_over());
    }

    #[test]
    fn test_ignore_policy_keeps_snake_alive() {
        let config = GameConfig {
            reverse_policy: ReversePolicy::Ignore,
            ..every_tick()
        };
        let mut game =
            SpampedeGame::from_layout(&["#######", "#.oH..#", "#..$..#", "#######"], config)
                .unwrap();
        let mut rng = rng();

        assert!(!game.set_heading(Direction::West));
        game.tick(&mut rng);

        assert!(!game.is_game_over());
        assert_eq!(game.snake().head(), Position::new(1, 4));
    }

    #[test]
    fn test_ignore_policy_blocks_two_step_turn_into_neck() {
        let config = GameConfig {
            reverse_policy: ReversePolicy::Ignore,
            ..every_tick()
        };
        let mut game =
            SpampedeGame::from_layout(&["#######", "#.....#", "#.oH..#", "#######"], config)
                .unwrap();
        let mut rng = rng();

        // Both presses land before the next movement step
        assert!(game.set_heading(Direction::North));
        assert!(!game.set_heading(Direction::West));
        assert_eq!(game.snake().heading(), Direction::North);

        let result = game.tick(&mut rng);
        assert!(!result.ended_game());
        assert_eq!(game.snake().head(), Position::new(1, 3));
    }

    #[test]
    fn test_movement_cadence_gates_moves() {
        let config = GameConfig {
            movement_cadence: 3,
            ..every_tick()
        };
        let mut game =
            SpampedeGame::from_layout(&["#########", "#oH.....#", "#......$#", "#########"], config)
                .unwrap();
        let mut rng = rng();

        let moved: Vec<bool> = (0..6).map(|_| game.tick(&mut rng).moved).collect();

        assert_eq!(moved, vec![true, false, false, true, false, false]);
        assert_eq!(game.snake().head(), Position::new(1, 4));
        assert_eq!(game.tick_count(), 6);
    }

    #[test]
    fn test_refill_cadence_adds_spam_while_food_remains() {
        let config = GameConfig {
            movement_cadence: 100,
            refill_cadence: 4,
            ..Default::default()
        };
        let mut game = SpampedeGame::from_layout(
            &["#########", "#oH.....#", "#......$#", "#......##", "#########"],
            config,
        )
        .unwrap();
        let mut rng = rng();

        // Ticks 0 and 4 are refill ticks; food never ran out in between
        for _ in 0..5 {
            game.tick(&mut rng);
        }
        assert_eq!(game.board().food_count(), 3);
    }

    #[test]
    fn test_tick_after_game_over_is_noop() {
        let mut game = layout_game(&["#####", "#.oH#", "#...#", "#####"]);
        let mut rng = rng();
        game.tick(&mut rng);
        assert!(game.is_game_over());
        let snapshot = game.to_string();
        let ticks = game.tick_count();

        for _ in 0..10 {
            assert_eq!(game.tick(&mut rng), TickResult::default());
        }
        assert_eq!(game.to_string(), snapshot);
        assert_eq!(game.tick_count(), ticks);
    }

    #[test]
    fn test_inputs_ignored_after_game_over() {
        let mut game = layout_game(&["#####", "#.oH#", "#...#", "#####"]);
        let mut rng = rng();
        game.tick(&mut rng);

        assert!(!game.process_input(GameInput::Heading(Direction::South)));
        assert!(!game.process_input(GameInput::Reverse));
        assert!(!game.process_input(GameInput::Mode(ControlMode::Ai)));
        assert_eq!(game.mode(), ControlMode::Manual);
        assert_eq!(game.snake().head(), Position::new(1, 3));

        assert!(game.process_input(GameInput::NewGame));
        assert!(!game.is_game_over());
    }

    #[test]
    fn test_process_input_heading_last_write_wins() {
        let mut game = layout_game(&["#######", "#.oH..#", "#.....#", "#.....#", "#######"]);
        let mut rng = rng();

        assert!(game.process_input(GameInput::Heading(Direction::North)));
        assert!(game.process_input(GameInput::Heading(Direction::South)));
        assert!(!game.process_input(GameInput::Heading(Direction::South)));
        game.tick(&mut rng);

        assert_eq!(game.snake().head(), Position::new(2, 3));
    }

    #[test]
    fn test_ai_mode_follows_bfs() {
        let mut game = layout_game(&["#######", "#..$..#", "#.....#", "#.oH..#", "#######"]);
        let mut rng = rng();
        assert!(game.process_input(GameInput::Mode(ControlMode::Ai)));

        game.tick(&mut rng);
        assert_eq!(game.snake().head(), Position::new(2, 3));
        assert_eq!(game.snake().heading(), Direction::North);

        let result = game.tick(&mut rng);
        assert!(result.ate_spam());
        assert_eq!(game.snake().len(), 3);
    }

    #[test]
    fn test_trapped_ai_ends_game() {
        let mut game = layout_game(&["####", "#Ho#", "####"]);
        let mut rng = rng();
        game.set_mode(ControlMode::Ai);

        let result = game.tick(&mut rng);

        assert!(game.is_game_over());
        assert_eq!(
            result.events,
            vec![TickEvent::GameOver {
                cause: CollisionCause::NoLegalMove,
                cell: None,
            }]
        );
    }

    #[test]
    fn test_reverse_changes_head_and_direction() {
        let mut game = layout_game(&["#########", "#.ooH...#", "#.......#", "#########"]);
        let mut rng = rng();

        assert!(game.process_input(GameInput::Reverse));
        assert_eq!(game.snake().head(), Position::new(1, 2));
        assert_eq!(game.snake().heading(), Direction::West);

        game.tick(&mut rng);
        assert_eq!(game.snake().head(), Position::new(1, 1));
        assert!(!game.is_game_over());
    }
}
