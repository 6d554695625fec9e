//! Keyboard mapping for the game screen.
//!
//! Steering uses the i/j/k/l cluster or the arrow keys. Every other binding is
//! a single letter. Unbound keys do nothing; they never steer East.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use spampede::core::{ControlMode, Direction, GameInput};

/// What a key press asks the front-end to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// Forward to the engine.
    Game(GameInput),
    /// Play the spam noise.
    PlaySpamNoise,
    /// Leave the game loop.
    Quit,
    /// Not bound to anything.
    Ignored,
}

/// Translate a key event. Releases and repeats are ignored.
pub fn map_key(key: KeyEvent) -> InputResult {
    if key.kind != KeyEventKind::Press {
        return InputResult::Ignored;
    }

    match key.code {
        KeyCode::Char('i') | KeyCode::Char('I') | KeyCode::Up => heading(Direction::North),
        KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Down => heading(Direction::South),
        KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Left => heading(Direction::West),
        KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Right => heading(Direction::East),
        KeyCode::Char('r') | KeyCode::Char('R') => InputResult::Game(GameInput::Reverse),
        KeyCode::Char('a') | KeyCode::Char('A') => {
            InputResult::Game(GameInput::Mode(ControlMode::Ai))
        }
        KeyCode::Char('m') | KeyCode::Char('M') => {
            InputResult::Game(GameInput::Mode(ControlMode::Manual))
        }
        KeyCode::Char('n') | KeyCode::Char('N') => InputResult::Game(GameInput::NewGame),
        KeyCode::Char('s') | KeyCode::Char('S') => InputResult::PlaySpamNoise,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => InputResult::Quit,
        _ => InputResult::Ignored,
    }
}

fn heading(direction: Direction) -> InputResult {
    InputResult::Game(GameInput::Heading(direction))
}
