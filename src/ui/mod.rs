pub mod spampede_scene;

use ratatui::Frame;
use spampede::core::{CollisionCause, SpampedeGame};

/// Draws the whole screen for one frame.
pub fn draw_ui(frame: &mut Frame, game: &SpampedeGame, last_cause: Option<CollisionCause>) {
    let area = frame.size();
    spampede_scene::render_spampede_scene(frame, area, game, last_cause);
}
