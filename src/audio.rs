//! Sound cues for game events.
//!
//! Sounds are fire-and-forget: a sink never reports failure back to the game.

use crate::core::logic::TickEvent;
use std::io::Write;

/// The three sounds the game knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// New game, or on request.
    Spam,
    /// Spam eaten.
    Crunch,
    /// Game over.
    Meow,
}

pub trait SoundSink {
    fn play(&mut self, cue: SoundCue);
}

/// Cues to play for the events of one tick, in event order.
pub fn cues_for(events: &[TickEvent]) -> Vec<SoundCue> {
    events
        .iter()
        .filter_map(|event| match event {
            TickEvent::SpamEaten { .. } => Some(SoundCue::Crunch),
            TickEvent::GameOver { .. } => Some(SoundCue::Meow),
            TickEvent::Moved { .. } | TickEvent::SpamPlaced { .. } => None,
        })
        .collect()
}

/// Rings the terminal bell for every cue.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> SoundSink for TerminalBell<W> {
    fn play(&mut self, _cue: SoundCue) {
        let _ = self.out.write_all(b"\x07").and_then(|_| self.out.flush());
    }
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}
