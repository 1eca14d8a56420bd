/// Sound cues.  Fire-and-forget: a failing sink never stops the game.

use std::io::Write;

use tracing::warn;

use crate::entities::{GameEvent, Sound};
use crate::error::{GameError, Result};

pub trait AudioSink {
    fn play(&mut self, sound: Sound) -> Result<()>;
}

/// Play every sound cue in `events`.  Failures are logged and dropped.
pub fn dispatch(sink: &mut dyn AudioSink, events: &[GameEvent]) {
    for event in events {
        if let GameEvent::Sound(sound) = *event {
            if let Err(err) = sink.play(sound) {
                warn!(?sound, %err, "audio cue failed");
            }
        }
    }
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl AudioSink for Silent {
    fn play(&mut self, _sound: Sound) -> Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell on kills and on game over.  Shots stay quiet,
/// a bell per shot is unbearable.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, sound: Sound) -> Result<()> {
        match sound {
            Sound::Fire => Ok(()),
            Sound::Kill | Sound::GameOver => self
                .out
                .write_all(b"\x07")
                .and_then(|_| self.out.flush())
                .map_err(|e| GameError::Audio(format!("bell: {e}"))),
        }
    }
}
