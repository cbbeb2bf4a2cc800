//! Sound effects and background music
//!
//! Gameplay never waits on audio: every backend call is fire-and-forget,
//! failures are logged and dropped, and nothing is retried.

use anyhow::{Context, Result};
use std::io::Write;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// The snake ate food
    Eat,
    /// The game ended
    GameOver,
}

/// Something that can make noise
pub trait AudioBackend {
    fn play(&mut self, cue: Cue) -> Result<()>;

    /// Start (`true`) or pause (`false`) the looping background track
    fn set_music(&mut self, playing: bool) -> Result<()>;
}

/// Owns the sound-enabled flag and keeps the background track in step with it
pub struct SoundBoard<A: AudioBackend> {
    backend: A,
    enabled: bool,
    music_playing: bool,
}

impl<A: AudioBackend> SoundBoard<A> {
    /// Music starts right away when sound is enabled
    pub fn new(backend: A, enabled: bool) -> Self {
        let mut board = Self {
            backend,
            enabled,
            music_playing: false,
        };
        board.sync_music();
        board
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_music_playing(&self) -> bool {
        self.music_playing
    }

    /// Play a cue if sound is enabled
    pub fn play(&mut self, cue: Cue) {
        if !self.enabled {
            return;
        }
        if let Err(err) = self.backend.play(cue) {
            tracing::warn!("Audio play failed for {:?}: {:#}", cue, err);
        }
    }

    /// Flip the sound-enabled flag; returns the new value
    pub fn toggle(&mut self) -> bool {
        self.set_enabled(!self.enabled);
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        tracing::info!("Sound {}", if enabled { "enabled" } else { "disabled" });
        self.sync_music();
    }

    /// Pause the background track, e.g. before exiting
    pub fn silence(&mut self) {
        if self.music_playing {
            self.apply_music(false);
        }
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    fn sync_music(&mut self) {
        if self.enabled != self.music_playing {
            self.apply_music(self.enabled);
        }
    }

    fn apply_music(&mut self, playing: bool) {
        match self.backend.set_music(playing) {
            Ok(()) => self.music_playing = playing,
            Err(err) => tracing::warn!("Audio music toggle failed: {:#}", err),
        }
    }
}

/// Rings the terminal bell for cues. Terminals have no way to loop a
/// track, so music changes are only logged.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl AudioBackend for TerminalBell {
    fn play(&mut self, cue: Cue) -> Result<()> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07").context("Failed to ring terminal bell")?;
        out.flush().context("Failed to flush terminal bell")?;
        tracing::debug!("Played {:?}", cue);
        Ok(())
    }

    fn set_music(&mut self, playing: bool) -> Result<()> {
        tracing::debug!("Background music {}", if playing { "on" } else { "paused" });
        Ok(())
    }
}

/// Discards everything
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioBackend for SilentAudio {
    fn play(&mut self, _cue: Cue) -> Result<()> {
        Ok(())
    }

    fn set_music(&mut self, _playing: bool) -> Result<()> {
        Ok(())
    }
}

/// What a `RecordingAudio` was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    Cue(Cue),
    Music(bool),
}

/// Keeps a log of requests; can be told to fail every call
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub events: Vec<AudioEvent>,
    pub fail: bool,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            events: Vec::new(),
            fail: true,
        }
    }

    pub fn cues(&self) -> Vec<Cue> {
        self.events
            .iter()
            .filter_map(|event| match event {
                AudioEvent::Cue(cue) => Some(*cue),
                AudioEvent::Music(_) => None,
            })
            .collect()
    }
}

impl AudioBackend for RecordingAudio {
    fn play(&mut self, cue: Cue) -> Result<()> {
        if self.fail {
            anyhow::bail!("no audio device");
        }
        self.events.push(AudioEvent::Cue(cue));
        Ok(())
    }

    fn set_music(&mut self, playing: bool) -> Result<()> {
        if self.fail {
            anyhow::bail!("no audio device");
        }
        self.events.push(AudioEvent::Music(playing));
        Ok(())
    }
}
