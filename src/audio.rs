use std::path::PathBuf;

use anyhow::{Result, ensure};
use tracing::{info, warn};

use crate::error::Error;

/// Background music output.
pub trait AudioOutput {
    fn play(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Playing,
    Muted,
    /// The output reported an error; the control stays inert.
    Unavailable,
}

impl AudioState {
    /// Glyph shown on the audio control.
    pub fn glyph(self) -> &'static str {
        match self {
            AudioState::Playing => "🔊",
            AudioState::Muted => "🔇",
            AudioState::Unavailable => "❌",
        }
    }
}

pub struct AudioToggle<A> {
    output: A,
    state: AudioState,
    unlocked: bool,
}

impl<A: AudioOutput> AudioToggle<A> {
    pub fn new(output: A) -> Self {
        Self {
            output,
            state: AudioState::Muted,
            unlocked: false,
        }
    }

    pub fn state(&self) -> AudioState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == AudioState::Playing
    }

    pub fn toggle(&mut self) -> Result<(), Error> {
        match self.state {
            AudioState::Playing => self.pause(),
            AudioState::Muted => {
                self.play();
                Ok(())
            }
            AudioState::Unavailable => Ok(()),
        }
    }

    /// First page click may start playback; later calls do nothing.
    pub fn unlock(&mut self) {
        if std::mem::replace(&mut self.unlocked, true) {
            return;
        }
        if self.state == AudioState::Muted {
            self.play();
        }
    }

    pub fn fail(&mut self) {
        warn!("audio output reported an error");
        self.state = AudioState::Unavailable;
    }

    fn play(&mut self) {
        match self.output.play() {
            Ok(()) => self.state = AudioState::Playing,
            Err(err) => {
                warn!("audio playback refused: {err:#}");
                self.state = AudioState::Muted;
            }
        }
        info!(state = self.state.glyph(), "audio control");
    }

    fn pause(&mut self) -> Result<(), Error> {
        self.output.pause().map_err(Error::Audio)?;
        self.state = AudioState::Muted;
        info!(state = self.state.glyph(), "audio control");
        Ok(())
    }

    pub fn output(&self) -> &A {
        &self.output
    }
}

/// Headless output backed by a track on disk. Playback only succeeds when the
/// configured file exists.
#[derive(Debug, Clone, Default)]
pub struct TrackAudio {
    track: Option<PathBuf>,
}

impl TrackAudio {
    pub fn new(track: Option<PathBuf>) -> Self {
        Self { track }
    }
}

impl AudioOutput for TrackAudio {
    fn play(&mut self) -> Result<()> {
        let Some(track) = self.track.as_ref() else {
            anyhow::bail!("no audio track configured");
        };
        ensure!(track.is_file(), "audio track {} not found", track.display());
        info!(track = %track.display(), "playing background track");
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Scripted {
        refuse: bool,
        plays: usize,
        pauses: usize,
    }

    impl AudioOutput for Scripted {
        fn play(&mut self) -> Result<()> {
            self.plays += 1;
            ensure!(!self.refuse, "autoplay blocked");
            Ok(())
        }
        fn pause(&mut self) -> Result<()> {
            self.pauses += 1;
            Ok(())
        }
    }

    #[test]
    fn toggle_flips_between_playing_and_muted() {
        let mut audio = AudioToggle::new(Scripted::default());
        assert_eq!(audio.state(), AudioState::Muted);
        audio.toggle().unwrap();
        assert!(audio.is_playing());
        audio.toggle().unwrap();
        assert_eq!(audio.state(), AudioState::Muted);
        assert_eq!(audio.output().pauses, 1);
    }

    #[test]
    fn refused_playback_stays_muted() {
        let mut audio = AudioToggle::new(Scripted {
            refuse: true,
            ..Default::default()
        });
        audio.toggle().unwrap();
        assert_eq!(audio.state(), AudioState::Muted);
        assert_eq!(audio.output().plays, 1);
    }

    #[test]
    fn unlock_plays_only_once() {
        let mut audio = AudioToggle::new(Scripted::default());
        audio.unlock();
        assert!(audio.is_playing());
        audio.toggle().unwrap();
        audio.unlock();
        assert_eq!(audio.state(), AudioState::Muted);
        assert_eq!(audio.output().plays, 1);
    }

    #[test]
    fn unavailable_ignores_toggles() {
        let mut audio = AudioToggle::new(Scripted::default());
        audio.fail();
        audio.toggle().unwrap();
        audio.unlock();
        assert_eq!(audio.state(), AudioState::Unavailable);
        assert_eq!(audio.state().glyph(), "❌");
        assert_eq!(audio.output().plays, 0);
    }

    #[test]
    fn track_audio_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut missing = TrackAudio::new(Some(dir.path().join("nope.mp3")));
        assert!(missing.play().is_err());
        assert!(TrackAudio::default().play().is_err());

        let file = dir.path().join("theme.mp3");
        std::fs::write(&file, b"ID3").unwrap();
        assert!(TrackAudio::new(Some(file)).play().is_ok());
    }
}
