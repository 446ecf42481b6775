//! Audio capability consumed by the game.
//!
//! The game only decides when a cue plays. How it is rendered belongs to the
//! presentation layer, which supplies an [`AudioPlayer`]. Playback is
//! dispatch-and-forget: failures are logged here and never reach gameplay.

use std::sync::{Arc, Mutex};

use crate::error::AudioError;

/// The three independently triggerable clips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioClip {
    Background,
    Success,
    Failure,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    Once,
    Loop,
}

pub trait AudioPlayer: Send + Sync {
    /// Start `clip` looping until the process ends.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` if playback could not be dispatched.
    fn play_loop(&self, clip: AudioClip) -> Result<(), AudioError>;

    /// Play `clip` once.
    ///
    /// # Errors
    ///
    /// Returns `AudioError` if playback could not be dispatched.
    fn play_once(&self, clip: AudioClip) -> Result<(), AudioError>;
}

pub(crate) fn play_cue(audio: &dyn AudioPlayer, clip: AudioClip) {
    if let Err(err) = audio.play_once(clip) {
        tracing::warn!(?clip, error = %err, "audio cue failed");
    }
}

pub(crate) fn play_background(audio: &dyn AudioPlayer) {
    if let Err(err) = audio.play_loop(AudioClip::Background) {
        tracing::warn!(error = %err, "background music failed");
    }
}

/// Player that plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play_loop(&self, _clip: AudioClip) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_once(&self, _clip: AudioClip) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Player that records every request, for tests and diagnostics.
///
/// A failing recorder still records the request before reporting an error.
#[derive(Clone, Default)]
pub struct RecordingAudio {
    played: Arc<Mutex<Vec<(AudioClip, PlaybackMode)>>>,
    fail: bool,
}

impl RecordingAudio {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing() -> Self {
        Self {
            played: Arc::default(),
            fail: true,
        }
    }

    /// Every request so far, in order.
    #[must_use]
    pub fn played(&self) -> Vec<(AudioClip, PlaybackMode)> {
        self.played
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// How many times `clip` was requested.
    #[must_use]
    pub fn count(&self, clip: AudioClip) -> usize {
        self.played()
            .iter()
            .filter(|(played, _)| *played == clip)
            .count()
    }

    fn record(&self, clip: AudioClip, mode: PlaybackMode) -> Result<(), AudioError> {
        if let Ok(mut guard) = self.played.lock() {
            guard.push((clip, mode));
        }
        if self.fail {
            return Err(AudioError::Unavailable);
        }
        Ok(())
    }
}

impl AudioPlayer for RecordingAudio {
    fn play_loop(&self, clip: AudioClip) -> Result<(), AudioError> {
        self.record(clip, PlaybackMode::Loop)
    }

    fn play_once(&self, clip: AudioClip) -> Result<(), AudioError> {
        self.record(clip, PlaybackMode::Once)
    }
}
