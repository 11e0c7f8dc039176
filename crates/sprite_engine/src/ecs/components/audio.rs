//! Audio component
//!
//! Marks an entity as a sound source. Playback is requested by setting a
//! pending flag; the host audio player consumes it with
//! [`AudioComponent::take_pending`] on its next update.

use crate::error::{EngineError, EngineResult};

/// Sound source attached to an entity
#[derive(Debug, Clone, PartialEq)]
pub struct AudioComponent {
    /// Sound file path, resolved by the audio player
    pub file_name: String,
    volume: f32,
    pitch: f32,
    pending_play: bool,
}

impl AudioComponent {
    /// Create a source at full volume and neutral pitch
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            volume: 1.0,
            pitch: 0.0,
            pending_play: false,
        }
    }

    /// Volume in `0.0..=1.0`
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Pitch shift in `-1.0..=1.0`
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the volume; values outside `0.0..=1.0` are rejected
    pub fn set_volume(&mut self, volume: f32) -> EngineResult<()> {
        if !(0.0..=1.0).contains(&volume) {
            return Err(EngineError::invalid_argument(format!(
                "volume must be within 0..=1, got {volume}"
            )));
        }
        self.volume = volume;
        Ok(())
    }

    /// Set the pitch; values outside `-1.0..=1.0` are rejected
    pub fn set_pitch(&mut self, pitch: f32) -> EngineResult<()> {
        if !(-1.0..=1.0).contains(&pitch) {
            return Err(EngineError::invalid_argument(format!(
                "pitch must be within -1..=1, got {pitch}"
            )));
        }
        self.pitch = pitch;
        Ok(())
    }

    /// Request playback on the next audio update
    pub fn play(&mut self) {
        self.pending_play = true;
    }

    /// Whether playback was requested and not yet consumed
    pub fn is_pending(&self) -> bool {
        self.pending_play
    }

    /// Consume a pending playback request
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending_play)
    }
}
