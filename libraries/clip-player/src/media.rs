//! Host capabilities consumed by the player
//!
//! The controller never owns a decoder or a window. The media element and
//! the fullscreen capability are supplied by the platform (the browser's
//! `<video>` element and Fullscreen API on the web, a fake in tests).

use crate::error::Result;
use crate::types::ReadyState;

/// Media playback primitive
///
/// Implementors report their real state: after `play()` the controller reads
/// `is_paused()` back rather than assuming the command succeeded.
pub trait MediaElement {
    /// Begin or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback
    fn pause(&mut self) -> Result<()>;

    /// Whether playback is currently paused
    fn is_paused(&self) -> bool;

    /// Playback position in seconds
    fn current_time(&self) -> f64;

    /// Move the playback position (seconds)
    fn set_current_time(&mut self, seconds: f64);

    /// Media duration in seconds
    ///
    /// `None` while unknown (HTML reports `NaN`).
    fn duration(&self) -> Option<f64>;

    /// Readiness of the element
    fn ready_state(&self) -> ReadyState;

    /// Volume level (0.0-1.0)
    fn volume(&self) -> f32;

    fn set_volume(&mut self, volume: f32);

    fn is_muted(&self) -> bool;

    fn set_muted(&mut self, muted: bool);

    /// Let the element loop natively at the end of the media
    fn set_looping(&mut self, looping: bool);

    fn set_playback_rate(&mut self, rate: f64);
}

/// Fullscreen capability of the player container
pub trait FullscreenHost {
    /// Whether anything is currently fullscreen
    fn is_fullscreen(&self) -> bool;

    /// Make the container fullscreen
    fn request_fullscreen(&mut self) -> Result<()>;

    /// Leave fullscreen
    fn exit_fullscreen(&mut self) -> Result<()>;
}

/// In-memory media element for unit tests
///
/// Position only moves when the test says so.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct DummyMedia {
    pub paused: bool,
    pub position: f64,
    pub length: Option<f64>,
    pub ready: ReadyState,
    pub level: f32,
    pub muted: bool,
    pub looping: bool,
    pub rate: f64,
    pub refuse_play: bool,
    pub commands: Vec<&'static str>,
}

#[cfg(test)]
impl DummyMedia {
    /// Ready media of the given duration
    pub fn ready(duration: f64) -> Self {
        Self {
            length: Some(duration),
            ready: ReadyState::HaveEnoughData,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Default for DummyMedia {
    fn default() -> Self {
        Self {
            paused: true,
            position: 0.0,
            length: None,
            ready: ReadyState::HaveNothing,
            level: 1.0,
            muted: false,
            looping: false,
            rate: 1.0,
            refuse_play: false,
            commands: Vec::new(),
        }
    }
}

#[cfg(test)]
impl MediaElement for DummyMedia {
    fn play(&mut self) -> Result<()> {
        self.commands.push("play");
        if self.refuse_play {
            return Err(crate::error::PlayerError::Media(
                "play() request was interrupted".to_string(),
            ));
        }
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.commands.push("pause");
        self.paused = true;
        Ok(())
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.commands.push("seek");
        self.position = seconds;
    }

    fn duration(&self) -> Option<f64> {
        self.length
    }

    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn volume(&self) -> f32 {
        self.level
    }

    fn set_volume(&mut self, volume: f32) {
        self.level = volume;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
    }
}
