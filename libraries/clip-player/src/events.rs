//! Player Events
//!
//! Event-based communication for UI synchronization.
//! The controller queues events at key points and the host drains them
//! after each callback turn to decide what to re-render:
//! - Play/pause changes (as reported by the media element)
//! - Volume and mute changes
//! - Progress updates (every tick that moved the slider)
//! - Restricted range snaps and toggles
//! - Control bar visibility changes

use serde::{Deserialize, Serialize};

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playing flag changed
    PlayingChanged {
        /// Whether the media is now playing
        playing: bool,
    },

    /// Volume or mute changed
    VolumeChanged {
        /// New volume level (0.0-1.0)
        level: f32,
        /// Whether audio is muted
        is_muted: bool,
    },

    /// Duration became known
    DurationKnown {
        /// Duration in seconds
        duration: f64,
    },

    /// Progress slider value changed
    ProgressChanged {
        /// Slider value (0-100)
        progress: f64,
        /// Playback position in seconds
        current_time: f64,
    },

    /// Position was pulled back to the range start
    RangeSnapped {
        /// Position observed before the snap
        from: f64,
        /// Range start the position moved to
        to: f64,
        /// Whether playback was paused by the snap
        paused: bool,
    },

    /// Restricted range enforcement toggled
    RangeToggled {
        /// New enforcement state
        enabled: bool,
    },

    /// Control bar shown or hidden
    ControlsVisibilityChanged {
        /// Whether the bar is now visible
        visible: bool,
    },

    /// Media element rejected a command
    Error {
        /// Error message
        message: String,
    },
}
