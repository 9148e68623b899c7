//! Control bar render model
//!
//! A plain snapshot of what the control bar should show. Renderers (the
//! DOM element, or anything else) only read this; they never inspect the
//! controller directly.

use serde::{Deserialize, Serialize};

use crate::{controller::PlayerController, media::MediaElement, range::RangeHighlight};

/// Play/pause button face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayIcon {
    /// Media is paused; clicking plays
    Play,
    /// Media is playing; clicking pauses
    Pause,
}

/// Mute button face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundIcon {
    Sound,
    Muted,
}

/// Restricted range button face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockIcon {
    /// Enforcement on
    Locked,
    /// Enforcement off
    Unlocked,
}

/// Everything the control bar renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlBarView {
    pub play_icon: PlayIcon,
    pub sound_icon: SoundIcon,
    /// Only present when a range is configured
    pub lock_icon: Option<LockIcon>,
    /// Progress slider value (0-100)
    pub progress: f64,
    /// Restricted window on the progress bar, once the duration is known
    pub range_highlight: Option<RangeHighlight>,
    /// Volume slider value (0.0-1.0)
    pub volume: f32,
    /// Volume slider fill (0-100)
    pub volume_fill: f32,
    /// Render the fullscreen button pair
    pub fullscreen_button: bool,
    /// Control bar shown
    pub visible: bool,
    /// "elapsed / total" label
    pub time_label: String,
}

impl ControlBarView {
    pub fn from_controller<M: MediaElement>(controller: &PlayerController<M>) -> Self {
        let state = controller.state();
        let ui = controller.ui();
        let config = controller.config();
        let range = controller.range();

        let time_label = match state.duration {
            Some(duration) => format!(
                "{} / {}",
                format_timestamp(state.current_time),
                format_timestamp(duration)
            ),
            None => format_timestamp(state.current_time),
        };

        Self {
            play_icon: if state.playing {
                PlayIcon::Pause
            } else {
                PlayIcon::Play
            },
            sound_icon: if state.muted {
                SoundIcon::Muted
            } else {
                SoundIcon::Sound
            },
            lock_icon: range.map(|r| {
                if r.is_enabled() {
                    LockIcon::Locked
                } else {
                    LockIcon::Unlocked
                }
            }),
            progress: ui.progress,
            range_highlight: range.zip(state.duration).and_then(|(r, d)| r.highlight(d)),
            volume: ui.volume,
            volume_fill: controller.volume_fill_percent(),
            fullscreen_button: config.allow_fullscreen,
            visible: config.controls && ui.controls_visible,
            time_label,
        }
    }
}

/// Format seconds as `m:ss`, or `h:mm:ss` past an hour
pub fn format_timestamp(seconds: f64) -> String {
    let total_secs = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let hours = total_secs / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if hours > 0 {
        format!("{hours}:{mins:02}:{secs:02}")
    } else {
        format!("{mins}:{secs:02}")
    }
}
