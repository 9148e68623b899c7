//! Core types for the clip player

use serde::{Deserialize, Serialize};

/// Default quiet period before the control bar hides (milliseconds)
pub const DEFAULT_CONTROLS_HIDE_DELAY_MS: u64 = 3000;

/// Live playback state mirrored from the media element
///
/// Mutated only by [`crate::PlayerController`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Media is currently playing
    pub playing: bool,

    /// Audio is muted
    pub muted: bool,

    /// Volume level (0.0-1.0)
    pub volume: f32,

    /// Playback position in seconds
    pub current_time: f64,

    /// Media duration in seconds, `None` until the element is ready
    pub duration: Option<f64>,

    /// Restart from the beginning (or range start) when the end is reached
    pub looping: bool,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            playing: false,
            muted: false,
            volume: 1.0,
            current_time: 0.0,
            duration: None,
            looping: false,
        }
    }
}

/// Derived control values, recomputed on every tick and input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    /// Progress slider value (0-100)
    pub progress: f64,

    /// Volume slider value (0.0-1.0)
    pub volume: f32,

    /// Whether the transient control bar is shown
    pub controls_visible: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            progress: 0.0,
            volume: 1.0,
            controls_visible: false,
        }
    }
}

/// Readiness reported by the media element
///
/// Mirrors the HTML media `readyState` ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReadyState {
    /// Nothing known about the media yet
    HaveNothing,

    /// Duration and dimensions are known
    HaveMetadata,

    /// Data for the current position is available
    HaveCurrentData,

    /// Data past the current position is available
    HaveFutureData,

    /// Enough data to play through
    HaveEnoughData,
}

impl ReadyState {
    /// Whether metadata (duration) can be trusted
    pub fn is_ready(self) -> bool {
        self >= ReadyState::HaveMetadata
    }

    /// Convert a raw HTML `readyState` number
    pub fn from_raw(value: u16) -> Self {
        match value {
            0 => ReadyState::HaveNothing,
            1 => ReadyState::HaveMetadata,
            2 => ReadyState::HaveCurrentData,
            3 => ReadyState::HaveFutureData,
            _ => ReadyState::HaveEnoughData,
        }
    }
}

/// Notifications raised by the media element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaEvent {
    /// Playback started
    Play,

    /// Playback paused
    Pause,

    /// Playback reached the end of the media
    Ended,

    /// Duration became available
    LoadedMetadata,

    /// Volume or mute changed outside the controller
    VolumeChange,
}

/// Where a click on the player landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The video surface itself
    Surface,

    /// Anywhere inside the control bar
    ControlBar,
}

/// Whether the frame loop should be rescheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Schedule the next frame
    Continue,

    /// Player detached, stop scheduling
    Stop,
}

/// Player configuration
///
/// Mirrors the element attributes. Field names deserialize from camelCase
/// so a JS options object maps directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlayerConfig {
    /// Media URL
    pub src: Option<String>,

    /// Start playing as soon as possible (default: false)
    pub autoplay: bool,

    /// Start muted (default: false)
    pub muted: bool,

    /// Loop playback (default: false)
    #[serde(rename = "loop")]
    pub looping: bool,

    /// Show the fullscreen button and allow fullscreen requests (default: false)
    #[serde(rename = "allowfullscreen")]
    pub allow_fullscreen: bool,

    /// Render the control bar (default: true)
    pub controls: bool,

    /// Restricted range start in seconds
    pub start: Option<f64>,

    /// Restricted range end in seconds
    pub end: Option<f64>,

    /// Playback rate multiplier (default: 1.0)
    pub playback_rate: f64,

    /// Initial playback position in seconds
    pub current_time: Option<f64>,

    /// Initial volume 0.0-1.0 (default: 1.0)
    pub volume: f32,

    /// Restricted range enforcement starts enabled (default: true)
    pub restricted_enabled: bool,

    /// Hold the progress slider still while the user drags it (default: true)
    pub freeze_progress_while_scrubbing: bool,

    /// Pointer quiet period before the control bar hides (default: 3000)
    pub controls_hide_delay_ms: u64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            src: None,
            autoplay: false,
            muted: false,
            looping: false,
            allow_fullscreen: false,
            controls: true,
            start: None,
            end: None,
            playback_rate: 1.0,
            current_time: None,
            volume: 1.0,
            restricted_enabled: true,
            freeze_progress_while_scrubbing: true,
            controls_hide_delay_ms: DEFAULT_CONTROLS_HIDE_DELAY_MS,
        }
    }
}

impl PlayerConfig {
    /// Build a config from HTML-style attribute pairs
    ///
    /// Boolean attributes are true when present unless their value is
    /// `"false"`. Numeric attributes that fail to parse are skipped.
    /// Unknown attributes are ignored.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut config = Self::default();

        for (name, value) in attributes {
            match name.to_ascii_lowercase().as_str() {
                "src" => {
                    let value = value.trim();
                    config.src = (!value.is_empty()).then(|| value.to_string());
                }
                "autoplay" => config.autoplay = parse_flag(value),
                "muted" => config.muted = parse_flag(value),
                "loop" => config.looping = parse_flag(value),
                "allowfullscreen" => config.allow_fullscreen = parse_flag(value),
                "controls" => config.controls = parse_flag(value),
                "start" => config.start = parse_number(name, value).or(config.start),
                "end" => config.end = parse_number(name, value).or(config.end),
                "playbackrate" => {
                    if let Some(rate) = parse_number(name, value).filter(|r| *r > 0.0) {
                        config.playback_rate = rate;
                    }
                }
                "currenttime" => {
                    config.current_time = parse_number(name, value).or(config.current_time);
                }
                "volume" => {
                    if let Some(volume) = parse_number(name, value) {
                        config.volume = (volume as f32).clamp(0.0, 1.0);
                    }
                }
                _ => {}
            }
        }

        config
    }

    /// Quiet period before the control bar hides
    pub fn controls_hide_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.controls_hide_delay_ms)
    }
}

fn parse_flag(value: &str) -> bool {
    !value.trim().eq_ignore_ascii_case("false")
}

fn parse_number(name: &str, value: &str) -> Option<f64> {
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Some(number),
        _ => {
            tracing::warn!("Ignoring attribute {}={:?}: not a finite number", name, value);
            None
        }
    }
}
