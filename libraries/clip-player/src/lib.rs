//! Clip Player - Video Clip Playback Widget
//!
//! Platform-agnostic playback control for a looping video clip player.
//!
//! This crate provides:
//! - Play/pause driven by the media element's real state
//! - Volume control (0.0-1.0, mute with level memory)
//! - Progress scrubbing (pause while dragging, resume on release)
//! - Restricted range playback (hold position inside `[start, end)`)
//! - Auto-hiding control bar (trailing-edge debounce)
//! - Fullscreen toggling through the host
//!
//! # Architecture
//!
//! `clip-player` is completely platform-agnostic:
//! - No dependency on a DOM unless the `wasm` feature is enabled
//! - No timers or threads; the host drives `tick()` once per frame
//!
//! The media element and fullscreen capability are provided via traits.
//!
//! # Example: Basic Playback
//!
//! ```rust,no_run
//! use clip_player::{PlayerConfig, PlayerController, MediaElement};
//! use std::time::Duration;
//!
//! fn run<M: MediaElement>(video: M) {
//!     let config = PlayerConfig {
//!         start: Some(10.0),
//!         end: Some(20.0),
//!         ..PlayerConfig::default()
//!     };
//!     let mut player = PlayerController::new(video, config);
//!
//!     player.set_volume(0.5);
//!     player.play().ok();
//!
//!     // Once per animation frame
//!     player.tick(Duration::from_millis(16));
//!     for event in player.drain_events() {
//!         println!("{event:?}");
//!     }
//! }
//! ```
//!
//! # Example: Scrubbing
//!
//! ```rust,no_run
//! # use clip_player::{PlayerController, MediaElement};
//! # fn scrub<M: MediaElement>(player: &mut PlayerController<M>) {
//! player.begin_scrub(); // pointer down on the progress slider
//! player.scrub_input(62.0); // dragging
//! player.seek(80.0).ok(); // released: position = 80% of duration
//! # }
//! ```

mod controller;
mod debounce;
mod error;
mod events;
mod media;
mod presentation;
mod range;
pub mod types;
mod volume;

#[cfg(feature = "wasm")]
#[allow(unsafe_code)]
pub mod wasm;

// Public exports
pub use controller::{progress_value, PlayerController};
pub use debounce::Debounce;
pub use error::{PlayerError, Result};
pub use events::PlayerEvent;
pub use media::{FullscreenHost, MediaElement};
pub use presentation::{format_timestamp, ControlBarView, LockIcon, PlayIcon, SoundIcon};
pub use range::{RangeAction, RangeHighlight, RestrictedRange};
pub use types::{
    ClickTarget, MediaEvent, PlaybackState, PlayerConfig, ReadyState, TickOutcome, UiState,
};
pub use volume::Volume;
