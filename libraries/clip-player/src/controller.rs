//! Player controller - core orchestration
//!
//! Mediates between the control bar and the media element: play/pause,
//! volume memory, scrubbing, restricted range enforcement and the
//! per-frame polling that mirrors the element's live position.

use std::time::Duration;

use tracing::{debug, warn};

use crate::{
    debounce::Debounce,
    error::{PlayerError, Result},
    events::PlayerEvent,
    media::{FullscreenHost, MediaElement},
    range::{RangeAction, RestrictedRange},
    types::{ClickTarget, MediaEvent, PlaybackState, PlayerConfig, TickOutcome, UiState},
    volume::Volume,
};

/// Progress slider value (0-100) for a position
///
/// Pinned to 0 while the duration is unknown or not a positive number.
pub fn progress_value(current_time: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(duration) if duration.is_finite() && duration > 0.0 => {
            let progress = current_time / duration * 100.0;
            if progress.is_nan() {
                0.0
            } else {
                progress.clamp(0.0, 100.0)
            }
        }
        _ => 0.0,
    }
}

/// Active drag of the progress slider
#[derive(Debug, Clone, Copy)]
struct ScrubSession {
    /// Playback was running when the drag began
    resume: bool,
}

/// Player controller
///
/// Play state follows the media element: every command is followed by a
/// read-back of `is_paused()`, so a refused `play()` never shows as playing.
pub struct PlayerController<M: MediaElement> {
    media: M,
    config: PlayerConfig,
    state: PlaybackState,
    range: Option<RestrictedRange>,
    volume: Volume,
    scrub: Option<ScrubSession>,
    ui: UiState,
    controls_hide: Debounce,
    attached: bool,
    pending_events: Vec<PlayerEvent>,
}

impl<M: MediaElement> PlayerController<M> {
    /// Create a controller and push the configuration to the media element
    ///
    /// The controller starts attached. Autoplay failures are logged and
    /// queued as [`PlayerEvent::Error`]; construction itself never fails.
    pub fn new(mut media: M, config: PlayerConfig) -> Self {
        let volume = Volume::new(config.volume, config.muted);

        media.set_volume(volume.level());
        media.set_muted(volume.is_muted());
        media.set_looping(config.looping);
        media.set_playback_rate(config.playback_rate);
        if let Some(start_at) = config.current_time.filter(|t| t.is_finite()) {
            media.set_current_time(start_at.max(0.0));
        }

        let range = RestrictedRange::from_bounds(config.start, config.end, config.restricted_enabled);

        let state = PlaybackState {
            playing: !media.is_paused(),
            muted: volume.is_muted(),
            volume: volume.level(),
            current_time: media.current_time(),
            duration: None,
            looping: config.looping,
        };

        let ui = UiState {
            progress: 0.0,
            volume: volume.level(),
            controls_visible: false,
        };

        let mut controller = Self {
            media,
            controls_hide: Debounce::new(config.controls_hide_delay()),
            config,
            state,
            range,
            volume,
            scrub: None,
            ui,
            attached: true,
            pending_events: Vec::new(),
        };

        controller.refresh_duration();

        if controller.config.autoplay {
            // Browsers may block autoplay; the error is already recorded
            let _ = controller.play();
        }

        controller
    }

    // ===== Playback Control =====

    /// Start or resume playback
    pub fn play(&mut self) -> Result<()> {
        let result = self.media.play();
        self.report(&result, "play");
        self.sync_playing();
        result
    }

    /// Pause playback
    pub fn pause(&mut self) -> Result<()> {
        let result = self.media.pause();
        self.report(&result, "pause");
        self.sync_playing();
        result
    }

    /// Play if paused, pause if playing
    pub fn toggle_playback(&mut self) -> Result<()> {
        if self.state.playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Handle a notification from the media element
    pub fn on_media_event(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::Play | MediaEvent::Pause | MediaEvent::Ended => self.sync_playing(),
            MediaEvent::LoadedMetadata => self.refresh_duration(),
            MediaEvent::VolumeChange => self.sync_volume_from_media(),
        }
    }

    /// Change looping at runtime
    pub fn set_looping(&mut self, looping: bool) {
        self.state.looping = looping;
        self.config.looping = looping;
        self.media.set_looping(looping);
    }

    pub fn set_playback_rate(&mut self, rate: f64) {
        if rate.is_finite() && rate > 0.0 {
            self.config.playback_rate = rate;
            self.media.set_playback_rate(rate);
        }
    }

    // ===== Volume =====

    /// Set volume (0.0-1.0)
    ///
    /// Zero mutes; a positive level unmutes.
    pub fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        self.apply_volume();
    }

    /// Toggle mute, restoring the last audible level on unmute
    pub fn toggle_mute(&mut self) {
        self.volume.toggle_mute();
        self.apply_volume();
    }

    /// Volume slider fill (0-100)
    pub fn volume_fill_percent(&self) -> f32 {
        self.volume.fill_percent()
    }

    // ===== Seeking =====

    /// Open a scrub session
    ///
    /// Pauses playback and remembers whether it should resume. The session
    /// stays open until [`seek`](Self::seek) or [`cancel_scrub`](Self::cancel_scrub).
    pub fn begin_scrub(&mut self) {
        if self.scrub.is_some() {
            return;
        }

        let resume = self.state.playing;
        if resume {
            let _ = self.pause();
        }

        debug!("Scrub started (resume on commit: {})", resume);
        self.scrub = Some(ScrubSession { resume });
    }

    /// Slider moved; the media position is left alone
    ///
    /// The first input opens the scrub session, so every session is
    /// followed by the slider's commit.
    pub fn scrub_input(&mut self, value: f64) {
        self.begin_scrub();
        self.set_progress(clamp_percent(value));
    }

    /// Close a scrub session without moving the media
    ///
    /// Resumes playback if it was running when the session opened. The
    /// progress slider returns to the live position on the next tick.
    pub fn cancel_scrub(&mut self) -> Result<()> {
        match self.scrub.take() {
            Some(ScrubSession { resume: true }) => {
                debug!("Scrub cancelled, resuming");
                self.play()
            }
            Some(_) => {
                debug!("Scrub cancelled");
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Commit a slider value (0-100) as the new position
    ///
    /// Ends any scrub session and resumes playback if it was running when
    /// the scrub began.
    pub fn seek(&mut self, value: f64) -> Result<()> {
        let value = clamp_percent(value);
        let session = self.scrub.take();

        match self.state.duration {
            Some(duration) => {
                let position = value / 100.0 * duration;
                self.media.set_current_time(position);
                self.state.current_time = position;
                debug!("Seek to {:.3}s ({:.1}%)", position, value);
                self.set_progress(value);
            }
            None => {
                debug!("Seek ignored, duration unknown");
                self.set_progress(0.0);
            }
        }

        match session {
            Some(ScrubSession { resume: true }) => self.play(),
            _ => Ok(()),
        }
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub.is_some()
    }

    // ===== Frame Loop =====

    /// Poll the media element once per rendered frame
    ///
    /// `now` is the host clock (time since any fixed origin). Returns
    /// [`TickOutcome::Stop`] once the player is detached.
    pub fn tick(&mut self, now: Duration) -> TickOutcome {
        if !self.attached {
            return TickOutcome::Stop;
        }

        self.refresh_duration();
        if self.media.ready_state().is_ready() {
            self.enforce_range();
        }
        self.sync_playing();
        self.state.current_time = self.media.current_time();

        let frozen = self.scrub.is_some() && self.config.freeze_progress_while_scrubbing;
        if !frozen {
            self.set_progress(progress_value(self.state.current_time, self.state.duration));
        }

        if self.controls_hide.poll(now) {
            self.set_controls_visible(false);
        }

        TickOutcome::Continue
    }

    // ===== Restricted Range =====

    /// Flip range enforcement
    ///
    /// Returns the new state; always `false` when no range is configured.
    pub fn toggle_restricted(&mut self) -> bool {
        let Some(range) = self.range.as_mut() else {
            return false;
        };

        let enabled = range.toggle();
        self.pending_events
            .push(PlayerEvent::RangeToggled { enabled });
        enabled
    }

    // ===== Fullscreen =====

    /// Enter fullscreen unless something already is
    pub fn request_fullscreen<F: FullscreenHost + ?Sized>(&self, host: &mut F) -> Result<()> {
        if !self.config.allow_fullscreen {
            return Err(PlayerError::FullscreenNotAllowed);
        }
        if host.is_fullscreen() {
            return Ok(());
        }
        host.request_fullscreen()
    }

    /// Leave fullscreen if currently fullscreen
    pub fn exit_fullscreen<F: FullscreenHost + ?Sized>(&self, host: &mut F) -> Result<()> {
        if !host.is_fullscreen() {
            return Ok(());
        }
        host.exit_fullscreen()
    }

    pub fn toggle_fullscreen<F: FullscreenHost + ?Sized>(&self, host: &mut F) -> Result<()> {
        if host.is_fullscreen() {
            self.exit_fullscreen(host)
        } else {
            self.request_fullscreen(host)
        }
    }

    // ===== Controls =====

    /// Pointer moved over the container: show controls and restart the hide countdown
    pub fn pointer_moved(&mut self, now: Duration) {
        if !self.config.controls || !self.attached {
            return;
        }

        self.set_controls_visible(true);
        self.controls_hide.schedule(now);
    }

    /// Click on the container
    ///
    /// Clicks inside the control bar never reach the surface handler.
    pub fn container_clicked(&mut self, target: ClickTarget) -> Result<()> {
        match target {
            ClickTarget::Surface => self.toggle_playback(),
            ClickTarget::ControlBar => Ok(()),
        }
    }

    // ===== Lifetime =====

    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// End the attached lifetime; pending timers are dropped and the next
    /// tick reports [`TickOutcome::Stop`]
    pub fn detach(&mut self) {
        self.attached = false;
        self.scrub = None;
        self.controls_hide.cancel();
        if self.ui.controls_visible {
            self.set_controls_visible(false);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ===== State Queries =====

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn range(&self) -> Option<&RestrictedRange> {
        self.range.as_ref()
    }

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    // ===== Events =====

    /// Take all queued events
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn enforce_range(&mut self) {
        let Some(range) = self.range else {
            return;
        };

        let position = self.media.current_time();
        let action = range.enforce(position, self.state.looping);
        if action == RangeAction::Hold {
            return;
        }

        self.media.set_current_time(range.start());
        let paused = action == RangeAction::SnapToStartAndPause;
        if paused {
            let _ = self.pause();
        }

        debug!(
            "Range snap {:.3}s -> {:.3}s (paused: {})",
            position,
            range.start(),
            paused
        );
        self.pending_events.push(PlayerEvent::RangeSnapped {
            from: position,
            to: range.start(),
            paused,
        });
    }

    fn refresh_duration(&mut self) {
        let duration = if self.media.ready_state().is_ready() {
            self.media
                .duration()
                .filter(|d| d.is_finite() && *d > 0.0)
        } else {
            None
        };

        if duration != self.state.duration {
            self.state.duration = duration;
            if let Some(duration) = duration {
                self.pending_events
                    .push(PlayerEvent::DurationKnown { duration });
            }
        }
    }

    fn sync_playing(&mut self) {
        let playing = !self.media.is_paused();
        if playing != self.state.playing {
            self.state.playing = playing;
            self.pending_events
                .push(PlayerEvent::PlayingChanged { playing });
        }
    }

    fn sync_volume_from_media(&mut self) {
        let level = if self.media.is_muted() {
            0.0
        } else {
            self.media.volume()
        };

        if level != self.volume.level() {
            self.volume.set_level(level);
            self.apply_volume();
        }
    }

    fn apply_volume(&mut self) {
        let level = self.volume.level();
        let muted = self.volume.is_muted();

        self.media.set_volume(level);
        self.media.set_muted(muted);
        self.state.volume = level;
        self.state.muted = muted;
        self.ui.volume = level;

        self.pending_events.push(PlayerEvent::VolumeChanged {
            level,
            is_muted: muted,
        });
    }

    fn set_progress(&mut self, progress: f64) {
        if progress != self.ui.progress {
            self.ui.progress = progress;
            self.pending_events.push(PlayerEvent::ProgressChanged {
                progress,
                current_time: self.state.current_time,
            });
        }
    }

    fn set_controls_visible(&mut self, visible: bool) {
        if visible != self.ui.controls_visible {
            self.ui.controls_visible = visible;
            self.pending_events
                .push(PlayerEvent::ControlsVisibilityChanged { visible });
        }
    }

    fn report(&mut self, result: &Result<()>, command: &str) {
        if let Err(e) = result {
            warn!("Media rejected {}: {}", command, e);
            self.pending_events.push(PlayerEvent::Error {
                message: e.to_string(),
            });
        }
    }
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}
