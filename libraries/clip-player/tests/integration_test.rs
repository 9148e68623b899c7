//! Integration tests for the player controller
//!
//! These tests drive the controller the way a host does: user gestures,
//! media notifications and one `tick` per frame against a media element
//! whose clock actually advances while playing.

use clip_player::{
    ClickTarget, ControlBarView, MediaElement, MediaEvent, PlayIcon, PlayerConfig,
    PlayerController, PlayerError, PlayerEvent, ReadyState, TickOutcome,
};
use std::time::Duration;

// ===== Test Helpers =====

/// Mock media element with a frame-stepped clock
struct MockMedia {
    paused: bool,
    position: f64,
    duration: f64,
    ready: ReadyState,
    volume: f32,
    muted: bool,
    looping: bool,
    rate: f64,
    seeks: Vec<f64>,
}

impl MockMedia {
    fn new(duration: f64) -> Self {
        Self {
            paused: true,
            position: 0.0,
            duration,
            ready: ReadyState::HaveEnoughData,
            volume: 1.0,
            muted: false,
            looping: false,
            rate: 1.0,
            seeks: Vec::new(),
        }
    }

    fn loading(duration: f64) -> Self {
        Self {
            ready: ReadyState::HaveNothing,
            ..Self::new(duration)
        }
    }

    /// Advance playback by `secs` of wall time
    fn advance(&mut self, secs: f64) {
        if self.paused {
            return;
        }
        self.position += secs * self.rate;
        if self.position >= self.duration {
            if self.looping {
                self.position %= self.duration;
            } else {
                self.position = self.duration;
                self.paused = true;
            }
        }
    }
}

impl MediaElement for MockMedia {
    fn play(&mut self) -> clip_player::Result<()> {
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) -> clip_player::Result<()> {
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
        self.seeks.push(seconds);
        self.position = seconds.clamp(0.0, self.duration);
    }

    fn duration(&self) -> Option<f64> {
        self.ready.is_ready().then_some(self.duration)
    }

    fn ready_state(&self) -> ReadyState {
        self.ready
    }

    fn volume(&self) -> f32 {
        self.volume
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
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

/// Host clock for a frame loop at ~60 fps
struct Frames {
    now: Duration,
}

impl Frames {
    const FRAME: Duration = Duration::from_millis(16);

    fn new() -> Self {
        Self { now: Duration::ZERO }
    }

    /// Advance media and tick once
    fn step(&mut self, player: &mut PlayerController<MockMedia>) -> TickOutcome {
        self.now += Self::FRAME;
        player.media_mut().advance(Self::FRAME.as_secs_f64());
        player.tick(self.now)
    }

    /// Run frames for `secs` seconds of host time
    fn run(&mut self, player: &mut PlayerController<MockMedia>, secs: f64) {
        let frames = (secs / Self::FRAME.as_secs_f64()).ceil() as usize;
        for _ in 0..frames {
            self.step(player);
        }
    }
}

fn ranged(start: f64, end: f64) -> PlayerConfig {
    PlayerConfig {
        start: Some(start),
        end: Some(end),
        ..PlayerConfig::default()
    }
}

// ===== Restricted Range =====

#[test]
fn test_range_end_pauses_and_rewinds_without_loop() {
    let mut player = PlayerController::new(MockMedia::new(100.0), ranged(10.0, 20.0));
    let mut frames = Frames::new();

    player.play().unwrap();
    frames.step(&mut player);
    assert_eq!(player.state().current_time, 10.0, "should start at range start");

    player.media_mut().position = 20.0;
    frames.step(&mut player);

    assert_eq!(player.media().position, 10.0);
    assert!(!player.state().playing);
    assert_eq!(player.ui().progress, 10.0);
}

#[test]
fn test_range_loops_while_playing() {
    let config = PlayerConfig {
        looping: true,
        ..ranged(10.0, 12.0)
    };
    let mut player = PlayerController::new(MockMedia::new(100.0), config);
    let mut frames = Frames::new();

    player.play().unwrap();
    frames.run(&mut player, 5.0);

    assert!(player.state().playing);
    let position = player.state().current_time;
    assert!(
        (10.0..12.0).contains(&position),
        "position {position} escaped the range"
    );

    let snaps = player
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, PlayerEvent::RangeSnapped { paused: false, .. }))
        .count();
    assert!(snaps >= 2, "expected repeated loop snaps, got {snaps}");
}

#[test]
fn test_unlocking_range_lets_playback_continue() {
    let mut player = PlayerController::new(MockMedia::new(100.0), ranged(10.0, 12.0));
    let mut frames = Frames::new();

    player.play().unwrap();
    frames.step(&mut player);
    assert!(!player.toggle_restricted());

    frames.run(&mut player, 5.0);
    assert!(player.state().current_time > 12.0);
    assert!(player.state().playing);
}

#[test]
fn test_invalid_range_disables_range_features() {
    let mut player = PlayerController::new(MockMedia::new(100.0), ranged(30.0, 20.0));
    let mut frames = Frames::new();

    assert!(player.range().is_none());
    assert!(!player.toggle_restricted());

    player.play().unwrap();
    frames.run(&mut player, 1.0);
    assert!(player.state().current_time < 2.0);

    let view = ControlBarView::from_controller(&player);
    assert!(view.lock_icon.is_none());
    assert!(view.range_highlight.is_none());
}

// ===== Scrubbing =====

#[test]
fn test_scrub_while_playing_resumes_at_commit() {
    let mut player = PlayerController::new(MockMedia::new(100.0), PlayerConfig::default());
    let mut frames = Frames::new();

    player.media_mut().position = 50.0;
    player.play().unwrap();
    frames.step(&mut player);

    player.begin_scrub();
    assert!(!player.state().playing, "playback pauses while dragging");

    for value in [55.0, 63.0, 71.0, 80.0] {
        player.scrub_input(value);
        frames.step(&mut player);
        assert_eq!(player.ui().progress, value);
    }
    assert!(player.media().seeks.is_empty(), "dragging must not seek");

    player.seek(80.0).unwrap();
    assert_eq!(player.media().position, 80.0);
    assert!(player.state().playing);

    frames.run(&mut player, 1.0);
    assert!(player.state().current_time > 80.0);
}

#[test]
fn test_scrub_while_paused_stays_paused() {
    let mut player = PlayerController::new(MockMedia::new(200.0), PlayerConfig::default());
    let mut frames = Frames::new();
    frames.step(&mut player);

    player.begin_scrub();
    player.scrub_input(25.0);
    player.seek(25.0).unwrap();
    frames.run(&mut player, 0.5);

    assert!(!player.state().playing);
    assert_eq!(player.state().current_time, 50.0);
    assert_eq!(player.ui().progress, 25.0);
}

#[test]
fn test_press_without_drag_does_not_stick() {
    let mut player = PlayerController::new(MockMedia::new(100.0), PlayerConfig::default());
    let mut frames = Frames::new();

    player.media_mut().position = 30.0;
    player.play().unwrap();
    frames.step(&mut player);

    // Released on the thumb: no input, no change
    player.begin_scrub();
    player.cancel_scrub().unwrap();
    assert!(!player.is_scrubbing());
    assert!(player.state().playing);
    assert!(player.media().seeks.is_empty());

    frames.run(&mut player, 1.0);
    let expected = player.state().current_time;
    assert!(expected > 30.0);
    assert!((player.ui().progress - expected).abs() < 1e-9, "progress follows playback");
}

#[test]
fn test_scrub_opened_by_first_input() {
    let mut player = PlayerController::new(MockMedia::new(100.0), PlayerConfig::default());
    let mut frames = Frames::new();

    player.play().unwrap();
    frames.step(&mut player);

    player.scrub_input(40.0);
    assert!(player.is_scrubbing());
    assert!(!player.state().playing);

    player.seek(40.0).unwrap();
    assert!(player.state().playing);
    assert_eq!(player.media().position, 40.0);
}

#[test]
fn test_seek_before_ready_is_ignored() {
    let mut player = PlayerController::new(MockMedia::loading(100.0), PlayerConfig::default());
    let mut frames = Frames::new();
    frames.step(&mut player);

    player.seek(60.0).unwrap();
    assert!(player.media().seeks.is_empty());
    assert_eq!(player.ui().progress, 0.0);

    player.media_mut().ready = ReadyState::HaveMetadata;
    player.on_media_event(MediaEvent::LoadedMetadata);
    assert_eq!(player.state().duration, Some(100.0));

    player.seek(60.0).unwrap();
    assert_eq!(player.media().position, 60.0);
}

// ===== Volume =====

#[test]
fn test_volume_slider_and_mute_button() {
    let mut player = PlayerController::new(MockMedia::new(100.0), PlayerConfig::default());

    player.set_volume(0.35);
    assert_eq!(player.media().volume, 0.35);
    assert_eq!(player.volume_fill_percent(), 35.0);

    player.toggle_mute();
    assert!(player.state().muted);
    assert!(player.media().muted);

    player.set_volume(0.6);
    assert!(!player.state().muted, "raising the slider unmutes");
    assert!(!player.media().muted);

    player.set_volume(0.0);
    assert!(player.state().muted);

    player.toggle_mute();
    assert_eq!(player.state().volume, 0.6);
}

#[test]
fn test_start_muted_then_unmute() {
    let config = PlayerConfig {
        muted: true,
        volume: 0.5,
        ..PlayerConfig::default()
    };
    let mut player = PlayerController::new(MockMedia::new(100.0), config);
    assert!(player.media().muted);

    player.toggle_mute();
    assert!(!player.state().muted);
    assert_eq!(player.media().volume, 0.5);
}

// ===== Controls & Clicks =====

#[test]
fn test_controls_hide_after_pointer_quiet_period() {
    let mut player = PlayerController::new(MockMedia::new(100.0), PlayerConfig::default());
    let mut frames = Frames::new();

    player.pointer_moved(frames.now);
    frames.run(&mut player, 2.0);
    assert!(player.ui().controls_visible);

    // Movement inside the window restarts the countdown
    player.pointer_moved(frames.now);
    frames.run(&mut player, 2.5);
    assert!(player.ui().controls_visible);

    frames.run(&mut player, 0.6);
    assert!(!player.ui().controls_visible);

    let visibility: Vec<bool> = player
        .drain_events()
        .into_iter()
        .filter_map(|e| match e {
            PlayerEvent::ControlsVisibilityChanged { visible } => Some(visible),
            _ => None,
        })
        .collect();
    assert_eq!(visibility, vec![true, false]);
}

#[test]
fn test_custom_hide_delay() {
    let config = PlayerConfig {
        controls_hide_delay_ms: 500,
        ..PlayerConfig::default()
    };
    let mut player = PlayerController::new(MockMedia::new(100.0), config);
    let mut frames = Frames::new();

    player.pointer_moved(frames.now);
    frames.run(&mut player, 0.6);
    assert!(!player.ui().controls_visible);
}

#[test]
fn test_surface_click_toggles_but_control_bar_does_not() {
    let mut player = PlayerController::new(MockMedia::new(100.0), PlayerConfig::default());

    player.container_clicked(ClickTarget::Surface).unwrap();
    assert!(player.state().playing);
    assert_eq!(
        ControlBarView::from_controller(&player).play_icon,
        PlayIcon::Pause
    );

    player.container_clicked(ClickTarget::ControlBar).unwrap();
    assert!(player.state().playing);

    player.container_clicked(ClickTarget::Surface).unwrap();
    assert!(!player.state().playing);
}

// ===== Playback =====

#[test]
fn test_media_ending_is_reflected() {
    let mut player = PlayerController::new(MockMedia::new(1.0), PlayerConfig::default());
    let mut frames = Frames::new();

    player.play().unwrap();
    frames.run(&mut player, 1.5);
    player.on_media_event(MediaEvent::Ended);

    assert!(!player.state().playing);
    assert_eq!(player.ui().progress, 100.0);
}

#[test]
fn test_playback_rate_applies() {
    let config = PlayerConfig {
        playback_rate: 2.0,
        ..PlayerConfig::default()
    };
    let mut player = PlayerController::new(MockMedia::new(100.0), config);
    let mut frames = Frames::new();

    player.play().unwrap();
    frames.run(&mut player, 1.0);
    assert!(player.state().current_time > 1.9);
}

#[test]
fn test_detach_stops_frame_loop() {
    let mut player = PlayerController::new(MockMedia::new(100.0), ranged(10.0, 20.0));
    let mut frames = Frames::new();

    player.pointer_moved(frames.now);
    assert_eq!(frames.step(&mut player), TickOutcome::Continue);

    player.detach();
    player.media_mut().position = 90.0;
    assert_eq!(frames.step(&mut player), TickOutcome::Stop);
    assert_eq!(player.media().position, 90.0, "detached player must not touch media");
    assert!(!player.ui().controls_visible);
}

#[test]
fn test_fullscreen_refused_without_permission() {
    struct NoScreen;

    impl clip_player::FullscreenHost for NoScreen {
        fn is_fullscreen(&self) -> bool {
            false
        }

        fn request_fullscreen(&mut self) -> clip_player::Result<()> {
            panic!("must not be requested");
        }

        fn exit_fullscreen(&mut self) -> clip_player::Result<()> {
            Ok(())
        }
    }

    let player = PlayerController::new(MockMedia::new(100.0), PlayerConfig::default());
    let result = player.toggle_fullscreen(&mut NoScreen);
    assert!(matches!(result, Err(PlayerError::FullscreenNotAllowed)));
}
