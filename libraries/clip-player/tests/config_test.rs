//! Configuration loading tests
//!
//! Options arrive either as a JS object (camelCase keys, decoded through
//! serde) or as raw element attributes.

use clip_player::{PlayerConfig, RestrictedRange};

#[test]
fn deserializes_attribute_names() {
    let config: PlayerConfig = serde_json::from_str(
        r#"{
            "src": "/clips/demo.webm",
            "autoplay": true,
            "loop": true,
            "allowfullscreen": true,
            "start": 4.5,
            "end": 9,
            "playbackRate": 0.5,
            "currentTime": 5,
            "volume": 0.3
        }"#,
    )
    .unwrap();

    assert_eq!(config.src.as_deref(), Some("/clips/demo.webm"));
    assert!(config.autoplay);
    assert!(config.looping);
    assert!(config.allow_fullscreen);
    assert_eq!(config.start, Some(4.5));
    assert_eq!(config.end, Some(9.0));
    assert_eq!(config.playback_rate, 0.5);
    assert_eq!(config.current_time, Some(5.0));
    assert_eq!(config.volume, 0.3);
}

#[test]
fn missing_fields_use_defaults() {
    let config: PlayerConfig = serde_json::from_str(r#"{ "src": "a.mp4" }"#).unwrap();
    let defaults = PlayerConfig::default();

    assert_eq!(config.controls, defaults.controls);
    assert_eq!(config.volume, defaults.volume);
    assert_eq!(config.controls_hide_delay_ms, 3000);
    assert!(config.freeze_progress_while_scrubbing);
}

#[test]
fn variant_flags_deserialize() {
    let config: PlayerConfig = serde_json::from_str(
        r#"{ "restrictedEnabled": false, "freezeProgressWhileScrubbing": false, "controlsHideDelayMs": 1200 }"#,
    )
    .unwrap();

    assert!(!config.restricted_enabled);
    assert!(!config.freeze_progress_while_scrubbing);
    assert_eq!(config.controls_hide_delay_ms, 1200);
}

#[test]
fn attributes_round_into_range() {
    let config = PlayerConfig::from_attributes([("start", "12"), ("end", "18"), ("loop", "")]);
    let range = RestrictedRange::from_bounds(config.start, config.end, config.restricted_enabled)
        .expect("range configured");

    assert_eq!(range.start(), 12.0);
    assert_eq!(range.end(), 18.0);
    assert!(range.is_enabled());
    assert!(config.looping);
}

#[test]
fn attribute_names_are_case_insensitive() {
    let config = PlayerConfig::from_attributes([("PlaybackRate", "2"), ("AllowFullscreen", "")]);
    assert_eq!(config.playback_rate, 2.0);
    assert!(config.allow_fullscreen);
}
