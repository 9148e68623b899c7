//! Browser implementations of the host capabilities

use std::{fmt, rc::Rc};

use wasm_bindgen::{closure::Closure, JsValue};
use web_sys::{Document, HtmlElement, HtmlVideoElement};

use crate::{
    error::{PlayerError, Result},
    media::{FullscreenHost, MediaElement},
    types::ReadyState,
};

/// `MediaElement` over the browser's `<video>` element
#[derive(Clone)]
pub struct WebMedia {
    video: HtmlVideoElement,
    /// Rejection handler shared by every `play()` promise
    on_play_rejected: Rc<Closure<dyn FnMut(JsValue)>>,
}

impl WebMedia {
    pub fn new(video: HtmlVideoElement) -> Self {
        let on_play_rejected = Closure::<dyn FnMut(JsValue)>::new(|reason: JsValue| {
            tracing::debug!("play() rejected: {:?}", reason);
        });

        Self {
            video,
            on_play_rejected: Rc::new(on_play_rejected),
        }
    }

    pub fn video_element(&self) -> &HtmlVideoElement {
        &self.video
    }
}

impl MediaElement for WebMedia {
    fn play(&mut self) -> Result<()> {
        // A rejection (blocked autoplay) leaves the element paused, which the
        // controller reads back on the next pause event or tick.
        let promise = self
            .video
            .play()
            .map_err(|e| PlayerError::Media(format!("{:?}", e)))?;
        let _ = promise.catch(&self.on_play_rejected);
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        self.video
            .pause()
            .map_err(|e| PlayerError::Media(format!("{:?}", e)))
    }

    fn is_paused(&self) -> bool {
        self.video.paused()
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.video.set_current_time(seconds);
    }

    fn duration(&self) -> Option<f64> {
        // NaN before metadata, +Inf for live streams
        let duration = self.video.duration();
        duration.is_finite().then_some(duration)
    }

    fn ready_state(&self) -> ReadyState {
        ReadyState::from_raw(self.video.ready_state())
    }

    fn volume(&self) -> f32 {
        self.video.volume() as f32
    }

    fn set_volume(&mut self, volume: f32) {
        self.video.set_volume(f64::from(volume));
    }

    fn is_muted(&self) -> bool {
        self.video.muted()
    }

    fn set_muted(&mut self, muted: bool) {
        self.video.set_muted(muted);
    }

    fn set_looping(&mut self, looping: bool) {
        self.video.set_loop(looping);
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.video.set_playback_rate(rate);
    }
}

impl fmt::Debug for WebMedia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebMedia").field("video", &self.video).finish()
    }
}

/// Fullscreen API on the player container
pub struct DocumentFullscreen {
    document: Document,
    container: HtmlElement,
}

impl DocumentFullscreen {
    pub fn new(document: Document, container: HtmlElement) -> Self {
        Self {
            document,
            container,
        }
    }
}

impl FullscreenHost for DocumentFullscreen {
    fn is_fullscreen(&self) -> bool {
        self.document.fullscreen_element().is_some()
    }

    fn request_fullscreen(&mut self) -> Result<()> {
        self.container
            .request_fullscreen()
            .map_err(|e| PlayerError::Fullscreen(format!("{:?}", e)))
    }

    fn exit_fullscreen(&mut self) -> Result<()> {
        self.document.exit_fullscreen();
        Ok(())
    }
}
