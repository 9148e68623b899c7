//! WASM bindings for clip-player
//!
//! This module mounts the player into a browser page: it drives a real
//! `<video>` element, builds the control bar, and runs the frame loop
//! with `requestAnimationFrame`. The host page mounts players explicitly;
//! nothing is registered globally at load time.

pub mod element;
pub mod media;

pub use element::ClipPlayerElement;
pub use media::{DocumentFullscreen, WebMedia};

use wasm_bindgen::JsValue;

use crate::PlayerError;

impl From<PlayerError> for JsValue {
    fn from(error: PlayerError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

pub(crate) fn dom_error(error: JsValue) -> PlayerError {
    PlayerError::Dom(format!("{:?}", error))
}
