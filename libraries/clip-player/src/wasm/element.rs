//! Browser-mounted clip player
//!
//! Owns the `<video>` element, the control bar nodes, the DOM listeners and
//! the `requestAnimationFrame` loop. All of them are released on `unmount()`
//! (or when the JS handle is freed).

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use js_sys::Function;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlVideoElement};

use super::{
    dom_error,
    media::{DocumentFullscreen, WebMedia},
};
use crate::{
    error::{PlayerError, Result},
    presentation::{ControlBarView, LockIcon, PlayIcon, SoundIcon},
    types::{ClickTarget, MediaEvent, PlayerConfig, TickOutcome},
    PlayerController,
};

/// Nodes the player renders into
struct Dom {
    document: Document,
    container: HtmlElement,
    video: HtmlVideoElement,
    bar: HtmlElement,
    play_button: HtmlElement,
    mute_button: HtmlElement,
    lock_button: Option<HtmlElement>,
    fullscreen_button: Option<HtmlElement>,
    progress: HtmlInputElement,
    highlight: HtmlElement,
    volume: HtmlInputElement,
    time: HtmlElement,
}

impl Dom {
    fn build(document: Document, container: HtmlElement, config: &PlayerConfig) -> Result<Self> {
        let src = config.src.as_deref().ok_or(PlayerError::MissingSource)?;

        let video: HtmlVideoElement = create(&document, "video", "clip-player__video")?;
        video.set_src(src);
        video.set_preload("auto");
        video.set_attribute("playsinline", "true").ok();

        let bar: HtmlElement = create(&document, "div", "clip-player__controls")?;
        let play_button: HtmlElement = create(&document, "button", "clip-player__play")?;

        let track: HtmlElement = create(&document, "div", "clip-player__track")?;
        let highlight: HtmlElement = create(&document, "div", "clip-player__range")?;
        let progress: HtmlInputElement = create(&document, "input", "clip-player__progress")?;
        progress.set_type("range");
        progress.set_min("0");
        progress.set_max("100");
        progress.set_step("any");
        progress.set_value("0");
        append(&track, &highlight)?;
        append(&track, &progress)?;

        let time: HtmlElement = create(&document, "span", "clip-player__time")?;
        let mute_button: HtmlElement = create(&document, "button", "clip-player__mute")?;

        let volume: HtmlInputElement = create(&document, "input", "clip-player__volume")?;
        volume.set_type("range");
        volume.set_min("0");
        volume.set_max("1");
        volume.set_step("any");

        let lock_button = if config.start.is_some() && config.end.is_some() {
            Some(create::<HtmlElement>(&document, "button", "clip-player__lock")?)
        } else {
            None
        };

        let fullscreen_button = if config.allow_fullscreen {
            let button: HtmlElement = create(&document, "button", "clip-player__fullscreen")?;
            let enter: HtmlElement = create(&document, "span", "clip-player__fullscreen-enter")?;
            let exit: HtmlElement = create(&document, "span", "clip-player__fullscreen-exit")?;
            append(&button, &enter)?;
            append(&button, &exit)?;
            Some(button)
        } else {
            None
        };

        append(&bar, &play_button)?;
        append(&bar, &track)?;
        append(&bar, &time)?;
        if let Some(ref lock) = lock_button {
            append(&bar, lock)?;
        }
        append(&bar, &mute_button)?;
        append(&bar, &volume)?;
        if let Some(ref fullscreen) = fullscreen_button {
            append(&bar, fullscreen)?;
        }

        append(&container, &video)?;
        if config.controls {
            append(&container, &bar)?;
        }

        Ok(Self {
            document,
            container,
            video,
            bar,
            play_button,
            mute_button,
            lock_button,
            fullscreen_button,
            progress,
            highlight,
            volume,
            time,
        })
    }

    fn render(&self, view: &ControlBarView) {
        let play = match view.play_icon {
            PlayIcon::Play => "play",
            PlayIcon::Pause => "pause",
        };
        self.play_button.set_attribute("data-icon", play).ok();

        let sound = match view.sound_icon {
            SoundIcon::Sound => "sound",
            SoundIcon::Muted => "muted",
        };
        self.mute_button.set_attribute("data-icon", sound).ok();

        if let (Some(button), Some(icon)) = (&self.lock_button, view.lock_icon) {
            let lock = match icon {
                LockIcon::Locked => "locked",
                LockIcon::Unlocked => "unlocked",
            };
            button.set_attribute("data-icon", lock).ok();
        }

        self.progress.set_value(&view.progress.to_string());

        let style = self.highlight.style();
        match view.range_highlight {
            Some(highlight) => {
                style.set_property("display", "block").ok();
                style.set_property("left", &format!("{}%", highlight.left)).ok();
                style.set_property("width", &format!("{}%", highlight.width)).ok();
            }
            None => {
                style.set_property("display", "none").ok();
            }
        }

        self.volume.set_value(&view.volume.to_string());
        self.volume
            .style()
            .set_property("--fill", &format!("{}%", view.volume_fill))
            .ok();

        self.time.set_text_content(Some(&view.time_label));

        self.bar
            .class_list()
            .toggle_with_force("clip-player__controls--visible", view.visible)
            .ok();
    }

    fn remove(&self) {
        self.video.remove();
        self.bar.remove();
    }
}

/// Registered DOM listener, removed on unmount
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn detach(&self) {
        self.target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref())
            .ok();
    }
}

/// State shared between the JS handle and every callback
struct Shared {
    controller: RefCell<PlayerController<WebMedia>>,
    dom: Dom,
    on_event: RefCell<Option<Function>>,
}

impl Shared {
    /// Re-render and forward queued events; called at the end of every callback turn
    fn flush(&self) {
        let (view, events) = {
            let mut controller = self.controller.borrow_mut();
            let events = controller.drain_events();
            (ControlBarView::from_controller(&*controller), events)
        };

        self.dom.render(&view);

        let callback = self.on_event.borrow().clone();
        if let Some(cb) = callback {
            for event in events {
                if let Ok(value) = serde_wasm_bindgen::to_value(&event) {
                    cb.call1(&JsValue::NULL, &value).ok();
                }
            }
        }
    }

    fn fullscreen(&self) -> DocumentFullscreen {
        DocumentFullscreen::new(self.dom.document.clone(), self.dom.container.clone())
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Clip player mounted into a host element
#[wasm_bindgen]
pub struct ClipPlayerElement {
    shared: Rc<Shared>,
    listeners: Vec<Listener>,
    frame_callback: FrameCallback,
    frame_handle: Rc<Cell<Option<i32>>>,
    mounted: bool,
}

#[wasm_bindgen]
impl ClipPlayerElement {
    /// Mount a player into `container` using a JS options object
    ///
    /// Options use the attribute names (`src`, `autoplay`, `loop`,
    /// `allowfullscreen`, `start`, `end`, `playbackRate`, ...).
    pub fn mount(container: HtmlElement, options: JsValue) -> std::result::Result<ClipPlayerElement, JsValue> {
        let config: PlayerConfig = if options.is_undefined() || options.is_null() {
            PlayerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?
        };

        Ok(Self::mount_with_config(container, config)?)
    }

    /// Mount a player configured from the container's own attributes
    #[wasm_bindgen(js_name = fromAttributes)]
    pub fn from_attributes(container: HtmlElement) -> std::result::Result<ClipPlayerElement, JsValue> {
        let pairs: Vec<(String, String)> = container
            .get_attribute_names()
            .iter()
            .filter_map(|name| name.as_string())
            .filter_map(|name| {
                let value = container.get_attribute(&name)?;
                Some((name, value))
            })
            .collect();

        let config =
            PlayerConfig::from_attributes(pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())));

        Ok(Self::mount_with_config(container, config)?)
    }

    /// Start or resume playback
    pub fn play(&self) -> std::result::Result<(), JsValue> {
        let result = self.shared.controller.borrow_mut().play();
        self.shared.flush();
        result.map_err(JsValue::from)
    }

    /// Pause playback
    pub fn pause(&self) -> std::result::Result<(), JsValue> {
        let result = self.shared.controller.borrow_mut().pause();
        self.shared.flush();
        result.map_err(JsValue::from)
    }

    /// Register a callback receiving every player event
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        *self.shared.on_event.borrow_mut() = Some(callback);
    }

    /// Current playback state as a plain JS object
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> JsValue {
        let controller = self.shared.controller.borrow();
        serde_wasm_bindgen::to_value(controller.state()).unwrap_or(JsValue::NULL)
    }

    /// Stop the frame loop, drop listeners and remove the player's nodes
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;

        if let Some(handle) = self.frame_handle.take() {
            if let Some(window) = web_sys::window() {
                window.cancel_animation_frame(handle).ok();
            }
        }
        self.frame_callback.borrow_mut().take();

        self.shared.controller.borrow_mut().detach();

        for listener in self.listeners.drain(..) {
            listener.detach();
        }

        self.shared.dom.remove();
        tracing::debug!("Clip player unmounted");
    }
}

impl ClipPlayerElement {
    /// Mount with an already-built configuration
    pub fn mount_with_config(container: HtmlElement, config: PlayerConfig) -> Result<Self> {
        console_error_panic_hook::set_once();

        let document = container
            .owner_document()
            .ok_or_else(|| PlayerError::Dom("Container has no owner document".to_string()))?;

        let dom = Dom::build(document, container, &config)?;
        let media = WebMedia::new(dom.video.clone());
        let controller = PlayerController::new(media, config);

        let shared = Rc::new(Shared {
            controller: RefCell::new(controller),
            dom,
            on_event: RefCell::new(None),
        });

        let mut player = Self {
            shared,
            listeners: Vec::new(),
            frame_callback: Rc::new(RefCell::new(None)),
            frame_handle: Rc::new(Cell::new(None)),
            mounted: true,
        };

        if let Err(e) = player.wire().and_then(|()| player.start_frame_loop()) {
            player.unmount();
            return Err(e);
        }

        player.shared.flush();
        tracing::debug!("Clip player mounted");
        Ok(player)
    }

    fn wire(&mut self) -> Result<()> {
        let dom = &self.shared.dom;

        let container: EventTarget = dom.container.clone().into();
        let bar: EventTarget = dom.bar.clone().into();
        let video: EventTarget = dom.video.clone().into();
        let play_button: EventTarget = dom.play_button.clone().into();
        let mute_button: EventTarget = dom.mute_button.clone().into();
        let progress: EventTarget = dom.progress.clone().into();
        let volume: EventTarget = dom.volume.clone().into();
        let lock_button: Option<EventTarget> = dom.lock_button.clone().map(Into::into);
        let fullscreen_button: Option<EventTarget> = dom.fullscreen_button.clone().map(Into::into);

        self.listen(&container, "mousemove", |shared, event| {
            shared
                .controller
                .borrow_mut()
                .pointer_moved(event_time(&event));
        })?;

        self.listen(&container, "click", |shared, _| {
            let _ = shared
                .controller
                .borrow_mut()
                .container_clicked(ClickTarget::Surface);
        })?;

        // Controls must not reach the container's play/pause toggle
        self.listen(&bar, "click", |shared, event| {
            event.stop_propagation();
            let _ = shared
                .controller
                .borrow_mut()
                .container_clicked(ClickTarget::ControlBar);
        })?;

        self.listen(&bar, "keydown", |_, event| {
            event.stop_propagation();
        })?;

        self.listen(&play_button, "click", |shared, _| {
            let _ = shared.controller.borrow_mut().toggle_playback();
        })?;

        self.listen(&mute_button, "click", |shared, _| {
            shared.controller.borrow_mut().toggle_mute();
        })?;

        if let Some(ref lock) = lock_button {
            self.listen(lock, "click", |shared, _| {
                shared.controller.borrow_mut().toggle_restricted();
            })?;
        }

        if let Some(ref fullscreen) = fullscreen_button {
            self.listen(fullscreen, "click", |shared, _| {
                let mut host = shared.fullscreen();
                if let Err(e) = shared.controller.borrow().toggle_fullscreen(&mut host) {
                    tracing::warn!("Fullscreen toggle failed: {}", e);
                }
            })?;
        }

        // The first input opens the scrub session; `change` always follows it
        self.listen(&progress, "input", |shared, _| {
            let value = slider_value(&shared.dom.progress);
            shared.controller.borrow_mut().scrub_input(value);
        })?;

        self.listen(&progress, "change", |shared, _| {
            let value = slider_value(&shared.dom.progress);
            let _ = shared.controller.borrow_mut().seek(value);
        })?;

        self.listen(&volume, "input", |shared, _| {
            let value = slider_value(&shared.dom.volume) as f32;
            shared.controller.borrow_mut().set_volume(value);
        })?;

        for (kind, media_event) in [
            ("play", MediaEvent::Play),
            ("pause", MediaEvent::Pause),
            ("ended", MediaEvent::Ended),
            ("loadedmetadata", MediaEvent::LoadedMetadata),
            ("volumechange", MediaEvent::VolumeChange),
        ] {
            self.listen(&video, kind, move |shared, _| {
                shared.controller.borrow_mut().on_media_event(media_event);
            })?;
        }

        Ok(())
    }

    /// Add a listener that runs `handler` and then flushes the view
    fn listen<F>(&mut self, target: &EventTarget, kind: &'static str, mut handler: F) -> Result<()>
    where
        F: FnMut(&Shared, Event) + 'static,
    {
        let shared = Rc::downgrade(&self.shared);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(shared) = shared.upgrade() {
                handler(&shared, event);
                shared.flush();
            }
        });

        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;

        self.listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    /// Schedule `tick` on every animation frame until the controller detaches
    fn start_frame_loop(&mut self) -> Result<()> {
        let window = web_sys::window()
            .ok_or_else(|| PlayerError::Dom("No window object available".to_string()))?;

        let shared = Rc::downgrade(&self.shared);
        let slot = Rc::clone(&self.frame_callback);
        let handle = Rc::clone(&self.frame_handle);
        let frame_window = window.clone();

        let callback = Closure::<dyn FnMut(f64)>::new(move |timestamp: f64| {
            handle.set(None);
            let Some(shared) = shared.upgrade() else {
                return;
            };

            let outcome = shared.controller.borrow_mut().tick(millis(timestamp));
            shared.flush();

            if outcome == TickOutcome::Continue {
                if let Some(next) = slot.borrow().as_ref() {
                    handle.set(
                        frame_window
                            .request_animation_frame(next.as_ref().unchecked_ref())
                            .ok(),
                    );
                }
            }
        });

        let id = window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        self.frame_handle.set(Some(id));
        *self.frame_callback.borrow_mut() = Some(callback);
        Ok(())
    }
}

impl Drop for ClipPlayerElement {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn create<T: JsCast>(document: &Document, tag: &str, class: &str) -> Result<T> {
    let element: Element = document.create_element(tag).map_err(dom_error)?;
    element.set_class_name(class);
    element
        .dyn_into::<T>()
        .map_err(|_| PlayerError::Dom(format!("<{}> has an unexpected type", tag)))
}

fn append(parent: &Element, child: &Element) -> Result<()> {
    parent.append_child(child).map(|_| ()).map_err(dom_error)
}

fn slider_value(input: &HtmlInputElement) -> f64 {
    input.value().parse().unwrap_or(0.0)
}

fn event_time(event: &Event) -> Duration {
    millis(event.time_stamp())
}

fn millis(timestamp: f64) -> Duration {
    if timestamp.is_finite() && timestamp > 0.0 {
        Duration::from_secs_f64(timestamp / 1000.0)
    } else {
        Duration::ZERO
    }
}
