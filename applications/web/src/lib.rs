//! Whalio web player
//!
//! Browser entry point: builds the session controller around the page's audio
//! element, the transport bar and the Whalio server API, then routes page
//! events into it.
//!
//! ```js
//! import init, { WasmPlayer } from "./pkg/whalio_web.js";
//!
//! await init();
//! const player = new WasmPlayer(null, { initial_volume: 0.6 });
//! player.onEvent((event) => console.debug(event));
//! ```
//!
//! Clicks on `[data-play-track]` / `[data-play-album]` elements, the transport
//! buttons and the seek/volume inputs are picked up by delegated listeners on
//! the document, so content swapped in later needs no extra wiring.

mod listeners;
mod logging;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::{Function, Promise};
use serde::Serialize;
use tracing::{debug, info};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::{Document, HtmlAudioElement};
use whalio_client::{ClientConfig, WhalioClient};
use whalio_playback::wasm::{
    AudioElementDevice, DomNowPlaying, DomTransportView, ToastNotifier, TransportElementIds,
    SEEK_RANGE,
};
use whalio_playback::{
    AlbumId, Collaborators, DeviceEvent, PlayOutcome, PlaybackSession, PlayerConfig, PlayerState,
    SessionController, SessionSnapshot, TrackId, TransportState,
};

use crate::listeners::{command_at, target_element, target_input, within, Listener};

/// Id of the audio element the player binds to (created when missing)
pub const AUDIO_ELEMENT_ID: &str = "whalio-audio";

/// `max` of the volume `<input type="range">`
pub const VOLUME_RANGE: f64 = 100.0;

/// Fired by htmx after it swapped new content into the page
const AFTER_SWAP_EVENT: &str = "htmx:afterSwap";

/// Shared between the exported handle and the listeners
struct PlayerInner {
    controller: SessionController,
    on_event: RefCell<Option<Function>>,
}

impl PlayerInner {
    /// Forward pending controller events to the page callback
    ///
    /// Events are drained even without a callback so they never pile up.
    fn flush(&self) {
        let events = self.controller.drain_events();
        let callback = self.on_event.borrow().clone();
        let Some(callback) = callback else {
            return;
        };

        for event in events {
            match serde_wasm_bindgen::to_value(&event) {
                Ok(value) => {
                    callback.call1(&JsValue::NULL, &value).ok();
                }
                Err(e) => debug!(error = %e, "Failed to serialize player event"),
            }
        }
    }
}

/// Snapshot returned by `getState()`
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayerStatus {
    state: PlayerState,
    track: Option<TrackId>,
    title: Option<String>,
    artist: Option<String>,
    queue_index: Option<usize>,
    queue_length: usize,
    session: SessionSnapshot,
}

/// The page's player
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: Rc<PlayerInner>,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create the player
    ///
    /// `base_url` defaults to the page origin; `config` is an optional
    /// `{ initial_volume, notify_success, log_level }` object.
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: Option<String>, config: JsValue) -> Result<WasmPlayer, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let options = PageOptions::from_js(config)?;
        logging::init(&options.log_level);

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document"))?;

        let base_url = match base_url {
            Some(url) => url,
            None => window.location().origin()?,
        };
        let client = Rc::new(
            WhalioClient::new(ClientConfig::new(base_url))
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
        );

        let device = AudioElementDevice::find_or_create(AUDIO_ELEMENT_ID)
            .ok_or_else(|| JsValue::from_str("Failed to bind audio element"))?;
        let audio = device.element().clone();

        let ids = TransportElementIds::default();
        let controller = SessionController::new(
            Rc::new(PlaybackSession::new()),
            options.player,
            Collaborators {
                device: Rc::new(device),
                transport_view: Rc::new(DomTransportView::new(document.clone(), ids.clone())),
                now_playing: Rc::new(DomNowPlaying::new(document.clone())),
                metadata: client.clone(),
                streams: client,
                notifier: Some(Rc::new(ToastNotifier)),
            },
        );

        let inner = Rc::new(PlayerInner {
            controller,
            on_event: RefCell::new(None),
        });

        let mut listeners = device_listeners(&inner, &audio)?;
        listeners.extend(page_listeners(&inner, &document, &ids)?);

        info!(audio = AUDIO_ELEMENT_ID, "Player ready");
        Ok(Self {
            inner,
            _listeners: listeners,
        })
    }

    // ===== Playback Intents =====

    /// Play a single track; resolves to the outcome name
    #[wasm_bindgen(js_name = playTrack)]
    pub fn play_track(&self, id: u32) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let outcome = inner.controller.play_track(TrackId(id)).await;
            inner.flush();
            Ok(JsValue::from_str(outcome_name(outcome)))
        })
    }

    /// Queue an album and play its first track
    #[wasm_bindgen(js_name = playAlbum)]
    pub fn play_album(&self, id: u32) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let outcome = inner.controller.play_album(AlbumId(id)).await;
            inner.flush();
            Ok(JsValue::from_str(outcome_name(outcome)))
        })
    }

    /// Skip to next track
    pub fn next(&self) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let outcome = inner.controller.next().await;
            inner.flush();
            Ok(JsValue::from_str(outcome_name(outcome)))
        })
    }

    /// Go to previous track (restarts the first one)
    pub fn previous(&self) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let outcome = inner.controller.prev().await;
            inner.flush();
            Ok(JsValue::from_str(outcome_name(outcome)))
        })
    }

    /// Play/pause; resolves to the resulting transport state
    #[wasm_bindgen(js_name = togglePlay)]
    pub fn toggle_play(&self) -> Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let state = inner.controller.toggle_play().await;
            inner.flush();
            Ok(JsValue::from_str(transport_name(state)))
        })
    }

    // ===== Transport =====

    /// Set volume (0.0-1.0); returns the applied value
    #[wasm_bindgen(js_name = setVolume)]
    pub fn set_volume(&self, volume: f64) -> f64 {
        self.inner.controller.set_volume(volume)
    }

    /// Seek to a fraction of the track (0.0-1.0)
    #[wasm_bindgen(js_name = seekTo)]
    pub fn seek_to(&self, fraction: f64) -> Option<f64> {
        self.inner.controller.commit_seek(fraction)
    }

    // ===== Page Integration =====

    /// Register the callback receiving player events
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&self, callback: Function) {
        *self.inner.on_event.borrow_mut() = Some(callback);
    }

    /// Re-apply the now-playing marker after the page changed
    #[wasm_bindgen(js_name = refreshNowPlaying)]
    pub fn refresh_now_playing(&self) -> usize {
        self.inner.controller.refresh_now_playing()
    }

    /// Current player state as a plain object
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> Result<JsValue, JsValue> {
        let controller = &self.inner.controller;
        let info = controller.current_info();
        let status = PlayerStatus {
            state: controller.state(),
            track: controller.current_track(),
            title: info.as_ref().map(|i| i.title.clone()),
            artist: info.map(|i| i.artist),
            queue_index: controller.queue_index(),
            queue_length: controller.queue_items().len(),
            session: controller.session().snapshot(),
        };

        serde_wasm_bindgen::to_value(&status)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }
}

/// Options accepted by the constructor
#[derive(serde::Deserialize)]
struct PageOptions {
    #[serde(flatten)]
    player: PlayerConfig,
    #[serde(default = "default_log_level")]
    log_level: String,
}

impl PageOptions {
    fn from_js(value: JsValue) -> Result<Self, JsValue> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self {
                player: PlayerConfig::default(),
                log_level: default_log_level(),
            });
        }

        let options: Self = serde_wasm_bindgen::from_value(value)
            .map_err(|e| JsValue::from_str(&format!("Invalid player config: {}", e)))?;
        options
            .player
            .validate()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(options)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

// ===== Listener Wiring =====

fn device_listeners(
    inner: &Rc<PlayerInner>,
    audio: &HtmlAudioElement,
) -> Result<Vec<Listener>, JsValue> {
    let bindings: [(&'static str, fn(&HtmlAudioElement) -> DeviceEvent); 6] = [
        ("timeupdate", |a| DeviceEvent::PositionChanged(a.current_time())),
        ("loadedmetadata", |a| DeviceEvent::DurationKnown(a.duration())),
        ("durationchange", |a| DeviceEvent::DurationKnown(a.duration())),
        ("play", |_| DeviceEvent::TransportStateChanged(TransportState::Playing)),
        ("pause", |_| DeviceEvent::TransportStateChanged(TransportState::Paused)),
        ("ended", |_| DeviceEvent::Ended),
    ];

    bindings
        .into_iter()
        .map(|(kind, to_event)| {
            let inner = inner.clone();
            let element = audio.clone();
            Listener::attach(audio, kind, move |_| {
                let event = to_event(&element);
                let inner = inner.clone();
                spawn_local(async move {
                    inner.controller.handle_device_event(event).await;
                    inner.flush();
                });
            })
        })
        .collect()
}

fn page_listeners(
    inner: &Rc<PlayerInner>,
    document: &Document,
    ids: &TransportElementIds,
) -> Result<Vec<Listener>, JsValue> {
    let click = {
        let inner = inner.clone();
        let ids = ids.clone();
        Listener::attach(document, "click", move |event| {
            let Some(target) = target_element(&event) else {
                return;
            };

            if let Some(command) = command_at(&target) {
                event.prevent_default();
                let inner = inner.clone();
                spawn_local(async move {
                    inner.controller.dispatch(command).await;
                    inner.flush();
                });
                return;
            }

            let inner = inner.clone();
            if within(&target, &ids.play_button) {
                spawn_local(async move {
                    inner.controller.toggle_play().await;
                    inner.flush();
                });
            } else if within(&target, &ids.prev_button) {
                spawn_local(async move {
                    inner.controller.prev().await;
                    inner.flush();
                });
            } else if within(&target, &ids.next_button) {
                spawn_local(async move {
                    inner.controller.next().await;
                    inner.flush();
                });
            }
        })?
    };

    // Dragging the seek bar or moving the volume slider
    let input = {
        let inner = inner.clone();
        let ids = ids.clone();
        Listener::attach(document, "input", move |event| {
            let Some(input) = target_input(&event) else {
                return;
            };
            let value = input.value_as_number();
            if input.id() == ids.seek {
                inner.controller.scrub(value / SEEK_RANGE);
            } else if input.id() == ids.volume {
                inner.controller.set_volume(value / VOLUME_RANGE);
            }
        })?
    };

    // Seek bar released
    let change = {
        let inner = inner.clone();
        let ids = ids.clone();
        Listener::attach(document, "change", move |event| {
            let Some(input) = target_input(&event) else {
                return;
            };
            if input.id() == ids.seek {
                inner.controller.commit_seek(input.value_as_number() / SEEK_RANGE);
            }
        })?
    };

    let swapped = {
        let inner = inner.clone();
        Listener::attach(document, AFTER_SWAP_EVENT, move |_| {
            inner.controller.refresh_now_playing();
        })?
    };

    Ok(vec![click, input, change, swapped])
}

fn outcome_name(outcome: PlayOutcome) -> &'static str {
    match outcome {
        PlayOutcome::Playing(_) => "playing",
        PlayOutcome::Superseded => "superseded",
        PlayOutcome::Failed => "failed",
        PlayOutcome::Ignored => "ignored",
        PlayOutcome::QueueExhausted => "exhausted",
        PlayOutcome::Restarted => "restarted",
    }
}

fn transport_name(state: TransportState) -> &'static str {
    match state {
        TransportState::Playing => "playing",
        TransportState::Paused => "paused",
        TransportState::Ended => "ended",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_names_are_distinct() {
        let names = [
            outcome_name(PlayOutcome::Playing(TrackId(1))),
            outcome_name(PlayOutcome::Superseded),
            outcome_name(PlayOutcome::Failed),
            outcome_name(PlayOutcome::Ignored),
            outcome_name(PlayOutcome::QueueExhausted),
            outcome_name(PlayOutcome::Restarted),
        ];
        let unique: std::collections::HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
    }
}
