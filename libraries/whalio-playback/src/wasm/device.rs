//! `<audio>` element as playback device

use async_trait::async_trait;
use tracing::warn;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

use crate::device::PlaybackDevice;
use crate::error::{PlaybackError, Result};

/// The page's single audio element
pub struct AudioElementDevice {
    audio: HtmlAudioElement,
}

impl AudioElementDevice {
    pub fn new(audio: HtmlAudioElement) -> Self {
        Self { audio }
    }

    /// Find the audio element by id, creating a hidden one if the page has none
    pub fn find_or_create(id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;

        if let Some(existing) = document.get_element_by_id(id) {
            return existing.dyn_into::<HtmlAudioElement>().ok().map(Self::new);
        }

        let audio: HtmlAudioElement = document.create_element("audio").ok()?.dyn_into().ok()?;
        audio.set_id(id);
        // Stream instead of buffering whole files
        audio.set_attribute("preload", "metadata").ok()?;
        document.body()?.append_child(&audio).ok()?;

        Some(Self::new(audio))
    }

    pub fn element(&self) -> &HtmlAudioElement {
        &self.audio
    }
}

#[async_trait(?Send)]
impl PlaybackDevice for AudioElementDevice {
    fn source(&self) -> Option<String> {
        let src = self.audio.src();
        if src.is_empty() {
            None
        } else {
            Some(src)
        }
    }

    fn set_source(&self, url: Option<&str>) {
        match url {
            Some(url) => self.audio.set_src(url),
            None => {
                if let Err(err) = self.audio.remove_attribute("src") {
                    warn!(error = %js_message(&err), "Failed to unbind audio source");
                }
                self.audio.load();
            }
        }
    }

    async fn play(&self) -> Result<()> {
        let promise = self
            .audio
            .play()
            .map_err(|e| PlaybackError::Playback(js_message(&e)))?;

        JsFuture::from(promise)
            .await
            .map(|_| ())
            .map_err(|e| PlaybackError::Playback(js_message(&e)))
    }

    fn pause(&self) {
        if let Err(err) = self.audio.pause() {
            warn!(error = %js_message(&err), "Audio element refused to pause");
        }
    }

    fn is_paused(&self) -> bool {
        self.audio.paused()
    }

    fn set_position(&self, seconds: f64) {
        self.audio.set_current_time(seconds);
    }

    fn set_volume(&self, volume: f64) {
        self.audio.set_volume(volume);
    }
}

/// Best-effort message out of a rejected promise or thrown value
pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}
