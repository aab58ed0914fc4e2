//! DOM transport bar and row highlighting

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::command::TRACK_TAG_ATTR;
use crate::device::{NowPlayingView, TransportView};
use crate::types::{TrackId, TrackInfo};

/// Class applied to rows of the active track
pub const NOW_PLAYING_CLASS: &str = "now-playing";

/// `max` of the seek `<input type="range">`; its value is `fraction * SEEK_RANGE`
pub const SEEK_RANGE: f64 = 100.0;

const HIDDEN_CLASS: &str = "hidden";

/// Element ids of the transport bar
#[derive(Debug, Clone)]
pub struct TransportElementIds {
    pub bar: String,
    pub title: String,
    pub artist: String,
    pub elapsed: String,
    pub remaining: String,
    pub duration: String,
    pub seek: String,
    pub volume: String,
    pub play_button: String,
    pub prev_button: String,
    pub next_button: String,
    pub play_icon: String,
    pub pause_icon: String,
}

impl Default for TransportElementIds {
    fn default() -> Self {
        Self {
            bar: "player-bar".to_string(),
            title: "player-title".to_string(),
            artist: "player-artist".to_string(),
            elapsed: "player-elapsed".to_string(),
            remaining: "player-remaining".to_string(),
            duration: "player-duration".to_string(),
            seek: "player-seek".to_string(),
            volume: "player-volume".to_string(),
            play_button: "player-play".to_string(),
            prev_button: "player-prev".to_string(),
            next_button: "player-next".to_string(),
            play_icon: "player-play-icon".to_string(),
            pause_icon: "player-pause-icon".to_string(),
        }
    }
}

/// Transport bar found by element ids
///
/// Missing elements are skipped silently.
pub struct DomTransportView {
    document: Document,
    ids: TransportElementIds,
}

impl DomTransportView {
    pub fn new(document: Document, ids: TransportElementIds) -> Self {
        Self { document, ids }
    }

    pub fn ids(&self) -> &TransportElementIds {
        &self.ids
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element.set_text_content(Some(text));
        }
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        if let Some(element) = self.document.get_element_by_id(id) {
            element
                .class_list()
                .toggle_with_force(HIDDEN_CLASS, hidden)
                .ok();
        }
    }
}

impl TransportView for DomTransportView {
    fn show_elapsed(&self, text: &str) {
        self.set_text(&self.ids.elapsed, text);
    }

    fn show_remaining(&self, text: &str) {
        self.set_text(&self.ids.remaining, text);
    }

    fn show_duration(&self, text: &str) {
        self.set_text(&self.ids.duration, text);
    }

    fn set_seek_fraction(&self, fraction: f64) {
        let input = self
            .document
            .get_element_by_id(&self.ids.seek)
            .and_then(|e| e.dyn_into::<HtmlInputElement>().ok());
        if let Some(input) = input {
            input.set_value(&format!("{:.2}", fraction * SEEK_RANGE));
        }
    }

    fn show_playing(&self, playing: bool) {
        self.set_hidden(&self.ids.play_icon, playing);
        self.set_hidden(&self.ids.pause_icon, !playing);
    }

    fn show_track(&self, info: &TrackInfo) {
        self.set_text(&self.ids.title, &info.title);
        self.set_text(&self.ids.artist, &info.artist);
    }

    fn reveal(&self) {
        self.set_hidden(&self.ids.bar, false);
    }
}

/// Row highlighting over `[data-track-id]` elements
pub struct DomNowPlaying {
    document: Document,
}

impl DomNowPlaying {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn select(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

impl NowPlayingView for DomNowPlaying {
    fn clear_marks(&self) {
        for element in self.select(&format!(".{NOW_PLAYING_CLASS}")) {
            element.class_list().remove_1(NOW_PLAYING_CLASS).ok();
        }
    }

    fn mark(&self, id: TrackId) -> usize {
        let elements = self.select(&format!("[{TRACK_TAG_ATTR}=\"{id}\"]"));
        for element in &elements {
            element.class_list().add_1(NOW_PLAYING_CLASS).ok();
        }
        elements.len()
    }
}
