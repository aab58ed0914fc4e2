//! DOM event listeners owned by the player
//!
//! Every listener is removed again when the player is dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, HtmlInputElement};
use whalio_playback::{ViewCommand, ACTION_SELECTOR, PLAY_ALBUM_ATTR, PLAY_TRACK_ATTR};

pub(crate) struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::wrap(Box::new(callback) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;

        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        self.target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref())
            .ok();
    }
}

/// Element the event was dispatched to
pub(crate) fn target_element(event: &Event) -> Option<Element> {
    event.target()?.dyn_into::<Element>().ok()
}

/// Input element the event was dispatched to, with its id
pub(crate) fn target_input(event: &Event) -> Option<HtmlInputElement> {
    event.target()?.dyn_into::<HtmlInputElement>().ok()
}

/// Playback intent declared by the clicked element or one of its ancestors
pub(crate) fn command_at(target: &Element) -> Option<ViewCommand> {
    let element = target.closest(ACTION_SELECTOR).ok()??;
    ViewCommand::from_attributes(
        element.get_attribute(PLAY_TRACK_ATTR).as_deref(),
        element.get_attribute(PLAY_ALBUM_ATTR).as_deref(),
    )
}

/// Whether `target` is, or sits inside, the element with `id`
pub(crate) fn within(target: &Element, id: &str) -> bool {
    matches!(target.closest(&format!("#{id}")), Ok(Some(_)))
}
