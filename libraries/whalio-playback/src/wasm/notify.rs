//! Toast notifications through the page's `window.whalio.showToast`

use js_sys::{Function, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use crate::device::Notifier;
use crate::types::Severity;

/// Forwards to `window.whalio.showToast(message, type)`
///
/// Pages without the helper get a silent no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct ToastNotifier;

impl ToastNotifier {
    fn show_toast() -> Option<Function> {
        let window = web_sys::window()?;
        let namespace = Reflect::get(&window, &JsValue::from_str("whalio")).ok()?;
        if !namespace.is_object() {
            return None;
        }
        Reflect::get(&namespace, &JsValue::from_str("showToast"))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

impl Notifier for ToastNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        if let Some(show) = Self::show_toast() {
            show.call2(
                &JsValue::NULL,
                &JsValue::from_str(message),
                &JsValue::from_str(severity.as_str()),
            )
            .ok();
        }
    }
}
