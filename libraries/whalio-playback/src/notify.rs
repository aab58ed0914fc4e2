//! Optional notification sink

use std::rc::Rc;

use tracing::{debug, warn};

use crate::device::Notifier;
use crate::types::Severity;

/// Wraps an optional [`Notifier`]
///
/// Every message is logged; it is forwarded only when a sink is attached, so a
/// page without a toast container degrades to a no-op.
#[derive(Clone, Default)]
pub struct Notifications {
    sink: Option<Rc<dyn Notifier>>,
}

impl Notifications {
    pub fn new(sink: Option<Rc<dyn Notifier>>) -> Self {
        Self { sink }
    }

    pub fn notify(&self, severity: Severity, message: &str) {
        match severity {
            Severity::Warning | Severity::Error => {
                warn!(severity = severity.as_str(), message, "Notification");
            }
            Severity::Info | Severity::Success => {
                debug!(severity = severity.as_str(), message, "Notification");
            }
        }

        if let Some(sink) = &self.sink {
            sink.notify(severity, message);
        }
    }
}
