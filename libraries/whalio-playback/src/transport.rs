//! Transport binding
//!
//! Glue between the transport bar and the playback device:
//! - device → view: progress readouts, seek position, play/pause icon
//! - view → device: volume (immediate), seek (on commit only), play/pause
//!
//! While the user drags the seek control the scrub flag is set and progress
//! signals stop reaching the view, so the slider does not fight the user.

use std::rc::Rc;

use tracing::debug;

use crate::device::{PlaybackDevice, TransportView};
use crate::events::DeviceEvent;
use crate::notify::Notifications;
use crate::session::PlaybackSession;
use crate::types::{Severity, TrackInfo, TransportState};

/// Wires the transport controls to the single playback device
pub struct TransportBinding {
    session: Rc<PlaybackSession>,
    device: Rc<dyn PlaybackDevice>,
    view: Rc<dyn TransportView>,
    notifications: Notifications,
}

impl TransportBinding {
    pub fn new(
        session: Rc<PlaybackSession>,
        device: Rc<dyn PlaybackDevice>,
        view: Rc<dyn TransportView>,
        notifications: Notifications,
    ) -> Self {
        Self {
            session,
            device,
            view,
            notifications,
        }
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    // ===== Device → View =====

    /// Reflect a device event in the session and the view
    pub fn handle_event(&self, event: &DeviceEvent) {
        match *event {
            DeviceEvent::PositionChanged(position) => {
                self.session.set_position(position);
                if !self.session.is_scrubbing() {
                    self.render_progress();
                }
            }
            DeviceEvent::DurationKnown(duration) => {
                self.session.set_duration(Some(duration));
                self.view
                    .show_duration(&format_clock(self.session.known_duration().unwrap_or(0.0)));
                if !self.session.is_scrubbing() {
                    self.render_progress();
                }
            }
            DeviceEvent::TransportStateChanged(state) => self.apply_transport(state),
            DeviceEvent::Ended => self.apply_transport(TransportState::Ended),
        }
    }

    /// Redraw elapsed/remaining readouts and the seek control from the session
    pub fn render_progress(&self) {
        let position = self.session.position();
        let duration = self.session.known_duration();

        self.view.show_elapsed(&format_clock(position));
        self.view.show_remaining(&format_remaining(position, duration));
        self.view.set_seek_fraction(seek_fraction(position, duration));
    }

    pub(crate) fn apply_transport(&self, state: TransportState) {
        self.session.set_transport(state);
        self.view.show_playing(state.is_playing());
    }

    /// Zero the readouts for a freshly bound source
    pub(crate) fn reset_progress(&self) {
        self.session.restore_progress((0.0, None));
        self.view.show_duration(&format_clock(0.0));
        self.render_progress();
    }

    /// Put back readouts saved before a failed source swap
    pub(crate) fn restore_progress(&self, saved: (f64, Option<f64>)) {
        self.session.restore_progress(saved);
        self.view
            .show_duration(&format_clock(self.session.known_duration().unwrap_or(0.0)));
        self.render_progress();
    }

    /// Reveal the bar and show what is loading
    pub(crate) fn show_track(&self, info: &TrackInfo) {
        self.view.reveal();
        self.view.show_track(info);
    }

    // ===== View → Device =====

    /// Apply a volume control interaction immediately
    ///
    /// Returns the volume actually applied (clamped to 0.0-1.0).
    pub fn set_volume(&self, value: f64) -> f64 {
        let volume = clamp_unit(value);
        self.device.set_volume(volume);
        self.session.set_volume(volume);
        volume
    }

    /// Seek control is being dragged to `fraction` (0.0-1.0)
    ///
    /// Only the elapsed readout follows the drag; the device keeps playing
    /// where it is. Returns the dragged-to position in seconds.
    pub fn scrub(&self, fraction: f64) -> f64 {
        self.session.set_scrubbing(true);

        let target = self
            .session
            .known_duration()
            .map_or(0.0, |duration| clamp_unit(fraction) * duration);
        self.view.show_elapsed(&format_clock(target));
        target
    }

    /// Seek control released at `fraction` (0.0-1.0)
    ///
    /// Clears the scrub flag and seeks the device in the same step. Without a
    /// known, non-zero duration the device is left alone and `None` is
    /// returned.
    pub fn commit_seek(&self, fraction: f64) -> Option<f64> {
        self.session.set_scrubbing(false);

        let Some(duration) = self.session.known_duration() else {
            debug!(fraction, "Seek commit ignored, duration unknown");
            self.render_progress();
            return None;
        };

        let target = clamp_unit(fraction) * duration;
        self.device.set_position(target);
        self.session.set_position(target);
        self.render_progress();
        Some(target)
    }

    /// Play if paused, pause if playing
    ///
    /// A refused play is reported through the notification sink and leaves
    /// the transport state as it was.
    pub async fn toggle(&self) -> TransportState {
        if self.device.is_paused() {
            match self.device.play().await {
                Ok(()) => self.apply_transport(TransportState::Playing),
                Err(err) => self.notifications.notify(Severity::Error, &err.to_string()),
            }
        } else {
            self.device.pause();
            self.apply_transport(TransportState::Paused);
        }
        self.session.transport()
    }

    /// Pause the device; a finished track stays `Ended`
    pub(crate) fn pause(&self) {
        self.device.pause();
        if self.session.transport() != TransportState::Ended {
            self.apply_transport(TransportState::Paused);
        }
    }

    /// Restart the current source from zero
    pub(crate) fn rewind(&self) {
        self.device.set_position(0.0);
        self.session.set_position(0.0);
        if !self.session.is_scrubbing() {
            self.render_progress();
        }
    }
}

/// Format seconds as `m:ss`; unusable values render as `0:00`
pub fn format_clock(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Remaining time as `-m:ss`
pub fn format_remaining(position: f64, duration: Option<f64>) -> String {
    let remaining = duration.map_or(0.0, |d| (d - position).max(0.0));
    format!("-{}", format_clock(remaining))
}

/// Seek control position for `position` within `duration`
///
/// `0.0` when the duration is unknown, non-finite or zero.
pub fn seek_fraction(position: f64, duration: Option<f64>) -> f64 {
    match duration {
        Some(d) if d.is_finite() && d > 0.0 => clamp_unit(position / d),
        _ => 0.0,
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
