//! Playback session controller - core orchestration
//!
//! Coordinates the queue, the transport binding, the metadata provider and the
//! now-playing marker.
//!
//! State machine:
//! ```text
//!   Idle ──► Loading ──► Playing ⇄ Paused ──► Ended
//!              ▲  (reachable from every state)
//! ```
//! A failed request falls back to the last stable state and is surfaced as a
//! notification; nothing here fails the page.
//!
//! Every play intent takes a request token. The two suspension points of a
//! request (metadata fetch, device play) re-check the token and drop the
//! response when a newer intent has started in the meantime.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::command::ViewCommand;
use crate::device::{
    MetadataProvider, NowPlayingView, Notifier, PlaybackDevice, StreamLocator, TransportView,
};
use crate::error::PlaybackError;
use crate::events::{DeviceEvent, PlayerEvent};
use crate::notify::Notifications;
use crate::queue::{Advance, Direction, Queue};
use crate::session::PlaybackSession;
use crate::transport::TransportBinding;
use crate::types::{AlbumId, PlayerConfig, PlayerState, Severity, TrackId, TrackInfo, TransportState};

/// Everything the controller talks to
pub struct Collaborators {
    pub device: Rc<dyn PlaybackDevice>,
    pub transport_view: Rc<dyn TransportView>,
    pub now_playing: Rc<dyn NowPlayingView>,
    pub metadata: Rc<dyn MetadataProvider>,
    pub streams: Rc<dyn StreamLocator>,
    /// Optional; without it notifications are only logged
    pub notifier: Option<Rc<dyn Notifier>>,
}

/// How a controller operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Track is active and playing
    Playing(TrackId),

    /// A newer intent took over before this one reached the device
    Superseded,

    /// Failure surfaced to the user; previous state kept
    Failed,

    /// Nothing to do (out-of-range queue index, spurious event)
    Ignored,

    /// `next` past the last queue item; device paused
    QueueExhausted,

    /// `prev` on the first queue item; current track restarted
    Restarted,
}

/// Playback session controller
pub struct SessionController {
    session: Rc<PlaybackSession>,
    transport: TransportBinding,
    device: Rc<dyn PlaybackDevice>,
    now_playing: Rc<dyn NowPlayingView>,
    metadata: Rc<dyn MetadataProvider>,
    streams: Rc<dyn StreamLocator>,
    notifications: Notifications,
    config: PlayerConfig,

    queue: RefCell<Queue>,
    current_info: RefCell<Option<TrackInfo>>,

    state: Cell<PlayerState>,
    // Last non-Loading state, target of failure fallback
    stable_state: Cell<PlayerState>,
    request_token: Cell<u64>,

    // Event queue for UI synchronization
    pending_events: RefCell<Vec<PlayerEvent>>,
}

impl SessionController {
    /// Create the controller around the page's single session
    pub fn new(
        session: Rc<PlaybackSession>,
        config: PlayerConfig,
        collaborators: Collaborators,
    ) -> Self {
        let notifications = Notifications::new(collaborators.notifier);
        let transport = TransportBinding::new(
            session.clone(),
            collaborators.device.clone(),
            collaborators.transport_view,
            notifications.clone(),
        );

        transport.set_volume(config.initial_volume);
        transport.reset_progress();

        Self {
            session,
            transport,
            device: collaborators.device,
            now_playing: collaborators.now_playing,
            metadata: collaborators.metadata,
            streams: collaborators.streams,
            notifications,
            config,
            queue: RefCell::new(Queue::new()),
            current_info: RefCell::new(None),
            state: Cell::new(PlayerState::Idle),
            stable_state: Cell::new(PlayerState::Idle),
            request_token: Cell::new(0),
            pending_events: RefCell::new(Vec::new()),
        }
    }

    // ===== Playback Intents =====

    /// Run a command decoded from the page
    pub async fn dispatch(&self, command: ViewCommand) -> PlayOutcome {
        match command {
            ViewCommand::PlayTrack(id) => self.play_track(id).await,
            ViewCommand::PlayAlbum(id) => self.play_album(id).await,
        }
    }

    /// Load and play a single track
    ///
    /// The queue is not touched. On failure the marker, the bound source and
    /// the state stay as they were before the call.
    pub async fn play_track(&self, id: TrackId) -> PlayOutcome {
        let token = self.begin_request();
        self.set_state(PlayerState::Loading);
        debug!(track = %id, token, "Loading track");

        let info = match self.metadata.track_info(id).await {
            Ok(info) => info,
            Err(_) if !self.is_current(token) => return self.discard(token),
            Err(err) => return self.fail(&err),
        };
        if !self.is_current(token) {
            return self.discard(token);
        }

        let url = self.streams.stream_url(id);
        let previous_source = self.device.source();
        let saved_progress = self.session.progress();

        // Rebinding the same source would restart it
        let rebound = previous_source.as_deref() != Some(url.as_str());
        if rebound {
            debug!(track = %id, url = %url, "Binding new source");
            self.device.set_source(Some(&url));
            self.transport.reset_progress();
        }
        self.transport.show_track(&info);

        let played = self.device.play().await;
        if !self.is_current(token) {
            return self.discard(token);
        }

        if let Err(err) = played {
            if rebound {
                self.device.set_source(previous_source.as_deref());
                self.device.set_position(saved_progress.0);
                self.transport.restore_progress(saved_progress);
                // The restored source comes back paused
                if self.stable_state.get() == PlayerState::Playing {
                    self.stable_state.set(PlayerState::Paused);
                }
                self.transport.apply_transport(TransportState::Paused);
            }
            if let Some(previous) = self.current_info.borrow().as_ref() {
                self.transport.show_track(previous);
            }
            return self.fail(&err);
        }

        self.activate(info);
        PlayOutcome::Playing(id)
    }

    /// Replace the queue without starting playback
    pub fn set_queue(&self, ids: Vec<TrackId>) {
        let length = ids.len();
        self.queue.borrow_mut().set_queue(ids);
        self.emit(PlayerEvent::QueueChanged { length });
    }

    /// Jump to a queue position and play it
    ///
    /// Out-of-range indices are ignored silently.
    pub async fn play_queue_index(&self, index: usize) -> PlayOutcome {
        let selected = self.queue.borrow_mut().play_at(index);
        match selected {
            Ok(id) => self.play_track(id).await,
            Err(err) => {
                debug!(error = %err, "Ignoring queue jump");
                PlayOutcome::Ignored
            }
        }
    }

    /// Skip to next track
    ///
    /// Past the end the device is paused; the last track stays current.
    pub async fn next(&self) -> PlayOutcome {
        let step = self.queue.borrow_mut().advance(Direction::Next);
        match step {
            Advance::Moved(id) => self.play_track(id).await,
            Advance::Exhausted | Advance::AtStart => {
                debug!("Queue exhausted");
                self.transport.pause();
                if self.state.get() == PlayerState::Playing {
                    self.set_state(PlayerState::Paused);
                }
                PlayOutcome::QueueExhausted
            }
        }
    }

    /// Go to previous track
    ///
    /// On the first queue item the current track restarts from zero.
    pub async fn prev(&self) -> PlayOutcome {
        let step = self.queue.borrow_mut().advance(Direction::Prev);
        match step {
            Advance::Moved(id) => self.play_track(id).await,
            Advance::AtStart | Advance::Exhausted => {
                debug!("At queue start, restarting current track");
                self.transport.rewind();
                PlayOutcome::Restarted
            }
        }
    }

    /// Replace the queue with an album and play its first track
    pub async fn play_album(&self, album: AlbumId) -> PlayOutcome {
        let token = self.begin_request();
        debug!(album = %album, token, "Loading album");

        let listing = self.metadata.album_tracks(album).await;
        if !self.is_current(token) {
            return self.discard(token);
        }

        let ids = match listing {
            Ok(ids) => ids,
            Err(err) => {
                warn!(album = %album, "Album fetch failed");
                return self.fail(&err);
            }
        };

        // A superseded track load may have left the state at Loading
        if ids.is_empty() {
            self.set_state(self.stable_state.get());
            self.surface(Severity::Warning, &PlaybackError::EmptyAlbum(album));
            return PlayOutcome::Failed;
        }

        info!(album = %album, tracks = ids.len(), "Album queued");
        self.set_queue(ids);

        self.play_queue_index(0).await
    }

    // ===== Device Events =====

    /// Feed an event from the playback device
    ///
    /// Natural end of a track advances the queue; the outcome of that step is
    /// returned. Other events return `None`.
    pub async fn handle_device_event(&self, event: DeviceEvent) -> Option<PlayOutcome> {
        self.transport.handle_event(&event);

        match event {
            DeviceEvent::TransportStateChanged(state) => {
                self.sync_transport(state);
                None
            }
            DeviceEvent::Ended => {
                // An old source finishing while a new one loads must not
                // advance the queue under the user's feet, and with nothing
                // loaded there is nothing to advance from
                if self.state.get() == PlayerState::Loading || self.session.track().is_none() {
                    return None;
                }
                self.set_state(PlayerState::Ended);
                Some(self.next().await)
            }
            DeviceEvent::PositionChanged(_) | DeviceEvent::DurationKnown(_) => None,
        }
    }

    fn sync_transport(&self, state: TransportState) {
        if self.session.track().is_none() || !self.state.get().is_stable() {
            return;
        }
        self.set_state(match state {
            TransportState::Playing => PlayerState::Playing,
            TransportState::Paused => PlayerState::Paused,
            TransportState::Ended => PlayerState::Ended,
        });
    }

    // ===== Transport Controls =====

    /// Play/pause button
    pub async fn toggle_play(&self) -> TransportState {
        let transport = self.transport.toggle().await;
        self.sync_transport(transport);
        transport
    }

    /// Volume control moved
    pub fn set_volume(&self, value: f64) -> f64 {
        self.transport.set_volume(value)
    }

    /// Seek control dragged
    pub fn scrub(&self, fraction: f64) -> f64 {
        self.transport.scrub(fraction)
    }

    /// Seek control released
    pub fn commit_seek(&self, fraction: f64) -> Option<f64> {
        self.transport.commit_seek(fraction)
    }

    // ===== Now Playing =====

    /// Re-apply the marker for the active track
    ///
    /// Call after the page swapped content in; returns how many elements were
    /// marked.
    pub fn refresh_now_playing(&self) -> usize {
        match self.session.track() {
            Some(id) => self.mark_now_playing(id),
            None => 0,
        }
    }

    fn mark_now_playing(&self, id: TrackId) -> usize {
        self.now_playing.clear_marks();
        let marked = self.now_playing.mark(id);
        debug!(track = %id, marked, "Now-playing marker updated");
        marked
    }

    // ===== State Queries =====

    pub fn state(&self) -> PlayerState {
        self.state.get()
    }

    /// Active track (stays set after the queue runs out)
    pub fn current_track(&self) -> Option<TrackId> {
        self.session.track()
    }

    pub fn current_info(&self) -> Option<TrackInfo> {
        self.current_info.borrow().clone()
    }

    pub fn queue_index(&self) -> Option<usize> {
        self.queue.borrow().index()
    }

    pub fn queue_items(&self) -> Vec<TrackId> {
        self.queue.borrow().items().to_vec()
    }

    pub fn session(&self) -> &PlaybackSession {
        &self.session
    }

    pub fn transport(&self) -> &TransportBinding {
        &self.transport
    }

    /// Drain all pending events
    ///
    /// Returns all events that have been emitted since the last drain.
    pub fn drain_events(&self) -> Vec<PlayerEvent> {
        std::mem::take(&mut *self.pending_events.borrow_mut())
    }

    // ===== Internal =====

    fn activate(&self, info: TrackInfo) {
        let id = info.id;
        let previous_track_id = self.session.track();

        self.session.set_track(Some(id));
        self.transport.apply_transport(TransportState::Playing);
        self.set_state(PlayerState::Playing);
        self.mark_now_playing(id);

        info!(track = %id, title = %info.title, artist = %info.artist, "Now playing");
        if self.config.notify_success {
            self.notifications.notify(
                Severity::Info,
                &format!("Now playing: {} by {}", info.title, info.artist),
            );
        }

        *self.current_info.borrow_mut() = Some(info);
        self.emit(PlayerEvent::TrackChanged {
            track_id: id,
            previous_track_id,
        });
    }

    fn fail(&self, err: &PlaybackError) -> PlayOutcome {
        let fallback = self.stable_state.get();
        warn!(error = %err, fallback = ?fallback, "Playback request failed");
        self.set_state(fallback);
        self.surface(Severity::Error, err);
        PlayOutcome::Failed
    }

    fn surface(&self, severity: Severity, err: &PlaybackError) {
        let message = err.to_string();
        self.notifications.notify(severity, &message);
        self.emit(PlayerEvent::Error { message });
    }

    fn set_state(&self, state: PlayerState) {
        if state.is_stable() {
            self.stable_state.set(state);
        }
        if self.state.replace(state) != state {
            debug!(state = ?state, "State changed");
            self.emit(PlayerEvent::StateChanged { state });
        }
    }

    fn begin_request(&self) -> u64 {
        let token = self.request_token.get() + 1;
        self.request_token.set(token);
        token
    }

    fn is_current(&self, token: u64) -> bool {
        self.request_token.get() == token
    }

    fn discard(&self, token: u64) -> PlayOutcome {
        debug!(token, latest = self.request_token.get(), "Discarding superseded response");
        PlayOutcome::Superseded
    }

    fn emit(&self, event: PlayerEvent) {
        self.pending_events.borrow_mut().push(event);
    }
}
