//! In-memory collaborators for controller and transport tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tokio::sync::Notify;
use whalio_playback::{
    AlbumId, Collaborators, MetadataProvider, NowPlayingView, Notifier, PlaybackDevice,
    PlaybackError, PlaybackSession, PlayerConfig, Result, SessionController, Severity,
    StreamLocator, TrackId, TrackInfo, TransportView,
};

// ===== Device =====

/// Audio element stand-in
pub struct FakeDevice {
    pub source: RefCell<Option<String>>,
    pub paused: Cell<bool>,
    pub position: Cell<f64>,
    pub volume: Cell<f64>,
    pub fail_play: Cell<bool>,
    pub play_calls: Cell<usize>,
    pub source_binds: Cell<usize>,
    pub seeks: RefCell<Vec<f64>>,
}

impl FakeDevice {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            source: RefCell::new(None),
            paused: Cell::new(true),
            position: Cell::new(0.0),
            volume: Cell::new(1.0),
            fail_play: Cell::new(false),
            play_calls: Cell::new(0),
            source_binds: Cell::new(0),
            seeks: RefCell::new(Vec::new()),
        })
    }
}

#[async_trait(?Send)]
impl PlaybackDevice for FakeDevice {
    fn source(&self) -> Option<String> {
        self.source.borrow().clone()
    }

    fn set_source(&self, url: Option<&str>) {
        *self.source.borrow_mut() = url.map(str::to_string);
        self.source_binds.set(self.source_binds.get() + 1);
        self.position.set(0.0);
        self.paused.set(true);
    }

    async fn play(&self) -> Result<()> {
        self.play_calls.set(self.play_calls.get() + 1);
        if self.fail_play.get() {
            return Err(PlaybackError::Playback(
                "NotAllowedError: play() can only be initiated by a user gesture".to_string(),
            ));
        }
        self.paused.set(false);
        Ok(())
    }

    fn pause(&self) {
        self.paused.set(true);
    }

    fn is_paused(&self) -> bool {
        self.paused.get()
    }

    fn set_position(&self, seconds: f64) {
        self.position.set(seconds);
        self.seeks.borrow_mut().push(seconds);
    }

    fn set_volume(&self, volume: f64) {
        self.volume.set(volume);
    }
}

// ===== Views =====

/// Transport bar stand-in; keeps the last value of every readout
#[derive(Default)]
pub struct FakeTransportView {
    pub elapsed: RefCell<String>,
    pub remaining: RefCell<String>,
    pub duration: RefCell<String>,
    pub fraction: Cell<f64>,
    pub playing: Cell<bool>,
    pub title: RefCell<String>,
    pub artist: RefCell<String>,
    pub revealed: Cell<bool>,
}

impl FakeTransportView {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn elapsed(&self) -> String {
        self.elapsed.borrow().clone()
    }
}

impl TransportView for FakeTransportView {
    fn show_elapsed(&self, text: &str) {
        *self.elapsed.borrow_mut() = text.to_string();
    }

    fn show_remaining(&self, text: &str) {
        *self.remaining.borrow_mut() = text.to_string();
    }

    fn show_duration(&self, text: &str) {
        *self.duration.borrow_mut() = text.to_string();
    }

    fn set_seek_fraction(&self, fraction: f64) {
        self.fraction.set(fraction);
    }

    fn show_playing(&self, playing: bool) {
        self.playing.set(playing);
    }

    fn show_track(&self, info: &TrackInfo) {
        *self.title.borrow_mut() = info.title.clone();
        *self.artist.borrow_mut() = info.artist.clone();
    }

    fn reveal(&self) {
        self.revealed.set(true);
    }
}

/// Table rows tagged with track ids; the page may swap them out
#[derive(Default)]
pub struct FakeRows {
    rows: RefCell<Vec<(TrackId, bool)>>,
}

impl FakeRows {
    pub fn with_rows(ids: &[u32]) -> Rc<Self> {
        let rows = Self::default();
        rows.replace(ids);
        Rc::new(rows)
    }

    /// Simulate a partial page update replacing the listing
    pub fn replace(&self, ids: &[u32]) {
        *self.rows.borrow_mut() = ids.iter().map(|&id| (TrackId(id), false)).collect();
    }

    pub fn marked(&self) -> Vec<TrackId> {
        self.rows
            .borrow()
            .iter()
            .filter(|(_, marked)| *marked)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl NowPlayingView for FakeRows {
    fn clear_marks(&self) {
        for row in self.rows.borrow_mut().iter_mut() {
            row.1 = false;
        }
    }

    fn mark(&self, id: TrackId) -> usize {
        let mut count = 0;
        for row in self.rows.borrow_mut().iter_mut().filter(|row| row.0 == id) {
            row.1 = true;
            count += 1;
        }
        count
    }
}

// ===== Providers =====

/// Metadata and stream provider backed by maps
#[derive(Default)]
pub struct FakeLibrary {
    tracks: RefCell<HashMap<TrackId, TrackInfo>>,
    albums: RefCell<HashMap<AlbumId, Vec<TrackId>>>,
    gates: RefCell<HashMap<TrackId, Rc<Notify>>>,
    album_gates: RefCell<HashMap<AlbumId, Rc<Notify>>>,
    pub offline: Cell<bool>,
    pub track_fetches: Cell<usize>,
}

impl FakeLibrary {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn add_track(&self, id: u32, title: &str, artist: &str) {
        self.tracks.borrow_mut().insert(
            TrackId(id),
            TrackInfo {
                id: TrackId(id),
                title: title.to_string(),
                artist: artist.to_string(),
                album: Some("Test Album".to_string()),
            },
        );
    }

    pub fn add_album(&self, id: u32, tracks: &[u32]) {
        for &track in tracks {
            if !self.tracks.borrow().contains_key(&TrackId(track)) {
                self.add_track(track, &format!("Track {track}"), "Test Artist");
            }
        }
        self.albums
            .borrow_mut()
            .insert(AlbumId(id), tracks.iter().copied().map(TrackId).collect());
    }

    /// Hold the metadata response for `id` until the returned gate is notified
    pub fn gate(&self, id: u32) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        self.gates.borrow_mut().insert(TrackId(id), gate.clone());
        gate
    }

    /// Hold the track listing for album `id` until the returned gate is notified
    pub fn gate_album(&self, id: u32) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        self.album_gates.borrow_mut().insert(AlbumId(id), gate.clone());
        gate
    }
}

#[async_trait(?Send)]
impl MetadataProvider for FakeLibrary {
    async fn track_info(&self, id: TrackId) -> Result<TrackInfo> {
        self.track_fetches.set(self.track_fetches.get() + 1);

        let gate = self.gates.borrow().get(&id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.offline.get() {
            return Err(PlaybackError::Fetch("Server error. Please try again later.".to_string()));
        }
        self.tracks
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| PlaybackError::Fetch("Not found.".to_string()))
    }

    async fn album_tracks(&self, id: AlbumId) -> Result<Vec<TrackId>> {
        let gate = self.album_gates.borrow().get(&id).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.offline.get() {
            return Err(PlaybackError::Fetch("Server error. Please try again later.".to_string()));
        }
        self.albums
            .borrow()
            .get(&id)
            .cloned()
            .ok_or_else(|| PlaybackError::Fetch("Not found.".to_string()))
    }
}

impl StreamLocator for FakeLibrary {
    fn stream_url(&self, id: TrackId) -> String {
        format!("/stream/{id}")
    }
}

/// Toast sink that keeps every message
#[derive(Default)]
pub struct RecordingNotifier {
    messages: RefCell<Vec<(Severity, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn messages(&self) -> Vec<(Severity, String)> {
        self.messages.borrow().clone()
    }

    pub fn severities(&self) -> Vec<Severity> {
        self.messages.borrow().iter().map(|(s, _)| *s).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        self.messages.borrow_mut().push((severity, message.to_string()));
    }
}

// ===== Harness =====

pub struct Harness {
    pub controller: SessionController,
    pub device: Rc<FakeDevice>,
    pub view: Rc<FakeTransportView>,
    pub rows: Rc<FakeRows>,
    pub library: Rc<FakeLibrary>,
    pub notes: Rc<RecordingNotifier>,
}

pub fn harness(library: Rc<FakeLibrary>, rows: Rc<FakeRows>) -> Harness {
    harness_with(library, rows, PlayerConfig::default(), true)
}

pub fn harness_with(
    library: Rc<FakeLibrary>,
    rows: Rc<FakeRows>,
    config: PlayerConfig,
    with_notifier: bool,
) -> Harness {
    let device = FakeDevice::new();
    let view = FakeTransportView::new();
    let notes = RecordingNotifier::new();

    let notifier: Option<Rc<dyn Notifier>> = if with_notifier {
        Some(notes.clone())
    } else {
        None
    };

    let controller = SessionController::new(
        Rc::new(PlaybackSession::new()),
        config,
        Collaborators {
            device: device.clone(),
            transport_view: view.clone(),
            now_playing: rows.clone(),
            metadata: library.clone(),
            streams: library.clone(),
            notifier,
        },
    );

    Harness {
        controller,
        device,
        view,
        rows,
        library,
        notes,
    }
}

/// Library with album 1 = [10, 20, 30] and rows for all three tracks
pub fn album_harness() -> Harness {
    let library = FakeLibrary::new();
    library.add_album(1, &[10, 20, 30]);
    harness(library, FakeRows::with_rows(&[10, 20, 30]))
}
