#![allow(dead_code)]

use futures::future::BoxFuture;
use futures::FutureExt;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use episode_picker_rs::{
    EmbedChannel, Episode, MediaControl, MediaElement, MediaSource, MetadataProvider, PickerError,
    PlayerEmbed, SeasonDetails, ShowDetails, ShowId,
};

// Observable state of a fake native media element
#[derive(Debug, Default)]
pub struct ElementState {
    pub playing: bool,
    pub muted: bool,
    pub position: f64,
    pub play_calls: usize,
    pub pause_calls: usize,
    pub refuse_play: bool,
}

pub type SharedElement = Arc<Mutex<ElementState>>;

pub fn element(playing: bool) -> SharedElement {
    Arc::new(Mutex::new(ElementState {
        playing,
        position: if playing { 12.5 } else { 0.0 },
        ..Default::default()
    }))
}

pub struct FakeElement(pub SharedElement);

impl MediaElement for FakeElement {
    fn is_playing(&self) -> bool {
        self.0.lock().unwrap().playing
    }

    fn play(&mut self) -> Result<(), PickerError> {
        let mut state = self.0.lock().unwrap();
        state.play_calls += 1;
        if state.refuse_play {
            return Err(PickerError::PlaybackRejected("autoplay blocked".to_string()));
        }
        state.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        let mut state = self.0.lock().unwrap();
        state.pause_calls += 1;
        state.playing = false;
    }

    fn rewind(&mut self) {
        self.0.lock().unwrap().position = 0.0;
    }

    fn set_muted(&mut self, muted: bool) {
        self.0.lock().unwrap().muted = muted;
    }
}

// Messages posted to a fake embedded frame
#[derive(Debug, Default)]
pub struct FrameState {
    pub messages: Vec<String>,
    pub cross_origin: bool,
}

pub type SharedFrame = Arc<Mutex<FrameState>>;

pub fn frame(cross_origin: bool) -> SharedFrame {
    Arc::new(Mutex::new(FrameState {
        messages: Vec::new(),
        cross_origin,
    }))
}

pub struct FakeFrame(pub SharedFrame);

impl EmbedChannel for FakeFrame {
    fn post_message(&self, message: &str) -> Result<(), PickerError> {
        let mut state = self.0.lock().unwrap();
        if state.cross_origin {
            return Err(PickerError::MessageDelivery(
                "blocked by cross-origin policy".to_string(),
            ));
        }
        state.messages.push(message.to_string());
        Ok(())
    }
}

#[derive(Clone)]
pub enum PageItem {
    Video(SharedElement),
    Audio(SharedElement),
    Frame(SharedFrame),
}

/// A page whose playable elements can change between snapshots.
#[derive(Clone, Default)]
pub struct FakePage {
    items: Arc<Mutex<Vec<PageItem>>>,
    pub discover_calls: Arc<AtomicUsize>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, item: PageItem) {
        self.items.lock().unwrap().push(item);
    }

    pub fn add_video(&self, playing: bool) -> SharedElement {
        let el = element(playing);
        self.add(PageItem::Video(el.clone()));
        el
    }

    pub fn add_audio(&self, playing: bool) -> SharedElement {
        let el = element(playing);
        self.add(PageItem::Audio(el.clone()));
        el
    }

    pub fn add_frame(&self, cross_origin: bool) -> SharedFrame {
        let fr = frame(cross_origin);
        self.add(PageItem::Frame(fr.clone()));
        fr
    }

    pub fn discover_count(&self) -> usize {
        self.discover_calls.load(Ordering::SeqCst)
    }
}

impl MediaSource for FakePage {
    fn discover(&self) -> Vec<MediaControl> {
        self.discover_calls.fetch_add(1, Ordering::SeqCst);
        self.items
            .lock()
            .unwrap()
            .iter()
            .map(|item| match item {
                PageItem::Video(el) => MediaControl::Video(Box::new(FakeElement(el.clone()))),
                PageItem::Audio(el) => MediaControl::Audio(Box::new(FakeElement(el.clone()))),
                PageItem::Frame(fr) => MediaControl::Embedded(Box::new(FakeFrame(fr.clone()))),
            })
            .collect()
    }
}

pub fn is_playing(el: &SharedElement) -> bool {
    el.lock().unwrap().playing
}

pub fn episodes(numbers: &[i64]) -> Vec<Episode> {
    numbers
        .iter()
        .map(|n| Episode {
            number: *n,
            name: format!("Episode {}", n),
            overview: String::new(),
            runtime_minutes: Some(42),
            still_image_path: Some(format!("/still{}.jpg", n)),
        })
        .collect()
}

/// Show 100 as the provider returns it: season 1 plus a specials season 0.
pub fn show_100() -> ShowDetails {
    serde_json::from_value(json!({
        "id": 100,
        "name": "Test Show",
        "genres": [{"id": 18, "name": "Drama"}, {"id": 80, "name": "Crime"}],
        "seasons": [
            {"season_number": 1, "name": "Season 1", "episode_count": 8},
            {"season_number": 0, "name": "Specials", "episode_count": 1}
        ]
    }))
    .unwrap()
}

/// A show with three navigable seasons and some noise.
pub fn show_200() -> ShowDetails {
    serde_json::from_value(json!({
        "id": 200,
        "name": "Long Runner",
        "genres": [{"id": 35, "name": "Comedy"}],
        "seasons": [
            {"season_number": 0, "name": "Specials", "episode_count": 4},
            {"season_number": 1, "name": "Season 1", "episode_count": 3},
            {"season_number": 2, "name": "Season 2", "episode_count": 0},
            {"season_number": 3, "name": "Season 3", "episode_count": 2},
            {"season_number": 4, "name": "", "episode_count": 5}
        ]
    }))
    .unwrap()
}

/// In-memory metadata provider with optional per-season latency and failures.
#[derive(Default)]
pub struct FakeProvider {
    shows: HashMap<ShowId, ShowDetails>,
    seasons: HashMap<(ShowId, i64), Vec<Episode>>,
    delays: HashMap<i64, Duration>,
    failing: Mutex<HashSet<(ShowId, i64)>>,
    pub show_calls: AtomicUsize,
    pub season_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_show(mut self, show: ShowDetails) -> Self {
        self.shows.insert(ShowId(show.id), show);
        self
    }

    pub fn with_season(mut self, show_id: u64, season: i64, numbers: &[i64]) -> Self {
        self.seasons
            .insert((ShowId(show_id), season), episodes(numbers));
        self
    }

    pub fn with_delay(mut self, season: i64, delay: Duration) -> Self {
        self.delays.insert(season, delay);
        self
    }

    pub fn fail_season(&self, show_id: u64, season: i64) {
        self.failing.lock().unwrap().insert((ShowId(show_id), season));
    }

    pub fn heal_season(&self, show_id: u64, season: i64) {
        self.failing.lock().unwrap().remove(&(ShowId(show_id), season));
    }

    pub fn season_call_count(&self) -> usize {
        self.season_calls.load(Ordering::SeqCst)
    }
}

impl MetadataProvider for FakeProvider {
    fn fetch_show(&self, show_id: ShowId) -> BoxFuture<'static, Result<ShowDetails, PickerError>> {
        self.show_calls.fetch_add(1, Ordering::SeqCst);
        let result = self
            .shows
            .get(&show_id)
            .cloned()
            .ok_or_else(|| PickerError::NotFound(format!("/tv/{}", show_id)));
        async move { result }.boxed()
    }

    fn fetch_season(
        &self,
        show_id: ShowId,
        season_number: i64,
    ) -> BoxFuture<'static, Result<SeasonDetails, PickerError>> {
        self.season_calls.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failing
            .lock()
            .unwrap()
            .contains(&(show_id, season_number));
        let result = if failing {
            Err(PickerError::InvalidResponse("HTTP 500".to_string()))
        } else {
            self.seasons
                .get(&(show_id, season_number))
                .cloned()
                .map(|episodes| SeasonDetails { episodes })
                .ok_or_else(|| PickerError::NotFound(format!("/tv/{}/season/{}", show_id, season_number)))
        };
        let delay = self.delays.get(&season_number).copied();
        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        }
        .boxed()
    }
}

/// Records what the launcher asked the player surface to do.
#[derive(Default)]
pub struct FakeEmbed {
    pub opened: Mutex<Vec<String>>,
    pub close_calls: AtomicUsize,
    pub refuse: bool,
}

impl PlayerEmbed for FakeEmbed {
    fn open(&self, url: &str) -> Result<(), PickerError> {
        if self.refuse {
            return Err(PickerError::InvalidResponse("player unavailable".to_string()));
        }
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }
}
