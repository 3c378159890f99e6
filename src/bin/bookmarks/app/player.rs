use std::collections::VecDeque;

use bookmarks::models::Track;
use bookmarks::{Host, SqliteConfigStore, Transport};

/// Playback state the bookmark manager sees through [`Host`].
pub struct Player {
    pub library: Vec<Track>,
    pub selected: Option<usize>,
    pub playing: Option<usize>,
    pub playpos: f32,
    pub paused: bool,
    /// Bumped on every start so audio messages about an earlier track can be
    /// told apart.
    pub generation: u64,
    /// Transport requests waiting for the app to apply them in order.
    pub pending: VecDeque<Transport>,
    pub store: SqliteConfigStore,
}

impl Player {
    pub fn new(library: Vec<Track>, store: SqliteConfigStore) -> Self {
        Player {
            library,
            selected: None,
            playing: None,
            playpos: 0.0,
            paused: false,
            generation: 0,
            pending: VecDeque::new(),
            store,
        }
    }

    pub fn playing_track(&self) -> Option<&Track> {
        self.playing.and_then(|i| self.library.get(i))
    }

    /// Makes `index` the playing track and returns its generation.
    pub fn start(&mut self, index: usize) -> u64 {
        self.generation += 1;
        self.playing = Some(index);
        self.playpos = 0.0;
        self.paused = false;
        self.generation
    }

    pub fn stop(&mut self) {
        self.playing = None;
        self.playpos = 0.0;
        self.paused = false;
    }

    /// Whether an audio message tagged with `generation` is about the track
    /// playing now.
    pub fn is_current(&self, generation: u64) -> bool {
        self.playing.is_some() && generation == self.generation
    }
}

impl Host for Player {
    type Track = Track;
    type Config = SqliteConfigStore;

    fn config_store(&self) -> &SqliteConfigStore {
        &self.store
    }

    fn track_count(&self) -> usize {
        self.library.len()
    }

    fn track(&self, index: usize) -> Option<&Track> {
        self.library.get(index)
    }

    fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.library.get_mut(index)
    }

    fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    fn playing(&self) -> Option<usize> {
        self.playing
    }

    fn playpos(&self) -> f32 {
        self.playpos
    }

    fn send(&mut self, transport: Transport) {
        self.pending.push_back(transport);
    }
}
