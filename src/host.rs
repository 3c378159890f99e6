use crate::config::ConfigStore;
use crate::error::Result;
use crate::event::Transport;

/// Per-track metadata, borrowed from the host for the duration of one call.
pub trait TrackMeta {
    /// Duration in seconds.
    fn duration(&self) -> f32;

    fn meta(&self, key: &str) -> Option<&str>;

    fn set_meta(&mut self, key: &str, value: String);

    fn remove_meta(&mut self, key: &str);

    /// Ask the host to write the metadata back to the track's container.
    fn write_through(&mut self) -> Result<()>;

    fn meta_exists(&self, key: &str) -> bool {
        self.meta(key).is_some()
    }

    /// Integer value of the field, `default` when missing or not numeric.
    fn meta_int(&self, key: &str, default: i64) -> i64 {
        self.meta(key)
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }

    fn set_meta_int(&mut self, key: &str, value: i64) {
        self.set_meta(key, value.to_string());
    }

    fn append_meta(&mut self, key: &str, value: &str) {
        let mut joined = self.meta(key).unwrap_or_default().to_string();
        joined.push_str(value);
        self.set_meta(key, joined);
    }
}

/// Everything the manager needs from the player.
pub trait Host {
    type Track: TrackMeta;
    type Config: ConfigStore;

    fn config_store(&self) -> &Self::Config;

    /// Number of items in the current playlist, 0 when there is none.
    fn track_count(&self) -> usize;

    fn track(&self, index: usize) -> Option<&Self::Track>;

    fn track_mut(&mut self, index: usize) -> Option<&mut Self::Track>;

    fn is_selected(&self, index: usize) -> bool;

    /// Playlist index of the track being streamed.
    fn playing(&self) -> Option<usize>;

    /// Elapsed seconds of the playing track.
    fn playpos(&self) -> f32;

    fn send(&mut self, transport: Transport);

    fn lock(&self) {}

    fn unlock(&self) {}
}

/// Holds the host's read lock until dropped.
pub(crate) struct ReadLock<'a, H: Host + ?Sized> {
    host: &'a H,
}

impl<'a, H: Host + ?Sized> ReadLock<'a, H> {
    pub(crate) fn new(host: &'a H) -> Self {
        host.lock();
        ReadLock { host }
    }
}

impl<H: Host + ?Sized> Drop for ReadLock<'_, H> {
    fn drop(&mut self) {
        self.host.unlock();
    }
}
