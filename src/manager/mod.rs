//! Position and bookmark bookkeeping driven by host notifications.
//!
//! The manager holds no state besides its [`Config`]. Positions and bookmarks
//! live in track metadata, and tracks are only borrowed for a single call.

use tracing::{debug, warn};

use crate::actions::{self, Action, ActionKind};
use crate::bookmark_list::{self, Bookmarks};
use crate::config::{Config, ConfigStore};
use crate::event::{ActionContext, Notification, Transport};
use crate::host::{Host, ReadLock, TrackMeta};
use crate::{BOOKMARKS_FIELD, POSITION_FIELD};

/// Seconds before the end at which a track counts as played to completion.
pub const END_TOLERANCE: f32 = 4.0;

#[derive(Debug, Default, Clone)]
pub struct BookmarkManager {
    config: Config,
}

impl BookmarkManager {
    pub fn new(config: Config) -> Self {
        BookmarkManager { config }
    }

    pub fn load(store: &impl ConfigStore) -> Self {
        BookmarkManager::new(Config::load(store))
    }

    pub fn reload(&mut self, store: &impl ConfigStore) {
        self.config = Config::load(store);
        debug!(config = ?self.config, "config reloaded");
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Dispatches one host notification. Returns whether anything was done.
    pub fn message<H: Host>(&mut self, host: &mut H, notification: Notification) -> bool {
        match notification {
            n if n.saves_position() => {
                let elapsed = host.playpos();
                match playing_track(host) {
                    Some(track) => self.save_position(track, elapsed),
                    None => false,
                }
            }
            Notification::SongStarted => self.resume_position(host),
            Notification::SongFinished => {
                let elapsed = host.playpos();
                match playing_track(host) {
                    Some(track) => self.handle_track_finished(track, elapsed),
                    None => false,
                }
            }
            Notification::ConfigChanged => {
                self.reload(host.config_store());
                true
            }
            _ => false,
        }
    }

    /// Stores `elapsed` as the track's last position when saving is enabled
    /// and the track is long enough.
    pub fn save_position<T: TrackMeta + ?Sized>(&self, track: &mut T, elapsed: f32) -> bool {
        if !self.config.enabled || track.duration() < self.config.min_duration as f32 {
            return false;
        }

        let seconds = elapsed.max(0.0) as i64;
        track.set_meta_int(POSITION_FIELD, seconds);
        persist(track);
        debug!(seconds, "position saved");
        true
    }

    /// Seeks the playing track back to its saved position minus the rewind
    /// time, when auto continue is on.
    pub fn resume_position<H: Host>(&self, host: &mut H) -> bool {
        if !self.config.enabled || !self.config.auto_continue {
            return false;
        }

        let Some(target) = playing_track(host).and_then(|t| self.resume_seek(&*t)) else {
            return false;
        };

        host.send(Transport::Seek { ms: target });
        debug!(ms = target, "resuming");
        true
    }

    /// Seek target in milliseconds if the saved position lies after the
    /// rewind window.
    pub fn resume_seek<T: TrackMeta + ?Sized>(&self, track: &T) -> Option<u64> {
        let target = self.resume_target(track);
        (target > 0).then_some(target)
    }

    /// Milliseconds to seek to when resuming, never negative. Out of range
    /// stored positions saturate.
    pub fn resume_target<T: TrackMeta + ?Sized>(&self, track: &T) -> u64 {
        let stored = track.meta_int(POSITION_FIELD, 0);
        let seconds = stored.saturating_sub(self.config.rewind_time as i64).max(0);
        (seconds as u64).saturating_mul(1000)
    }

    /// Clears the saved position of a track that played to its end.
    pub fn handle_track_finished<T: TrackMeta + ?Sized>(
        &self,
        track: &mut T,
        elapsed: f32,
    ) -> bool {
        if elapsed < track.duration() - END_TOLERANCE {
            return false;
        }

        self.reset_position(track);
        true
    }

    pub fn reset_position<T: TrackMeta + ?Sized>(&self, track: &mut T) {
        track.set_meta_int(POSITION_FIELD, 0);
        persist(track);
    }

    /// Appends a bookmark unless the list is already full or `offset`
    /// repeats the last listed entry.
    pub fn add_bookmark<T: TrackMeta + ?Sized>(&self, track: &mut T, offset: u32) -> bool {
        let raw = track.meta(BOOKMARKS_FIELD).unwrap_or_default();
        let Some(updated) = bookmark_list::push(raw, offset) else {
            debug!(offset, "bookmark refused");
            return false;
        };

        track.set_meta(BOOKMARKS_FIELD, updated);
        persist(track);
        debug!(offset, "bookmark added");
        true
    }

    pub fn clear_bookmarks<T: TrackMeta + ?Sized>(&self, track: &mut T) {
        track.remove_meta(BOOKMARKS_FIELD);
        persist(track);
    }

    pub fn list_bookmarks<'a, T: TrackMeta + ?Sized>(&self, track: &'a T) -> Bookmarks<'a> {
        bookmark_list::parse(track.meta(BOOKMARKS_FIELD).unwrap_or_default())
    }

    /// Playlist index of the track an action refers to.
    pub fn selected_track<H: Host>(&self, host: &H, context: ActionContext) -> Option<usize> {
        match context {
            ActionContext::Selection => (0..host.track_count()).find(|&i| host.is_selected(i)),
            ActionContext::NowPlaying => host.playing(),
        }
    }

    /// Builds the action menu for the track `context` resolves to.
    pub fn actions<H: Host>(&self, host: &H, context: ActionContext) -> Vec<Action> {
        let _lock = ReadLock::new(host);

        let track = self
            .selected_track(host, context)
            .and_then(|i| host.track(i));

        let has_position = track.is_some_and(|t| {
            t.meta_exists(POSITION_FIELD) && t.meta_int(POSITION_FIELD, 0) != 0
        });
        let position_enabled = self.config.enabled && has_position;
        let target = track.map(|t| self.resume_target(t)).unwrap_or(0);

        let can_bookmark = self.config.enabled
            && context == ActionContext::NowPlaying
            && track.is_some();

        let bookmarks: Vec<_> = track
            .map(|t| self.list_bookmarks(t).collect())
            .unwrap_or_default();

        let mut list = vec![
            Action::new(
                ActionKind::Resume,
                actions::resume_title(target),
                position_enabled,
            ),
            Action::new(ActionKind::Reset, "Reset last playback position", position_enabled),
            Action::new(ActionKind::AddBookmark, "Add bookmark", can_bookmark),
            Action::new(
                ActionKind::ClearBookmarks,
                "Clear bookmarks",
                !bookmarks.is_empty(),
            ),
        ];

        list.extend(bookmarks.into_iter().map(|(index, offset)| {
            Action::new(
                ActionKind::JumpToBookmark { offset },
                actions::bookmark_title(index, offset),
                true,
            )
        }));

        list
    }

    /// Runs an action against the track `context` resolves to now.
    pub fn run_action<H: Host>(
        &self,
        host: &mut H,
        action: &Action,
        context: ActionContext,
    ) -> bool {
        if !action.enabled {
            return false;
        }

        let Some(index) = self.selected_track(host, context) else {
            return false;
        };

        match action.kind {
            ActionKind::Resume => {
                let Some(target) = host.track(index).map(|t| self.resume_target(t)) else {
                    return false;
                };
                host.send(Transport::PlayTrack(index));
                host.send(Transport::Seek { ms: target });
            }
            ActionKind::Reset => {
                let Some(track) = host.track_mut(index) else {
                    return false;
                };
                self.reset_position(track);
            }
            ActionKind::AddBookmark => {
                let offset = host.playpos().max(0.0) as u32;
                let Some(track) = host.track_mut(index) else {
                    return false;
                };
                return self.add_bookmark(track, offset);
            }
            ActionKind::ClearBookmarks => {
                let Some(track) = host.track_mut(index) else {
                    return false;
                };
                self.clear_bookmarks(track);
            }
            ActionKind::JumpToBookmark { offset } => {
                host.send(Transport::PlayTrack(index));
                host.send(Transport::Seek {
                    ms: offset as u64 * 1000,
                });
            }
        }

        true
    }
}

fn playing_track<H: Host>(host: &mut H) -> Option<&mut H::Track> {
    let index = host.playing()?;
    host.track_mut(index)
}

fn persist<T: TrackMeta + ?Sized>(track: &mut T) {
    if let Err(err) = track.write_through() {
        warn!(%err, "failed to persist track metadata");
    }
}

#[cfg(test)]
mod tests;
