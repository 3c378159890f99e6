//! Saves and restores the playback position of tracks, and keeps a short list
//! of bookmarks per track, driven by a host player's notifications.

pub mod actions;
pub mod bookmark_list;
pub mod config;
pub mod error;
pub mod event;
pub mod host;
pub mod io;
pub mod manager;
pub mod models;
pub mod settings;

pub use actions::{Action, ActionKind};
pub use config::{Config, ConfigStore, SqliteConfigStore};
pub use error::{Error, Result};
pub use event::{ActionContext, Notification, Transport};
pub use host::{Host, TrackMeta};
pub use manager::BookmarkManager;

/// Metadata field holding the last playback position in seconds.
pub const POSITION_FIELD: &str = "LAST_PLAYPOS";

/// Metadata field holding the newline separated bookmark offsets.
pub const BOOKMARKS_FIELD: &str = "BOOKMARKS";
