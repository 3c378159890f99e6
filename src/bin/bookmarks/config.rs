use std::path::PathBuf;

use crate::event::Key;

pub const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "flac", "ogg", "wav", "m4a"];

pub struct PlayerConfig {
    pub audio_dir: PathBuf,
    pub data_dir: PathBuf,
    pub key_config: KeyConfig,
}

impl PlayerConfig {
    pub fn new(audio_dir: PathBuf, data_dir: PathBuf) -> Self {
        PlayerConfig {
            audio_dir,
            data_dir,
            key_config: KeyConfig::default(),
        }
    }

    /// Audio dir from the first argument, falling back to the user's music
    /// dir.
    pub fn from_env() -> Self {
        let audio_dir = std::env::args_os()
            .nth(1)
            .map(PathBuf::from)
            .or_else(dirs::audio_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        let data_dir = dirs::data_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("bookmarks");

        PlayerConfig::new(audio_dir, data_dir)
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("config.db3")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("bookmarks.log")
    }
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct KeyConfig {
    pub quit: Key,

    pub scroll_up: Key,
    pub scroll_down: Key,

    pub play_audio: Key,

    pub skip_to_next_audio: Key,
    pub skip_to_prev_audio: Key,
    pub seek_forward: Key,
    pub seek_backward: Key,

    pub pause: Key,
    pub stop: Key,
    pub shuffle: Key,

    pub open_actions: Key,
    pub open_now_playing_actions: Key,
    pub open_settings: Key,

    pub confirm: Key,
    pub close_popup: Key,
    pub toggle: Key,
    pub increase: Key,
    pub decrease: Key,
}

impl Default for KeyConfig {
    fn default() -> Self {
        KeyConfig {
            quit: Key::Esc,
            scroll_up: Key::Char('k'),
            scroll_down: Key::Char('j'),
            play_audio: Key::Enter,
            skip_to_next_audio: Key::Char('l'),
            skip_to_prev_audio: Key::Char('h'),
            seek_forward: Key::Ctrl('l'),
            seek_backward: Key::Ctrl('h'),
            pause: Key::Char(' '),
            stop: Key::Char('x'),
            shuffle: Key::Char('s'),
            open_actions: Key::Char('a'),
            open_now_playing_actions: Key::Char('A'),
            open_settings: Key::Char('o'),
            confirm: Key::Enter,
            close_popup: Key::Esc,
            toggle: Key::Char(' '),
            increase: Key::Char('+'),
            decrease: Key::Char('-'),
        }
    }
}
