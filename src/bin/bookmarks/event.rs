use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, KeyCode, KeyModifiers};

use crate::audio_thread::SinkState;

#[derive(PartialEq, Debug)]
pub enum EventState {
    Consumed,
    NotConsumed,
}

impl EventState {
    pub fn is_consumed(&self) -> bool {
        *self == EventState::Consumed
    }
}

impl From<bool> for EventState {
    fn from(consumed: bool) -> Self {
        if consumed {
            EventState::Consumed
        } else {
            EventState::NotConsumed
        }
    }
}

#[derive(Clone)]
pub enum Event {
    Tick,
    Input(Key),
    Audio(AudioMessage),
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum Key {
    Enter,
    Tab,
    Backspace,
    Esc,

    Left,
    Right,
    Up,
    Down,

    Home,
    End,
    PageUp,
    PageDown,

    Char(char),
    Ctrl(char),
    Alt(char),
    Unknown,
}

impl From<event::KeyEvent> for Key {
    fn from(value: event::KeyEvent) -> Self {
        let mods = value.modifiers;
        let code = value.code;
        match code {
            KeyCode::Enter => Self::Enter,
            KeyCode::Tab => Self::Tab,
            KeyCode::Backspace => Self::Backspace,
            KeyCode::Esc => Self::Esc,

            KeyCode::Left => Self::Left,
            KeyCode::Right => Self::Right,
            KeyCode::Up => Self::Up,
            KeyCode::Down => Self::Down,

            KeyCode::Home => Self::Home,
            KeyCode::End => Self::End,
            KeyCode::PageUp => Self::PageUp,
            KeyCode::PageDown => Self::PageDown,

            KeyCode::Char(c) if mods == KeyModifiers::CONTROL => Self::Ctrl(c),
            KeyCode::Char(c) if mods == KeyModifiers::ALT => Self::Alt(c),
            KeyCode::Char(c) => Self::Char(c),
            _ => Self::Unknown,
        }
    }
}

#[derive(Clone)]
pub enum AudioMessage {
    /// The source started by the `Play` carrying `generation` ran dry.
    EndOfTrack { generation: u64 },
    /// The sink is paused.
    Paused,
    State(SinkState),
    Noop,
}

pub enum Command {
    Play { path: PathBuf, generation: u64 },
    Pause,
    Resume,
    Stop,
    Seek(Duration),
    SendState,
}
