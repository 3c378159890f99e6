use crate::config::{KEY_AUTO_CONTINUE, KEY_ENABLED, KEY_MIN_DURATION, KEY_REWIND_TIME};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKind {
    Checkbox,
    Spin { min: i64, max: i64, step: i64 },
}

/// A user editable option, stored under `key` in the config store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Setting {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: SettingKind,
    pub default: i64,
}

pub const SETTINGS: [Setting; 4] = [
    Setting {
        key: KEY_ENABLED,
        label: "Enable (track metadata gets modified!)",
        kind: SettingKind::Checkbox,
        default: 0,
    },
    Setting {
        key: KEY_AUTO_CONTINUE,
        label: "Automatically continue from last playback position",
        kind: SettingKind::Checkbox,
        default: 0,
    },
    Setting {
        key: KEY_MIN_DURATION,
        label: "Only save playback position of tracks longer than (seconds)",
        kind: SettingKind::Spin {
            min: 0,
            max: 10000,
            step: 1,
        },
        default: 0,
    },
    Setting {
        key: KEY_REWIND_TIME,
        label: "Start playback before saved playback position (seconds)",
        kind: SettingKind::Spin {
            min: 0,
            max: 1000,
            step: 1,
        },
        default: 0,
    },
];

impl Setting {
    /// Value after one toggle (checkbox) or `steps` increments (spin),
    /// kept inside the allowed range.
    pub fn adjust(&self, current: i64, steps: i64) -> i64 {
        match self.kind {
            SettingKind::Checkbox => i64::from(current == 0),
            SettingKind::Spin { min, max, step } => {
                current.saturating_add(steps.saturating_mul(step)).clamp(min, max)
            }
        }
    }
}
