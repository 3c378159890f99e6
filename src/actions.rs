#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Resume,
    Reset,
    AddBookmark,
    ClearBookmarks,
    JumpToBookmark { offset: u32 },
}

/// One user invocable entry of the action menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub title: String,
    pub enabled: bool,
}

impl Action {
    pub fn new(kind: ActionKind, title: impl Into<String>, enabled: bool) -> Self {
        Action {
            kind,
            title: title.into(),
            enabled,
        }
    }
}

/// Formats whole seconds as `HH:MM:SS`.
pub fn format_hms(seconds: u64) -> String {
    let hr = seconds / 3600;
    let mn = (seconds % 3600) / 60;
    let sc = seconds % 60;
    format!("{hr:02}:{mn:02}:{sc:02}")
}

pub fn resume_title(target_ms: u64) -> String {
    format!("Resume at last position ({})", format_hms(target_ms / 1000))
}

pub fn bookmark_title(index: usize, offset: u32) -> String {
    format!("Bookmark {} ({})", index + 1, format_hms(offset as u64))
}
