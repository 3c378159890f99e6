/// Notifications pushed by the host player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    Terminate,
    Pause,
    /// Pause was confirmed by the streamer.
    Paused,
    Stop,
    Next,
    Prev,
    /// A specific playlist item was requested.
    PlayNum(usize),
    PlayRandom,
    SongFinished,
    SongStarted,
    ConfigChanged,
}

impl Notification {
    /// Points at which the play position is authoritative and may not be
    /// retrievable afterwards.
    pub fn saves_position(&self) -> bool {
        matches!(
            self,
            Notification::Terminate
                | Notification::Pause
                | Notification::Paused
                | Notification::Stop
                | Notification::Next
                | Notification::Prev
                | Notification::PlayNum(_)
                | Notification::PlayRandom
        )
    }
}

/// Which track an action refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionContext {
    /// First selected item of the current playlist.
    Selection,
    /// Track the streamer is playing.
    NowPlaying,
}

/// Transport requests sent back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Seek { ms: u64 },
    PlayTrack(usize),
}
