use std::cell::Cell;
use std::collections::HashMap;

use super::*;
use crate::bookmark_list::MAX_BOOKMARKS;
use crate::error::Result;

#[derive(Default)]
struct FakeTrack {
    duration: f32,
    meta: HashMap<String, String>,
    writes: usize,
}

impl FakeTrack {
    fn new(duration: f32) -> Self {
        FakeTrack {
            duration,
            ..Default::default()
        }
    }

    fn with_position(duration: f32, seconds: i64) -> Self {
        let mut track = FakeTrack::new(duration);
        track.set_meta_int(POSITION_FIELD, seconds);
        track
    }

    fn position(&self) -> Option<&str> {
        self.meta(POSITION_FIELD)
    }
}

impl TrackMeta for FakeTrack {
    fn duration(&self) -> f32 {
        self.duration
    }

    fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    fn set_meta(&mut self, key: &str, value: String) {
        self.meta.insert(key.to_string(), value);
    }

    fn remove_meta(&mut self, key: &str) {
        self.meta.remove(key);
    }

    fn write_through(&mut self) -> Result<()> {
        self.writes += 1;
        Ok(())
    }
}

#[derive(Default)]
struct FakeConfig(HashMap<&'static str, i64>);

impl ConfigStore for FakeConfig {
    fn get_int(&self, key: &str, default: i64) -> i64 {
        self.0.get(key).copied().unwrap_or(default)
    }
}

#[derive(Default)]
struct FakeHost {
    tracks: Vec<FakeTrack>,
    selected: Vec<usize>,
    playing: Option<usize>,
    playpos: f32,
    sent: Vec<Transport>,
    config: FakeConfig,
    locks: Cell<i32>,
    max_locks: Cell<i32>,
}

impl FakeHost {
    fn with_playing(tracks: Vec<FakeTrack>, playing: usize, playpos: f32) -> Self {
        FakeHost {
            tracks,
            playing: Some(playing),
            playpos,
            ..Default::default()
        }
    }
}

impl Host for FakeHost {
    type Track = FakeTrack;
    type Config = FakeConfig;

    fn config_store(&self) -> &FakeConfig {
        &self.config
    }

    fn track_count(&self) -> usize {
        self.tracks.len()
    }

    fn track(&self, index: usize) -> Option<&FakeTrack> {
        self.tracks.get(index)
    }

    fn track_mut(&mut self, index: usize) -> Option<&mut FakeTrack> {
        self.tracks.get_mut(index)
    }

    fn is_selected(&self, index: usize) -> bool {
        self.selected.contains(&index)
    }

    fn playing(&self) -> Option<usize> {
        self.playing
    }

    fn playpos(&self) -> f32 {
        self.playpos
    }

    fn send(&mut self, transport: Transport) {
        self.sent.push(transport);
    }

    fn lock(&self) {
        self.locks.set(self.locks.get() + 1);
        self.max_locks.set(self.max_locks.get().max(self.locks.get()));
    }

    fn unlock(&self) {
        self.locks.set(self.locks.get() - 1);
    }
}

fn manager(min_duration: u32, rewind_time: u32) -> BookmarkManager {
    BookmarkManager::new(Config {
        enabled: true,
        auto_continue: true,
        min_duration,
        rewind_time,
    })
}

#[test]
fn save_stores_elapsed_seconds() {
    let mut track = FakeTrack::new(120.0);
    assert!(manager(30, 0).save_position(&mut track, 45.0));
    assert_eq!(track.position(), Some("45"));
    assert_eq!(track.writes, 1);
}

#[test]
fn save_skips_short_tracks() {
    let mut track = FakeTrack::with_position(20.0, 7);
    for elapsed in [0.0, 5.0, 19.0, 500.0] {
        assert!(!manager(30, 0).save_position(&mut track, elapsed));
    }
    assert_eq!(track.position(), Some("7"));
    assert_eq!(track.writes, 0);
}

#[test]
fn save_skips_when_disabled() {
    let mut track = FakeTrack::new(120.0);
    let manager = BookmarkManager::default();
    assert!(!manager.save_position(&mut track, 45.0));
    assert_eq!(track.position(), None);
}

#[test]
fn save_accepts_track_exactly_at_minimum() {
    let mut track = FakeTrack::new(30.0);
    assert!(manager(30, 0).save_position(&mut track, 12.7));
    assert_eq!(track.position(), Some("12"));
}

#[test]
fn save_notifications_write_playing_track() {
    let notifications = [
        Notification::Terminate,
        Notification::Pause,
        Notification::Paused,
        Notification::Stop,
        Notification::Next,
        Notification::Prev,
        Notification::PlayNum(0),
        Notification::PlayRandom,
    ];

    for notification in notifications {
        let tracks = vec![FakeTrack::new(60.0), FakeTrack::new(300.0)];
        let mut host = FakeHost::with_playing(tracks, 1, 73.4);
        let mut manager = manager(0, 0);
        assert!(manager.message(&mut host, notification), "{notification:?}");
        assert_eq!(host.tracks[1].position(), Some("73"));
        assert_eq!(host.tracks[0].position(), None);
    }
}

#[test]
fn save_notification_without_playing_track_is_noop() {
    let mut host = FakeHost {
        tracks: vec![FakeTrack::new(60.0)],
        ..Default::default()
    };
    assert!(!manager(0, 0).message(&mut host, Notification::Pause));
    assert_eq!(host.tracks[0].position(), None);
}

#[test]
fn resume_seeks_to_position_minus_rewind() {
    let mut host = FakeHost::with_playing(vec![FakeTrack::with_position(300.0, 100)], 0, 0.0);
    assert!(manager(0, 20).message(&mut host, Notification::SongStarted));
    assert_eq!(host.sent, vec![Transport::Seek { ms: 80_000 }]);
}

#[test]
fn resume_inside_rewind_window_does_not_seek() {
    let mut host = FakeHost::with_playing(vec![FakeTrack::with_position(300.0, 10)], 0, 0.0);
    assert!(!manager(0, 20).message(&mut host, Notification::SongStarted));
    assert!(host.sent.is_empty());

    let mut host = FakeHost::with_playing(vec![FakeTrack::with_position(300.0, 20)], 0, 0.0);
    assert!(!manager(0, 20).resume_position(&mut host));
    assert!(host.sent.is_empty());
}

#[test]
fn resume_without_saved_position_does_not_seek() {
    let mut host = FakeHost::with_playing(vec![FakeTrack::new(300.0)], 0, 0.0);
    assert!(!manager(0, 0).resume_position(&mut host));
    assert!(host.sent.is_empty());
}

#[test]
fn resume_requires_auto_continue() {
    let mut host = FakeHost::with_playing(vec![FakeTrack::with_position(300.0, 100)], 0, 0.0);
    let manager = BookmarkManager::new(Config {
        enabled: true,
        auto_continue: false,
        min_duration: 0,
        rewind_time: 0,
    });
    assert!(!manager.resume_position(&mut host));
    assert!(host.sent.is_empty());
}

#[test]
fn resume_target_never_negative() {
    let manager = manager(0, 20);
    assert_eq!(manager.resume_target(&FakeTrack::with_position(10.0, 10)), 0);
    assert_eq!(manager.resume_target(&FakeTrack::with_position(10.0, 100)), 80_000);
    assert_eq!(manager.resume_target(&FakeTrack::new(10.0)), 0);
}

#[test]
fn resume_saturates_out_of_range_positions() {
    let mut manager = manager(0, 20);

    let far = FakeTrack::with_position(10.0, i64::MAX);
    assert_eq!(manager.resume_target(&far), u64::MAX);
    assert_eq!(manager.resume_seek(&far), Some(u64::MAX));

    let negative = FakeTrack::with_position(10.0, i64::MIN);
    assert_eq!(manager.resume_target(&negative), 0);
    assert_eq!(manager.resume_seek(&negative), None);

    let mut host = FakeHost::with_playing(vec![far, negative], 0, 0.0);
    assert!(manager.message(&mut host, Notification::SongStarted));
    assert_eq!(host.sent, vec![Transport::Seek { ms: u64::MAX }]);
    let actions = manager.actions(&host, ActionContext::NowPlaying);
    assert!(actions[0].enabled);
}

#[test]
fn finished_track_resets_position() {
    let mut track = FakeTrack::with_position(200.0, 150);
    assert!(manager(0, 0).handle_track_finished(&mut track, 197.0));
    assert_eq!(track.position(), Some("0"));
    assert_eq!(track.writes, 1);
}

#[test]
fn track_stopped_before_end_tolerance_keeps_position() {
    let mut track = FakeTrack::with_position(200.0, 150);
    assert!(!manager(0, 0).handle_track_finished(&mut track, 195.9));
    assert_eq!(track.position(), Some("150"));
    assert_eq!(track.writes, 0);
}

#[test]
fn song_finished_notification_uses_playpos() {
    let mut host = FakeHost::with_playing(vec![FakeTrack::with_position(200.0, 150)], 0, 196.0);
    assert!(manager(0, 0).message(&mut host, Notification::SongFinished));
    assert_eq!(host.tracks[0].position(), Some("0"));
}

#[test]
fn config_changed_reloads_from_host_store() {
    let mut host = FakeHost::default();
    host.config.0.insert(crate::config::KEY_ENABLED, 1);
    host.config.0.insert(crate::config::KEY_REWIND_TIME, 9);

    let mut manager = BookmarkManager::default();
    assert!(manager.message(&mut host, Notification::ConfigChanged));
    assert!(manager.config().enabled);
    assert!(!manager.config().auto_continue);
    assert_eq!(manager.config().rewind_time, 9);
}

#[test]
fn bookmarks_append_in_order_without_dedup() {
    let manager = manager(0, 0);
    let mut track = FakeTrack::new(600.0);
    for offset in [90, 30, 90] {
        assert!(manager.add_bookmark(&mut track, offset));
    }
    assert_eq!(track.meta(BOOKMARKS_FIELD), Some("90\n30\n90\n"));
    assert_eq!(track.writes, 3);

    let listed: Vec<_> = manager.list_bookmarks(&track).collect();
    assert_eq!(listed, vec![(0, 90), (1, 30), (2, 90)]);
}

#[test]
fn bookmarks_stop_at_cap() {
    let manager = manager(0, 0);
    let mut track = FakeTrack::new(600.0);
    for offset in 0..MAX_BOOKMARKS as u32 {
        assert!(manager.add_bookmark(&mut track, offset * 10));
    }
    assert!(!manager.add_bookmark(&mut track, 999));
    assert_eq!(manager.list_bookmarks(&track).count(), MAX_BOOKMARKS);
}

#[test]
fn bookmark_after_unterminated_value_starts_new_line() {
    let manager = manager(0, 0);
    let mut track = FakeTrack::new(600.0);
    track.set_meta(BOOKMARKS_FIELD, "5\n10".to_string());

    assert!(manager.add_bookmark(&mut track, 15));
    assert_eq!(track.meta(BOOKMARKS_FIELD), Some("5\n10\n15\n"));

    let listed: Vec<_> = manager.list_bookmarks(&track).map(|(_, o)| o).collect();
    assert_eq!(listed, vec![5, 10, 15]);
}

#[test]
fn same_second_bookmark_is_refused() {
    let manager = manager(0, 0);
    let mut track = FakeTrack::new(600.0);
    assert!(manager.add_bookmark(&mut track, 30));
    assert!(!manager.add_bookmark(&mut track, 30));
    assert_eq!(track.writes, 1);

    let accepted = (31..131).filter(|&o| manager.add_bookmark(&mut track, o)).count();
    assert_eq!(accepted, MAX_BOOKMARKS - 1);

    let stored = track.meta(BOOKMARKS_FIELD).unwrap_or_default().lines().count();
    assert_eq!(stored, MAX_BOOKMARKS);
    assert_eq!(manager.list_bookmarks(&track).count(), MAX_BOOKMARKS);
}

#[test]
fn bookmarks_behind_garbage_stay_bounded() {
    let manager = manager(0, 0);
    let mut track = FakeTrack::new(600.0);
    track.set_meta(BOOKMARKS_FIELD, "12\nabc\n40\n".to_string());

    for offset in 100..200 {
        manager.add_bookmark(&mut track, offset);
    }

    let stored = track.meta(BOOKMARKS_FIELD).unwrap_or_default().lines().count();
    assert_eq!(stored, MAX_BOOKMARKS);

    let listed: Vec<_> = manager.list_bookmarks(&track).map(|(_, o)| o).collect();
    assert_eq!(listed.len(), MAX_BOOKMARKS);
    assert_eq!(listed[..3], [12, 100, 101]);
}

#[test]
fn list_bookmarks_honours_repeat_marker() {
    let mut track = FakeTrack::new(600.0);
    track.set_meta(BOOKMARKS_FIELD, "30\n90\n90\n150".to_string());
    let listed: Vec<_> = manager(0, 0).list_bookmarks(&track).map(|(_, o)| o).collect();
    assert_eq!(listed, vec![30, 90]);
}

#[test]
fn clear_bookmarks_removes_field() {
    let manager = manager(0, 0);
    let mut track = FakeTrack::new(600.0);
    manager.add_bookmark(&mut track, 5);
    manager.clear_bookmarks(&mut track);
    assert!(!track.meta_exists(BOOKMARKS_FIELD));
    assert_eq!(manager.list_bookmarks(&track).count(), 0);
}

#[test]
fn selection_resolves_first_selected_item() {
    let mut host = FakeHost::with_playing(
        vec![FakeTrack::new(1.0), FakeTrack::new(1.0), FakeTrack::new(1.0)],
        0,
        0.0,
    );
    host.selected = vec![2, 1];

    let manager = manager(0, 0);
    assert_eq!(manager.selected_track(&host, ActionContext::Selection), Some(1));
    assert_eq!(manager.selected_track(&host, ActionContext::NowPlaying), Some(0));

    host.selected.clear();
    host.playing = None;
    assert_eq!(manager.selected_track(&host, ActionContext::Selection), None);
    assert_eq!(manager.selected_track(&host, ActionContext::NowPlaying), None);
}

#[test]
fn actions_show_resume_time_and_bookmarks() {
    let mut track = FakeTrack::with_position(600.0, 100);
    track.set_meta(BOOKMARKS_FIELD, "30\n95\n".to_string());
    let host = FakeHost::with_playing(vec![track], 0, 0.0);

    let actions = manager(0, 20).actions(&host, ActionContext::NowPlaying);
    let titles: Vec<_> = actions.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(
        titles,
        vec![
            "Resume at last position (00:01:20)",
            "Reset last playback position",
            "Add bookmark",
            "Clear bookmarks",
            "Bookmark 1 (00:00:30)",
            "Bookmark 2 (00:01:35)",
        ]
    );
    assert!(actions.iter().all(|a| a.enabled));
    assert_eq!(actions[5].kind, ActionKind::JumpToBookmark { offset: 95 });
    assert_eq!(host.locks.get(), 0);
    assert_eq!(host.max_locks.get(), 1);
}

#[test]
fn actions_disabled_without_saved_position() {
    let host = FakeHost::with_playing(vec![FakeTrack::with_position(600.0, 0)], 0, 0.0);
    let actions = manager(0, 0).actions(&host, ActionContext::NowPlaying);
    assert!(!actions[0].enabled);
    assert!(!actions[1].enabled);
    assert_eq!(actions[0].title, "Resume at last position (00:00:00)");
    assert!(!actions[3].enabled);
    assert_eq!(actions.len(), 4);
}

#[test]
fn actions_without_track_are_all_disabled() {
    let host = FakeHost::default();
    let actions = manager(0, 0).actions(&host, ActionContext::Selection);
    assert!(actions.iter().all(|a| !a.enabled));
    assert_eq!(host.locks.get(), 0);
}

#[test]
fn actions_disabled_when_saving_off() {
    let host = FakeHost::with_playing(vec![FakeTrack::with_position(600.0, 100)], 0, 0.0);
    let actions = BookmarkManager::default().actions(&host, ActionContext::NowPlaying);
    assert!(!actions[0].enabled);
    assert!(!actions[1].enabled);
    assert!(!actions[2].enabled);
}

#[test]
fn run_resume_plays_then_seeks() {
    let mut host = FakeHost {
        tracks: vec![FakeTrack::new(1.0), FakeTrack::with_position(600.0, 10)],
        selected: vec![1],
        ..Default::default()
    };
    let manager = manager(0, 20);
    // Menu entry is disabled only by a zero record, not by the rewind window.
    let action = manager.actions(&host, ActionContext::Selection).remove(0);
    assert!(manager.run_action(&mut host, &action, ActionContext::Selection));
    assert_eq!(
        host.sent,
        vec![Transport::PlayTrack(1), Transport::Seek { ms: 0 }]
    );
}

#[test]
fn run_reset_zeroes_selected_track() {
    let mut host = FakeHost {
        tracks: vec![FakeTrack::with_position(600.0, 42)],
        selected: vec![0],
        ..Default::default()
    };
    let manager = manager(0, 0);
    let action = manager.actions(&host, ActionContext::Selection).remove(1);
    assert!(manager.run_action(&mut host, &action, ActionContext::Selection));
    assert_eq!(host.tracks[0].position(), Some("0"));
    assert_eq!(host.tracks[0].writes, 1);
}

#[test]
fn run_add_bookmark_uses_playpos() {
    let mut host = FakeHost::with_playing(vec![FakeTrack::new(600.0)], 0, 61.8);
    let manager = manager(0, 0);
    let action = manager.actions(&host, ActionContext::NowPlaying).remove(2);
    assert!(manager.run_action(&mut host, &action, ActionContext::NowPlaying));
    assert_eq!(host.tracks[0].meta(BOOKMARKS_FIELD), Some("61\n"));
}

#[test]
fn run_jump_plays_then_seeks_to_offset() {
    let mut track = FakeTrack::new(600.0);
    track.set_meta(BOOKMARKS_FIELD, "30\n".to_string());
    let mut host = FakeHost::with_playing(vec![track], 0, 0.0);

    let manager = manager(0, 0);
    let action = manager.actions(&host, ActionContext::NowPlaying).remove(4);
    assert!(manager.run_action(&mut host, &action, ActionContext::NowPlaying));
    assert_eq!(
        host.sent,
        vec![Transport::PlayTrack(0), Transport::Seek { ms: 30_000 }]
    );
}

#[test]
fn disabled_actions_do_nothing() {
    let mut host = FakeHost::with_playing(vec![FakeTrack::with_position(600.0, 42)], 0, 0.0);
    let action = Action::new(ActionKind::Reset, "Reset last playback position", false);
    assert!(!manager(0, 0).run_action(&mut host, &action, ActionContext::NowPlaying));
    assert_eq!(host.tracks[0].position(), Some("42"));
}
