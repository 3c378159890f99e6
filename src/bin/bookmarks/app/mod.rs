mod player;

use std::time::Duration;

use bookmarks::settings::SETTINGS;
use bookmarks::io::{get_files, load_tracks};
use bookmarks::{
    ActionContext, BookmarkManager, ConfigStore, Notification, SqliteConfigStore, Transport,
};
use color_eyre::Result;
use crossbeam_channel::{Receiver, Sender};
use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use tracing::{debug, info, warn};

use crate::components::{
    ActionMenuComponent, Component, ComponentCommand, PlayerControlsComponent, SettingsComponent,
    TracklistComponent, WidgetRef,
};
use crate::config::{AUDIO_EXTENSIONS, PlayerConfig};
use crate::event::{AudioMessage, Command as AudioCommand, EventState, Key};

use player::Player;

const SEEK_STEP: Duration = Duration::from_secs(10);

pub enum Focus {
    Tracklist,
    Actions,
    Settings,
}

pub struct App {
    tracklist: TracklistComponent,
    action_menu: ActionMenuComponent,
    settings: SettingsComponent,
    player_controls: PlayerControlsComponent,

    player: Player,
    manager: BookmarkManager,

    focus: Focus,

    audio_tx: Sender<AudioCommand>,
    widget_cmd_rx: Receiver<ComponentCommand>,

    pub config: PlayerConfig,
}

impl App {
    pub fn new(
        audio_tx: Sender<AudioCommand>,
        config: PlayerConfig,
        store: SqliteConfigStore,
    ) -> Result<Self> {
        let paths = get_files(&config.audio_dir, &AUDIO_EXTENSIONS)?;
        let tracks = load_tracks(paths);
        info!(count = tracks.len(), dir = %config.audio_dir.display(), "library loaded");

        let (app_cmd_tx, app_cmd_rx) = crossbeam_channel::bounded(256);

        let manager = BookmarkManager::load(&store);
        let names = tracks.iter().map(|t| t.name()).collect();

        Ok(App {
            tracklist: TracklistComponent::new(
                names,
                config.key_config.clone(),
                app_cmd_tx.clone(),
            ),
            action_menu: ActionMenuComponent::new(config.key_config.clone(), app_cmd_tx.clone()),
            settings: SettingsComponent::new(config.key_config.clone(), app_cmd_tx),
            player_controls: PlayerControlsComponent::new(),
            player: Player::new(tracks, store),
            manager,
            focus: Focus::Tracklist,
            audio_tx,
            widget_cmd_rx: app_cmd_rx,
            config,
        })
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let [main_area, controls_area] = Layout::new(
            Direction::Vertical,
            [Constraint::Fill(1), Constraint::Length(5)],
        )
        .areas(area);

        self.player_controls.render_ref(controls_area, buf);
        self.tracklist.render_ref(main_area, buf);

        match self.focus {
            Focus::Tracklist => {}
            Focus::Actions => self.action_menu.render_ref(main_area, buf),
            Focus::Settings => self.settings.render_ref(main_area, buf),
        }
    }

    pub fn event(&mut self, key: Key) -> Result<EventState> {
        let mut res = self.component_event(key)?;
        self.player.selected = self.tracklist.selected();

        if !res.is_consumed() {
            if let Focus::Tracklist = self.focus {
                res = self.player_event(key)?;
            }
        }

        self.drain_commands()?;
        self.drain_transport()?;
        Ok(res)
    }

    pub fn tick(&mut self) -> Result<()> {
        self.audio_tx.send(AudioCommand::SendState)?;
        Ok(())
    }

    pub fn audio(&mut self, audio_message: AudioMessage) -> Result<()> {
        match audio_message {
            AudioMessage::EndOfTrack { generation } => {
                if !self.player.is_current(generation) {
                    debug!(generation, "ignoring end of an earlier track");
                    return self.drain_transport();
                }

                if let Some(end) = self.player.playing_track().map(|t| t.duration.as_secs_f32()) {
                    self.player.playpos = end;
                }
                self.notify(Notification::SongFinished);
                self.player.stop();
                self.tracklist.set_playing(None);
                self.player_controls.clear();
            }
            AudioMessage::Paused => {
                self.player.paused = true;
                self.player_controls.paused = true;
                self.notify(Notification::Paused);
            }
            AudioMessage::State(state) => {
                if self.player.is_current(state.generation) {
                    self.player.playpos = state.pos.as_secs_f32();
                    self.player.paused = state.paused;
                    self.player_controls.elapsed = state.pos.as_secs();
                    self.player_controls.paused = state.paused;
                    if let Some(total) = state.total_duration {
                        self.player_controls.total = total.as_secs();
                    }
                }
            }
            AudioMessage::Noop => {}
        }

        self.drain_transport()
    }

    /// Saves the playing position before the player goes away.
    pub fn shutdown(&mut self) {
        self.notify(Notification::Terminate);
    }

    fn notify(&mut self, notification: Notification) {
        self.manager.message(&mut self.player, notification);
    }

    fn component_event(&mut self, key: Key) -> Result<EventState> {
        match self.focus {
            Focus::Tracklist => self.tracklist.event(key),
            Focus::Actions => self.action_menu.event(key),
            Focus::Settings => self.settings.event(key),
        }
    }

    fn player_event(&mut self, key: Key) -> Result<EventState> {
        let keys = self.config.key_config.clone();

        if key == keys.pause {
            self.toggle_pause()?;
        } else if key == keys.stop {
            self.stop()?;
        } else if key == keys.skip_to_next_audio {
            self.skip(1, Notification::Next)?;
        } else if key == keys.skip_to_prev_audio {
            self.skip(-1, Notification::Prev)?;
        } else if key == keys.shuffle {
            self.play_random()?;
        } else if key == keys.seek_forward {
            self.seek_relative(SEEK_STEP, true)?;
        } else if key == keys.seek_backward {
            self.seek_relative(SEEK_STEP, false)?;
        } else if key == keys.open_actions {
            self.open_actions(ActionContext::Selection);
        } else if key == keys.open_now_playing_actions {
            self.open_actions(ActionContext::NowPlaying);
        } else if key == keys.open_settings {
            self.open_settings();
        } else {
            return Ok(EventState::NotConsumed);
        }

        Ok(EventState::Consumed)
    }

    fn toggle_pause(&mut self) -> Result<()> {
        if self.player.playing.is_none() {
            return Ok(());
        }

        if self.player.paused {
            self.player.paused = false;
            self.player_controls.paused = false;
            self.audio_tx.send(AudioCommand::Resume)?;
        } else {
            self.notify(Notification::Pause);
            self.audio_tx.send(AudioCommand::Pause)?;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        if self.player.playing.is_none() {
            return Ok(());
        }

        self.notify(Notification::Stop);
        self.audio_tx.send(AudioCommand::Stop)?;
        self.player.stop();
        self.tracklist.set_playing(None);
        self.player_controls.clear();
        Ok(())
    }

    fn skip(&mut self, step: isize, reason: Notification) -> Result<()> {
        let Some(current) = self.player.playing else {
            return Ok(());
        };

        let len = self.player.library.len() as isize;
        let next = current as isize + step;
        if next < 0 || next >= len {
            return Ok(());
        }

        self.play(next as usize, reason)
    }

    fn play_random(&mut self) -> Result<()> {
        let len = self.player.library.len();
        if len == 0 {
            return Ok(());
        }

        let index = rand::rng().random_range(0..len);
        self.play(index, Notification::PlayRandom)
    }

    fn seek_relative(&mut self, step: Duration, forward: bool) -> Result<()> {
        if self.player.playing.is_none() {
            return Ok(());
        }

        let pos = Duration::from_secs_f32(self.player.playpos.max(0.0));
        let target = if forward {
            pos + step
        } else {
            pos.saturating_sub(step)
        };
        self.audio_tx.send(AudioCommand::Seek(target))?;
        Ok(())
    }

    /// Starts `index`. `reason` is delivered first so the previous track's
    /// position is saved before it is replaced.
    fn play(&mut self, index: usize, reason: Notification) -> Result<()> {
        let Some(track) = self.player.library.get(index) else {
            return Ok(());
        };
        let path = track.path.clone();
        let name = track.name();
        let total = track.duration.as_secs();

        self.notify(reason);

        let generation = self.player.start(index);
        self.audio_tx.send(AudioCommand::Play { path, generation })?;
        self.tracklist.set_playing(Some(index));
        self.player_controls.clear();
        self.player_controls.name = Some(name);
        self.player_controls.total = total;

        // A resume seek issued on start goes ahead of anything already queued.
        let queued = std::mem::take(&mut self.player.pending);
        self.notify(Notification::SongStarted);
        self.player.pending.extend(queued);

        Ok(())
    }

    fn open_actions(&mut self, context: ActionContext) {
        let actions = self.manager.actions(&self.player, context);
        self.action_menu.open(actions, context);
        self.focus = Focus::Actions;
    }

    fn open_settings(&mut self) {
        let store = &self.player.store;
        let values = SETTINGS.map(|s| store.get_int(s.key, s.default));
        self.settings.open(values);
        self.focus = Focus::Settings;
    }

    fn drain_commands(&mut self) -> Result<()> {
        while let Ok(cmd) = self.widget_cmd_rx.try_recv() {
            match cmd {
                ComponentCommand::TracklistComponent(cmd) => {
                    use crate::components::tracklist::Command;
                    match cmd {
                        Command::Play { index } => {
                            self.play(index, Notification::PlayNum(index))?;
                        }
                    }
                }
                ComponentCommand::ActionMenuComponent(cmd) => {
                    use crate::components::action_menu::Command;
                    match cmd {
                        Command::Run { action, context } => {
                            self.manager.run_action(&mut self.player, &action, context);
                            self.focus = Focus::Tracklist;
                        }
                        Command::Close => self.focus = Focus::Tracklist,
                    }
                }
                ComponentCommand::SettingsComponent(cmd) => {
                    use crate::components::settings::Command;
                    match cmd {
                        Command::Set { key, value } => {
                            if let Err(err) = self.player.store.set_int(key, value) {
                                warn!(key, %err, "cannot store setting");
                            }
                            self.notify(Notification::ConfigChanged);
                        }
                        Command::Close => self.focus = Focus::Tracklist,
                    }
                }
            }
        }

        Ok(())
    }

    fn drain_transport(&mut self) -> Result<()> {
        while let Some(transport) = self.player.pending.pop_front() {
            match transport {
                Transport::PlayTrack(index) => {
                    self.play(index, Notification::PlayNum(index))?;
                }
                Transport::Seek { ms } => {
                    self.audio_tx
                        .send(AudioCommand::Seek(Duration::from_millis(ms)))?;
                }
            }
        }

        Ok(())
    }
}
