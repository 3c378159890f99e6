use color_eyre::Result;
use crossbeam_channel::Sender;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Paragraph};

use super::ComponentCommand;
use super::{Component, Widget, WidgetRef};
use crate::components::utils::VerticalScroll;
use crate::config::KeyConfig;
use crate::event::{EventState, Key};

pub struct TracklistComponent {
    names: Vec<String>,
    playing: Option<usize>,
    scroll: VerticalScroll,
    key_config: KeyConfig,
    app_cmd_tx: Sender<ComponentCommand>,
}

pub enum Command {
    Play { index: usize },
}

impl TracklistComponent {
    pub fn new(
        names: Vec<String>,
        key_config: KeyConfig,
        app_cmd_tx: Sender<ComponentCommand>,
    ) -> Self {
        Self {
            names,
            playing: None,
            scroll: VerticalScroll::new(),
            key_config,
            app_cmd_tx,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        (!self.names.is_empty()).then(|| self.scroll.pos())
    }

    pub fn set_playing(&mut self, playing: Option<usize>) {
        self.playing = playing;
    }

    fn next_col(&self) {
        self.scroll.move_down(self.names.len());
    }

    fn prev_col(&self) {
        self.scroll.move_up();
    }

    fn play_selected(&mut self) -> Result<()> {
        if let Some(index) = self.selected() {
            self.send_command(Command::Play { index })?;
        }
        Ok(())
    }

    fn send_command(&self, cmd: Command) -> Result<()> {
        self.app_cmd_tx
            .send(ComponentCommand::TracklistComponent(cmd))?;
        Ok(())
    }
}

impl WidgetRef for TracklistComponent {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let area = {
            let border = Block::bordered().title("Tracks");
            let a = border.inner(area);
            border.render(area, buf);
            a
        };

        self.scroll.update(area.height as usize, self.names.len());

        let tracks = self
            .names
            .iter()
            .enumerate()
            .skip(self.scroll.y_offset.get())
            .take(area.height as usize)
            .map(|(i, name)| {
                let marker = if self.playing == Some(i) { "> " } else { "  " };
                format!("{marker}{name}")
            })
            .collect::<Vec<String>>();

        Paragraph::new(tracks.join("\n")).render(area, buf);

        if let Some(selected) = self.selected() {
            let row = selected.saturating_sub(self.scroll.y_offset.get()) as u16 + area.y;
            if row < area.bottom() {
                for x in area.left()..area.right() {
                    if let Some(cell) = buf.cell_mut((x, row)) {
                        cell.set_bg(Color::Blue);
                    }
                }
            }
        }
    }
}

impl Component for TracklistComponent {
    fn event(&mut self, key: Key) -> Result<EventState> {
        if key == self.key_config.scroll_up {
            self.prev_col();
            Ok(EventState::Consumed)
        } else if key == self.key_config.scroll_down {
            self.next_col();
            Ok(EventState::Consumed)
        } else if key == self.key_config.play_audio {
            self.play_selected()?;
            Ok(EventState::Consumed)
        } else {
            Ok(EventState::NotConsumed)
        }
    }
}
