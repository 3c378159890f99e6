use bookmarks::settings::{SETTINGS, SettingKind};
use color_eyre::Result;
use crossbeam_channel::Sender;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear};

use super::{Component, ComponentCommand, Widget, WidgetRef, popup_area};
use crate::components::utils::VerticalScroll;
use crate::config::KeyConfig;
use crate::event::{EventState, Key};

pub enum Command {
    Set { key: &'static str, value: i64 },
    Close,
}

pub struct SettingsComponent {
    values: [i64; SETTINGS.len()],
    scroll: VerticalScroll,
    key_config: KeyConfig,
    app_cmd_tx: Sender<ComponentCommand>,
}

impl SettingsComponent {
    pub fn new(key_config: KeyConfig, app_cmd_tx: Sender<ComponentCommand>) -> Self {
        SettingsComponent {
            values: SETTINGS.map(|s| s.default),
            scroll: VerticalScroll::new(),
            key_config,
            app_cmd_tx,
        }
    }

    pub fn open(&mut self, values: [i64; SETTINGS.len()]) {
        self.values = values;
        self.scroll.reset();
    }

    fn adjust(&mut self, steps: i64) -> Result<()> {
        let index = self.scroll.pos();
        let setting = SETTINGS[index];
        let value = setting.adjust(self.values[index], steps);
        self.values[index] = value;

        self.send_command(Command::Set {
            key: setting.key,
            value,
        })
    }

    fn send_command(&self, cmd: Command) -> Result<()> {
        self.app_cmd_tx
            .send(ComponentCommand::SettingsComponent(cmd))?;
        Ok(())
    }
}

impl WidgetRef for SettingsComponent {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let area = popup_area(area, 72, SETTINGS.len() as u16 + 2);

        Clear.render(area, buf);
        let border = Block::bordered().title("Settings");
        let inner = border.inner(area);
        border.render(area, buf);

        for (i, (setting, value)) in SETTINGS.iter().zip(self.values).enumerate() {
            if i as u16 >= inner.height {
                break;
            }

            let text = match setting.kind {
                SettingKind::Checkbox => {
                    let mark = if value != 0 { 'x' } else { ' ' };
                    format!("[{mark}] {}", setting.label)
                }
                SettingKind::Spin { .. } => format!("{}: {value}", setting.label),
            };

            let style = if i == self.scroll.pos() {
                Style::default().bg(Color::Blue)
            } else {
                Style::default()
            };

            let line_area = Rect {
                y: inner.y + i as u16,
                height: 1,
                ..inner
            };
            buf.set_style(line_area, style);
            Line::styled(text, style).render(line_area, buf);
        }
    }
}

impl Component for SettingsComponent {
    fn event(&mut self, key: Key) -> Result<EventState> {
        let kind = SETTINGS[self.scroll.pos()].kind;

        if key == self.key_config.scroll_up {
            self.scroll.move_up();
            Ok(EventState::Consumed)
        } else if key == self.key_config.scroll_down {
            self.scroll.move_down(SETTINGS.len());
            Ok(EventState::Consumed)
        } else if key == self.key_config.toggle && kind == SettingKind::Checkbox {
            self.adjust(1)?;
            Ok(EventState::Consumed)
        } else if key == self.key_config.increase {
            self.adjust(1)?;
            Ok(EventState::Consumed)
        } else if key == self.key_config.decrease {
            self.adjust(-1)?;
            Ok(EventState::Consumed)
        } else if key == self.key_config.close_popup {
            self.send_command(Command::Close)?;
            Ok(EventState::Consumed)
        } else {
            Ok(EventState::NotConsumed)
        }
    }
}
