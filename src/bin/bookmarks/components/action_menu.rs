use bookmarks::{Action, ActionContext};
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
    Run {
        action: Action,
        context: ActionContext,
    },
    Close,
}

pub struct ActionMenuComponent {
    actions: Vec<Action>,
    context: ActionContext,
    scroll: VerticalScroll,
    key_config: KeyConfig,
    app_cmd_tx: Sender<ComponentCommand>,
}

impl ActionMenuComponent {
    pub fn new(key_config: KeyConfig, app_cmd_tx: Sender<ComponentCommand>) -> Self {
        ActionMenuComponent {
            actions: vec![],
            context: ActionContext::Selection,
            scroll: VerticalScroll::new(),
            key_config,
            app_cmd_tx,
        }
    }

    pub fn open(&mut self, actions: Vec<Action>, context: ActionContext) {
        self.actions = actions;
        self.context = context;
        self.scroll.reset();
    }

    fn run_selected(&self) -> Result<()> {
        let Some(action) = self.actions.get(self.scroll.pos()) else {
            return Ok(());
        };
        if !action.enabled {
            return Ok(());
        }

        self.send_command(Command::Run {
            action: action.clone(),
            context: self.context,
        })
    }

    fn send_command(&self, cmd: Command) -> Result<()> {
        self.app_cmd_tx
            .send(ComponentCommand::ActionMenuComponent(cmd))?;
        Ok(())
    }
}

impl WidgetRef for ActionMenuComponent {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let width = self
            .actions
            .iter()
            .map(|a| a.title.len() as u16 + 4)
            .max()
            .unwrap_or(20)
            .max(20);
        let area = popup_area(area, width, self.actions.len() as u16 + 2);

        Clear.render(area, buf);
        let title = match self.context {
            ActionContext::Selection => "Selected track",
            ActionContext::NowPlaying => "Now playing",
        };
        let border = Block::bordered().title(title);
        let inner = border.inner(area);
        border.render(area, buf);

        self.scroll.update(inner.height as usize, self.actions.len());

        for (row, (i, action)) in self
            .actions
            .iter()
            .enumerate()
            .skip(self.scroll.y_offset.get())
            .take(inner.height as usize)
            .enumerate()
        {
            let mut style = Style::default();
            if !action.enabled {
                style = style.fg(Color::DarkGray);
            }
            if i == self.scroll.pos() {
                style = style.bg(Color::Blue);
            }

            let line_area = Rect {
                y: inner.y + row as u16,
                height: 1,
                ..inner
            };
            buf.set_style(line_area, style);
            Line::styled(action.title.as_str(), style).render(line_area, buf);
        }
    }
}

impl Component for ActionMenuComponent {
    fn event(&mut self, key: Key) -> Result<EventState> {
        if key == self.key_config.scroll_up {
            self.scroll.move_up();
            Ok(EventState::Consumed)
        } else if key == self.key_config.scroll_down {
            self.scroll.move_down(self.actions.len());
            Ok(EventState::Consumed)
        } else if key == self.key_config.confirm {
            self.run_selected()?;
            Ok(EventState::Consumed)
        } else if key == self.key_config.close_popup {
            self.send_command(Command::Close)?;
            Ok(EventState::Consumed)
        } else {
            Ok(EventState::NotConsumed)
        }
    }
}
