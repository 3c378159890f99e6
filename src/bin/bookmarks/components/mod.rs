pub mod action_menu;
mod player_controls;
pub mod settings;
pub mod tracklist;
mod utils;

pub use action_menu::ActionMenuComponent;
pub use player_controls::PlayerControlsComponent;
pub use settings::SettingsComponent;
pub use tracklist::TracklistComponent;

use color_eyre::Result;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
pub use ratatui::widgets::Widget;
pub use ratatui::widgets::WidgetRef;

use crate::event::{EventState, Key};

pub enum ComponentCommand {
    TracklistComponent(tracklist::Command),
    ActionMenuComponent(action_menu::Command),
    SettingsComponent(settings::Command),
}

pub trait Component {
    fn event(&mut self, key: Key) -> Result<EventState>;
}

/// Centered area for a popup of at most `width` x `height` cells.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    area
}
