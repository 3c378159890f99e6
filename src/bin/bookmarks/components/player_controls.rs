use bookmarks::actions::format_hms;
use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::Line;
use ratatui::widgets::{Block, Widget, WidgetRef};

pub struct PlayerControlsComponent {
    pub name: Option<String>,
    pub elapsed: u64,
    pub total: u64,
    pub paused: bool,
}

impl PlayerControlsComponent {
    pub fn new() -> Self {
        PlayerControlsComponent {
            name: None,
            elapsed: 0,
            total: 0,
            paused: false,
        }
    }

    pub fn clear(&mut self) {
        self.name = None;
        self.elapsed = 0;
        self.total = 0;
        self.paused = false;
    }

    fn progress(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        (self.elapsed.min(self.total) * 100 / self.total) as u16
    }
}

impl WidgetRef for PlayerControlsComponent {
    fn render_ref(&self, area: Rect, buf: &mut Buffer) {
        let area = {
            let border = Block::bordered();
            let a = border.inner(area);
            border.render(area, buf);
            a
        };

        let [name_area, progress_area, status_area] = Layout::new(
            Direction::Vertical,
            [
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ],
        )
        .areas(area);

        let [_, progress_area, _] = Layout::new(
            Direction::Horizontal,
            [
                Constraint::Fill(1),
                Constraint::Fill(8),
                Constraint::Fill(1),
            ],
        )
        .areas(progress_area);

        Line::raw(self.name.as_deref().unwrap_or("Nothing playing"))
            .centered()
            .render(name_area, buf);

        let done = progress_area.width * self.progress() / 100;
        for i in 0..progress_area.width {
            if let Some(cell) = buf.cell_mut((i + progress_area.x, progress_area.y)) {
                cell.set_char(if i < done { '#' } else { '-' });
            }
        }

        let status = format!(
            "{}{} / {}",
            if self.paused { "paused  " } else { "" },
            format_hms(self.elapsed),
            format_hms(self.total),
        );
        Line::raw(status).centered().render(status_area, buf);
    }
}
