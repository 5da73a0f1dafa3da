use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::AppState;
use crate::ui::widgets;

pub fn render(f: &mut Frame, state: &AppState) {
    // Title bar + body + status bar
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(f.area());

    widgets::render_title_bar(f, vertical[0], state);
    widgets::render_body(f, vertical[1], state);
    widgets::render_status_bar(f, vertical[2], state);
}
