use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
};

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::time::relative_time;

pub const DOWNLOAD_LABEL: &str = "Download";

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// One table row as text, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: String,
    pub title: String,
    pub user: String,
    pub date: String,
    pub download: Option<&'static str>,
}

/// Project the records into table rows. Order is exactly `state.records`.
pub fn table_rows(state: &AppState) -> Vec<RowView> {
    state
        .records
        .iter()
        .map(|r| RowView {
            id: r.id.to_string(),
            title: r.title.clone(),
            user: r.user_display().to_string(),
            date: r.date.clone().unwrap_or_default(),
            download: r.has_screenshot().then_some(DOWNLOAD_LABEL),
        })
        .collect()
}

pub fn render_title_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = if state.loading {
        " GitHub Pull Requests Monitoring".to_string()
    } else {
        format!(
            " GitHub Pull Requests Monitoring ({})",
            state.records.len()
        )
    };

    let sort_label = "Sort by date: ";
    let button = format!(" {} ", state.sort_direction.label());

    let padding = (area.width as usize)
        .saturating_sub(title.chars().count() + sort_label.len() + button.chars().count() + 1);

    let line = Line::from(vec![
        Span::styled(title, theme::TITLE),
        Span::raw(" ".repeat(padding)),
        Span::styled(sort_label, theme::DIM),
        Span::styled(button, theme::SORT_BUTTON),
        Span::raw(" "),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

pub fn render_body(f: &mut Frame, area: Rect, state: &AppState) {
    if state.loading {
        render_loading(f, area, state);
    } else {
        render_records_table(f, area, state);
    }
}

fn render_loading(f: &mut Frame, area: Rect, state: &AppState) {
    let frame = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
    let text = format!("{} Loading pull requests", frame);

    let width = (text.chars().count() as u16).min(area.width);
    let centered = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height / 2,
        width,
        height: 1.min(area.height),
    };

    f.render_widget(Paragraph::new(Span::styled(text, theme::SPINNER)), centered);
}

fn render_records_table(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Pull Requests ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER);

    if state.records.is_empty() {
        let para = Paragraph::new("No pull requests").style(theme::DIM).block(block);
        f.render_widget(para, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("ID").style(theme::HEADER),
        Cell::from("Title").style(theme::HEADER),
        Cell::from("User").style(theme::HEADER),
        Cell::from("Date").style(theme::HEADER),
        Cell::from("Screenshot").style(theme::HEADER),
    ])
    .height(1);

    let rows: Vec<Row> = table_rows(state)
        .into_iter()
        .map(|row| {
            let user_style = if row.user == crate::monitor::NO_USER_INFORMATION {
                theme::DIM
            } else {
                theme::USER
            };
            Row::new(vec![
                Cell::from(row.id).style(theme::RECORD_ID),
                Cell::from(row.title),
                Cell::from(row.user).style(user_style),
                Cell::from(row.date).style(theme::DIM),
                Cell::from(row.download.unwrap_or_default()).style(theme::DOWNLOAD_LINK),
            ])
            .height(1)
        })
        .collect();

    let widths = [
        Constraint::Length(26),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(26),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(theme::HIGHLIGHT);

    let mut table_state = TableState::default().with_selected(Some(state.cursor));
    f.render_stateful_widget(table, area, &mut table_state);
}

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let key_hints = if state.loading {
        "q: quit"
    } else {
        "j/k: nav | s: sort by date | d: download | o: open | q: quit"
    };

    let status = state.status_message.clone().unwrap_or_default();

    let right_text = state
        .last_loaded
        .as_ref()
        .map(|t| format!("loaded {} ", relative_time(t)))
        .unwrap_or_default();

    let total_width = area.width as usize;
    let left_len = key_hints.chars().count();
    let right_len = right_text.chars().count();
    let center_width = total_width.saturating_sub(left_len + right_len + 2);
    let status = truncate(&status, center_width);
    let padding = center_width.saturating_sub(status.chars().count());

    let line = Line::from(vec![
        Span::styled(key_hints, theme::STATUS_BAR),
        Span::styled(" ", theme::STATUS_BAR),
        Span::styled(status, theme::STATUS_BAR),
        Span::styled(" ".repeat(padding + 1), theme::STATUS_BAR),
        Span::styled(right_text, theme::STATUS_BAR),
    ]);

    f.render_widget(Paragraph::new(line).style(theme::STATUS_BAR), area);
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let kept: String = s.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Saved ünïcode.png", 8), "Saved...");
        assert_eq!(truncate("abc", 0), "...");
    }
}
