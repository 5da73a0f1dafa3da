use ratatui::style::{Color, Modifier, Style};

pub const HIGHLIGHT: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

pub const HEADER: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const TITLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

pub const DIM: Style = Style::new().fg(Color::DarkGray);

pub const BORDER: Style = Style::new().fg(Color::Cyan);

pub const STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

pub const SPINNER: Style = Style::new().fg(Color::Cyan);

pub const SORT_BUTTON: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Blue)
    .add_modifier(Modifier::BOLD);

pub const RECORD_ID: Style = Style::new().fg(Color::Cyan);

pub const USER: Style = Style::new().fg(Color::Yellow);

pub const DOWNLOAD_LINK: Style = Style::new()
    .fg(Color::Blue)
    .add_modifier(Modifier::UNDERLINED);
