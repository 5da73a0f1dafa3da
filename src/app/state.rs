use chrono::{DateTime, Utc};

use crate::app::sort::SortDirection;
use crate::monitor::models::PullRequestRecord;

#[derive(Debug)]
pub struct AppState {
    // Data
    pub records: Vec<PullRequestRecord>,
    pub last_loaded: Option<DateTime<Utc>>,

    // View
    pub sort_direction: SortDirection,
    pub cursor: usize,
    pub open_after_save: bool,

    // UI flags
    pub loading: bool,
    pub spinner_frame: usize,
    pub status_message: Option<String>,
    pub should_quit: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            last_loaded: None,
            sort_direction: SortDirection::Ascending,
            cursor: 0,
            open_after_save: false,
            loading: false,
            spinner_frame: 0,
            status_message: None,
            should_quit: false,
        }
    }

    pub fn selected_record(&self) -> Option<&PullRequestRecord> {
        self.records.get(self.cursor)
    }

    pub fn clamp_cursor(&mut self) {
        if self.records.is_empty() {
            self.cursor = 0;
        } else if self.cursor >= self.records.len() {
            self.cursor = self.records.len() - 1;
        }
    }
}
