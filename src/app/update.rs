use tracing::{debug, info};

use crate::app::actions::{Action, SideEffect};
use crate::app::sort::sort_by_date;
use crate::app::state::AppState;

pub fn update(state: &mut AppState, action: Action) -> Vec<SideEffect> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            vec![]
        }
        Action::MoveUp => {
            if state.cursor > 0 {
                state.cursor -= 1;
            }
            vec![]
        }
        Action::MoveDown => {
            if state.cursor + 1 < state.records.len() {
                state.cursor += 1;
            }
            vec![]
        }
        Action::MoveTop => {
            state.cursor = 0;
            vec![]
        }
        Action::MoveBottom => {
            state.cursor = state.records.len().saturating_sub(1);
            vec![]
        }
        Action::ToggleSort => {
            let selected = state.selected_record().map(|r| r.id.clone());

            state.records = sort_by_date(&state.records, state.sort_direction);
            state.sort_direction = state.sort_direction.flipped();

            // Keep the highlight on the same record
            if let Some(id) = selected
                && let Some(pos) = state.records.iter().position(|r| r.id == id)
            {
                state.cursor = pos;
            }
            vec![]
        }
        Action::Download => match state
            .selected_record()
            .and_then(|r| r.screenshot_path.clone())
        {
            Some(path) => vec![SideEffect::DownloadScreenshot(path)],
            None => vec![],
        },
        Action::OpenInBrowser => match state.selected_record().and_then(|r| r.title_url()) {
            Some(url) => vec![SideEffect::OpenUrl(url.to_string())],
            None => vec![],
        },
        Action::RecordsLoaded(records) => {
            info!(count = records.len(), "Pull requests loaded");
            state.records = records;
            state.loading = false;
            state.last_loaded = Some(chrono::Utc::now());
            state.clamp_cursor();
            vec![]
        }
        Action::LoadFailed(msg) => {
            // Records stay as they were; the view degrades to an empty table.
            debug!(error = %msg, "Load settled with failure");
            state.loading = false;
            vec![]
        }
        Action::DownloadFinished { filename, path } => {
            state.status_message = Some(format!("Saved {} to {}", filename, path.display()));
            if state.open_after_save {
                vec![SideEffect::OpenFile(path)]
            } else {
                vec![]
            }
        }
        Action::DownloadFailed { filename, error } => {
            state.status_message = Some(format!("Download of {} failed: {}", filename, error));
            vec![]
        }
        Action::Tick => {
            if state.loading {
                state.spinner_frame = state.spinner_frame.wrapping_add(1);
            }
            vec![]
        }
    }
}

/// Effects to run when the view starts: the single collection fetch.
pub fn mount(state: &mut AppState) -> Vec<SideEffect> {
    state.loading = true;
    vec![SideEffect::FetchRecords]
}
