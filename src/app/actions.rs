use std::path::PathBuf;

use crate::monitor::models::PullRequestRecord;

#[derive(Debug)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveTop,
    MoveBottom,
    ToggleSort,
    Download,
    OpenInBrowser,
    RecordsLoaded(Vec<PullRequestRecord>),
    LoadFailed(String),
    DownloadFinished { filename: String, path: PathBuf },
    DownloadFailed { filename: String, error: String },
    Quit,
    Tick,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SideEffect {
    FetchRecords,
    DownloadScreenshot(String),
    OpenUrl(String),
    OpenFile(PathBuf),
}
