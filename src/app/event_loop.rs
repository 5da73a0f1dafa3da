use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::{Semaphore, mpsc};
use tracing::{debug, error, info};

use crate::app::actions::{Action, SideEffect};
use crate::app::state::AppState;
use crate::app::update::{mount, update};
use crate::app::view;
use crate::monitor::MonitorClient;
use crate::monitor::download::suggested_filename;
use crate::util::browser;
use crate::util::config::AppConfig;

/// Everything a background task needs. Tasks never touch `AppState`; they
/// report back through `action_tx`.
#[derive(Clone)]
pub struct EffectRunner {
    client: MonitorClient,
    download_dir: PathBuf,
    action_tx: mpsc::UnboundedSender<Action>,
    downloads: Arc<Semaphore>,
}

impl EffectRunner {
    pub fn new(
        client: MonitorClient,
        download_dir: PathBuf,
        max_concurrent_downloads: usize,
        action_tx: mpsc::UnboundedSender<Action>,
    ) -> Self {
        Self {
            client,
            download_dir,
            action_tx,
            downloads: Arc::new(Semaphore::new(max_concurrent_downloads.max(1))),
        }
    }

    pub fn spawn(&self, effect: SideEffect) {
        match effect {
            SideEffect::FetchRecords => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();

                tokio::spawn(async move {
                    debug!("Fetching pull request list");
                    let action = match client.fetch_pull_requests().await {
                        Ok(records) => Action::RecordsLoaded(records),
                        Err(e) => {
                            error!(error = %e, "Failed to fetch pull requests");
                            Action::LoadFailed(e.to_string())
                        }
                    };
                    // The view may already be gone
                    let _ = tx.send(action);
                });
            }
            SideEffect::DownloadScreenshot(screenshot_path) => {
                let client = self.client.clone();
                let tx = self.action_tx.clone();
                let sem = self.downloads.clone();
                let dir = self.download_dir.clone();

                tokio::spawn(async move {
                    let filename = suggested_filename(&screenshot_path);
                    let Ok(_permit) = sem.acquire().await else {
                        error!(path = %screenshot_path, "Download queue closed");
                        let _ = tx.send(Action::DownloadFailed {
                            filename,
                            error: "download queue closed".to_string(),
                        });
                        return;
                    };

                    match client.download_screenshot(&screenshot_path, &dir).await {
                        Ok(saved) => {
                            info!(
                                path = %saved.path.display(),
                                content_type = saved.content_type.as_deref().unwrap_or("unknown"),
                                size = saved.size,
                                "Screenshot saved"
                            );
                            let _ = tx.send(Action::DownloadFinished {
                                filename,
                                path: saved.path,
                            });
                        }
                        Err(e) => {
                            error!(error = %e, "Failed to download screenshot");
                            let _ = tx.send(Action::DownloadFailed {
                                filename,
                                error: e.to_string(),
                            });
                        }
                    }
                });
            }
            SideEffect::OpenUrl(url) => {
                tokio::task::spawn_blocking(move || {
                    if let Err(e) = browser::open_url(&url) {
                        error!(error = %e, "Failed to open URL");
                    }
                });
            }
            SideEffect::OpenFile(path) => {
                tokio::task::spawn_blocking(move || {
                    if let Err(e) = browser::open_path(&path) {
                        error!(error = %e, "Failed to open saved file");
                    }
                });
            }
        }
    }
}

pub async fn run(config: AppConfig, client: MonitorClient) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Install panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_loop(&mut terminal, config, client).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    client: MonitorClient,
) -> Result<()> {
    let mut state = AppState::new();
    state.open_after_save = config.download.open_after_save;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let runner = EffectRunner::new(
        client,
        config.download_dir(),
        config.download.max_concurrent,
        action_tx,
    );

    for effect in mount(&mut state) {
        runner.spawn(effect);
    }

    let mut event_stream = crossterm::event::EventStream::new();
    let mut ticker = tokio::time::interval(Duration::from_millis(config.ui.tick_rate_ms.max(16)));

    loop {
        terminal.draw(|f| view::render(f, &state))?;

        if state.should_quit {
            break;
        }

        let action = tokio::select! {
            maybe_event = event_stream.next() => match maybe_event {
                Some(Ok(event)) => map_event_to_action(&event, &state),
                Some(Err(e)) => {
                    error!(error = %e, "Terminal event error");
                    None
                }
                None => Some(Action::Quit),
            },
            Some(action) = action_rx.recv() => Some(action),
            _ = ticker.tick() => Some(Action::Tick),
        };

        if let Some(action) = action {
            for effect in update(&mut state, action) {
                runner.spawn(effect);
            }
        }
    }

    info!("prmon exiting");
    Ok(())
}

pub fn map_event_to_action(event: &Event, state: &AppState) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: event::KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    match code {
        KeyCode::Char('q') | KeyCode::Esc => return Some(Action::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(Action::Quit);
        }
        _ => {}
    }

    // Only quitting is possible until the list has loaded
    if state.loading {
        return None;
    }

    match code {
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char('g') | KeyCode::Home => Some(Action::MoveTop),
        KeyCode::Char('G') | KeyCode::End => Some(Action::MoveBottom),
        KeyCode::Char('s') => Some(Action::ToggleSort),
        KeyCode::Char('d') | KeyCode::Enter => Some(Action::Download),
        KeyCode::Char('o') => Some(Action::OpenInBrowser),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn closed_download_queue_reports_failure_without_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = MonitorClient::new(&server.uri(), None).unwrap();
        let dir = tempfile::TempDir::new().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let runner = EffectRunner::new(client, dir.path().to_path_buf(), 1, tx);
        runner.downloads.close();

        runner.spawn(SideEffect::DownloadScreenshot("shots/a.png".into()));
        match rx.recv().await {
            Some(Action::DownloadFailed { filename, .. }) => assert_eq!(filename, "a.png"),
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
