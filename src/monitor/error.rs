use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the monitor endpoints. None of these are fatal to the view.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("failed to fetch pull requests: {0}")]
    Fetch(#[source] TransportError),

    #[error("pull request response is not a JSON array: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to download {path}: {source}")]
    Download {
        path: String,
        #[source]
        source: TransportError,
    },
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("server returned {0}")]
    Status(StatusCode),

    #[error(transparent)]
    Io(#[from] io::Error),
}
