use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use super::download::{save_artifact, suggested_filename};
use super::error::{MonitorError, TransportError};
use super::models::PullRequestRecord;

const COLLECTION_PATH: &str = "pull-requests";

/// Client for the monitor backend's two read-only endpoints.
#[derive(Clone)]
pub struct MonitorClient {
    client: Client,
    base_url: String,
    artifact_base_url: String,
}

/// A screenshot written to the download directory.
#[derive(Debug, Clone)]
pub struct SavedScreenshot {
    pub path: PathBuf,
    pub content_type: Option<String>,
    pub size: usize,
}

impl MonitorClient {
    pub fn new(base_url: &str, artifact_base_url: Option<&str>) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        let artifact_base_url = match artifact_base_url {
            Some(url) => normalize_base_url(url)?,
            None => base_url.clone(),
        };

        let client = Client::builder()
            .user_agent("prmon")
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url,
            artifact_base_url,
        })
    }

    pub fn collection_url(&self) -> String {
        format!("{}{}", self.base_url, COLLECTION_PATH)
    }

    pub fn artifact_url(&self, screenshot_path: &str) -> String {
        format!(
            "{}{}",
            self.artifact_base_url,
            screenshot_path
                .strip_prefix('/')
                .unwrap_or(screenshot_path)
        )
    }

    pub async fn fetch_pull_requests(&self) -> Result<Vec<PullRequestRecord>, MonitorError> {
        let url = self.collection_url();
        debug!(url = %url, "Fetching pull requests");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MonitorError::Fetch(e.into()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(MonitorError::Fetch(TransportError::Status(status)));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| MonitorError::Fetch(e.into()))?;

        let records = parse_pull_requests(&body)?;
        debug!(count = records.len(), "Fetched pull requests");
        Ok(records)
    }

    /// Fetch the screenshot behind `screenshot_path` and save it into `dir`.
    pub async fn download_screenshot(
        &self,
        screenshot_path: &str,
        dir: &Path,
    ) -> Result<SavedScreenshot, MonitorError> {
        let fail = |source: TransportError| MonitorError::Download {
            path: screenshot_path.to_string(),
            source,
        };

        let url = self.artifact_url(screenshot_path);
        debug!(url = %url, "Downloading screenshot");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| fail(e.into()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fail(TransportError::Status(status)));
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let bytes = resp.bytes().await.map_err(|e| fail(e.into()))?;

        let filename = suggested_filename(screenshot_path);
        let dir = dir.to_path_buf();
        let size = bytes.len();
        let path = tokio::task::spawn_blocking(move || save_artifact(&dir, &filename, &bytes))
            .await
            .map_err(|e| fail(TransportError::Io(std::io::Error::other(e))))?
            .map_err(|e| fail(e.into()))?;

        Ok(SavedScreenshot {
            path,
            content_type,
            size,
        })
    }
}

/// Parse the collection body. Elements that are not valid records (most
/// importantly, ones without an id) are skipped.
pub fn parse_pull_requests(body: &str) -> Result<Vec<PullRequestRecord>, serde_json::Error> {
    let nodes: Vec<Value> = serde_json::from_str(body)?;
    let total = nodes.len();

    let records: Vec<PullRequestRecord> = nodes
        .into_iter()
        .enumerate()
        .filter_map(|(i, node)| match serde_json::from_value(node) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(index = i, error = %e, "Skipping malformed pull request record");
                None
            }
        })
        .collect();

    if records.len() < total {
        warn!(
            skipped = total - records.len(),
            total, "Some pull request records were skipped"
        );
    }
    Ok(records)
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid base URL: {raw}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("Base URL must use http or https: {}", raw);
    }
    let mut s = url.to_string();
    if !s.ends_with('/') {
        s.push('/');
    }
    Ok(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_gets_trailing_slash() {
        assert_eq!(
            normalize_base_url("http://localhost:8000/api/v1/monitor_router").unwrap(),
            "http://localhost:8000/api/v1/monitor_router/"
        );
    }

    #[test]
    fn base_url_rejects_other_schemes() {
        assert!(normalize_base_url("ftp://example.com/").is_err());
        assert!(normalize_base_url("not a url").is_err());
    }
}
