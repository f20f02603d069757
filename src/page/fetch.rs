// src/page/fetch.rs
use reqwest::header;
use std::time::Duration;

use crate::page::SnapshotPage;
use crate::utils::error::PageError;

// Identify ourselves to the capture endpoint and stay polite about it.
const SNAPSHOT_USER_AGENT: &str = concat!("credit_extractor/", env!("CARGO_PKG_VERSION"));
const SNAPSHOT_REQUEST_DELAY_MS: u64 = 250;

/// Creates a reqwest client configured for snapshot fetching.
fn build_snapshot_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(SNAPSHOT_USER_AGENT)
        .timeout(Duration::from_secs(30))
        .build()
}

/// Downloads already-rendered report markup from a capture endpoint. This is
/// not browser driving; the URL must serve the final document.
pub async fn download_snapshot(url: &str) -> Result<String, PageError> {
    let client = build_snapshot_client()?;

    tracing::info!("Downloading snapshot from: {}", url);
    tokio::time::sleep(Duration::from_millis(SNAPSHOT_REQUEST_DELAY_MS)).await;

    let response = client
        .get(url)
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*")
        .send()
        .await?; // Propagates reqwest::Error as PageError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        return Err(PageError::Http(status));
    }

    let body = response.text().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    if body.trim().is_empty() {
        return Err(PageError::Unreadable(format!(
            "snapshot from {} was empty",
            url
        )));
    }

    Ok(body)
}

/// Fetches a snapshot and wraps it as a [`SnapshotPage`].
pub async fn fetch_page(url: &str) -> Result<SnapshotPage, PageError> {
    Ok(SnapshotPage::new(download_snapshot(url).await?))
}
