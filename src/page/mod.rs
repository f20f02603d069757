// src/page/mod.rs

// The document-accessor seam. The pipeline never navigates or waits for
// pages; it reads markup, activates reveal toggles, and honors a settle
// delay through this capability. Browser driving lives behind it, outside
// the crate.

pub mod fetch;

use scraper::{ElementRef, Html};
use std::time::Duration;

use crate::config::selectors::REVEAL_TOGGLE;
use crate::utils::error::PageError;

/// Settle time applied after reveal activation when an implementation does
/// not override it. Toggle activation expands content asynchronously with no
/// completion signal, so re-reads wait a fixed interval.
pub const DEFAULT_SETTLE_MS: u64 = 1500;

/// Capability the extraction pipeline needs from a live page.
pub trait PageHandle {
    /// Current markup of the document.
    fn content(&mut self) -> impl std::future::Future<Output = Result<String, PageError>> + Send;

    /// Activates every reveal toggle whose visible label contains `label`
    /// (case-insensitive). Fire-and-forget: completion of the triggered
    /// expansion is not signaled back. Returns the number of toggles hit.
    fn activate_toggles(
        &mut self,
        label: &str,
    ) -> impl std::future::Future<Output = Result<usize, PageError>> + Send;

    /// How long a caller should wait after [`Self::activate_toggles`] before
    /// re-reading the document. Tunable per implementation.
    fn settle_delay(&self) -> Duration {
        Duration::from_millis(DEFAULT_SETTLE_MS)
    }
}

/// A static snapshot of the report page, optionally paired with a second
/// snapshot captured after reveal toggles were activated. Used by the CLI
/// file mode and by tests; nothing settles in a snapshot, so the default
/// settle delay is zero.
#[derive(Debug, Clone)]
pub struct SnapshotPage {
    current: String,
    revealed: Option<String>,
    settle: Duration,
}

impl SnapshotPage {
    pub fn new(html: impl Into<String>) -> Self {
        SnapshotPage {
            current: html.into(),
            revealed: None,
            settle: Duration::ZERO,
        }
    }

    /// Attaches the post-reveal snapshot swapped in by
    /// [`PageHandle::activate_toggles`].
    pub fn with_revealed(mut self, html: impl Into<String>) -> Self {
        self.revealed = Some(html.into());
        self
    }

    pub fn with_settle_delay(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

impl PageHandle for SnapshotPage {
    async fn content(&mut self) -> Result<String, PageError> {
        Ok(self.current.clone())
    }

    async fn activate_toggles(&mut self, label: &str) -> Result<usize, PageError> {
        let needle = label.to_ascii_lowercase();
        let hits = {
            let document = Html::parse_document(&self.current);
            document
                .select(&REVEAL_TOGGLE)
                .filter(|toggle| element_text(*toggle).to_ascii_lowercase().contains(&needle))
                .count()
        };

        if hits > 0 {
            if let Some(revealed) = self.revealed.take() {
                self.current = revealed;
            }
        }
        Ok(hits)
    }

    fn settle_delay(&self) -> Duration {
        self.settle
    }
}

/// Trimmed text content of an element, with internal whitespace collapsed.
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
