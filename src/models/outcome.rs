// src/models/outcome.rs

//! Per-page processing outcomes and run-level statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of processing a single fetched page.
///
/// Skip reasons are data, not errors: callers and tests can distinguish
/// why a page produced no links instead of inferring it from an empty
/// list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageOutcome {
    /// Page was processed; `links` are the distinct, normalized candidates
    /// to enqueue next.
    Accepted { links: Vec<String> },
    /// Status code outside [200, 400)
    SkippedFetchError { status: u16 },
    /// Content absent or zero-length
    SkippedEmpty,
    /// Content exceeded the configured byte limit
    SkippedTooLarge { bytes: usize },
    /// Extracted text below the minimum word count
    SkippedTooSmall { words: usize },
    /// Content fingerprint already recorded
    SkippedDuplicate,
}

impl PageOutcome {
    /// Links to enqueue; empty for every skip variant.
    pub fn links(&self) -> &[String] {
        match self {
            PageOutcome::Accepted { links } => links,
            _ => &[],
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, PageOutcome::Accepted { .. })
    }
}

/// Counters for a processing run.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessStats {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub pages_seen: usize,
    pub accepted: usize,
    pub skipped_fetch_error: usize,
    pub skipped_empty: usize,
    pub skipped_too_large: usize,
    pub skipped_too_small: usize,
    pub skipped_duplicate: usize,
    /// Pages that failed with an internal error (config/policy bugs)
    pub failed: usize,
    pub links_emitted: usize,
}

impl ProcessStats {
    pub fn begin() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_seen: 0,
            accepted: 0,
            skipped_fetch_error: 0,
            skipped_empty: 0,
            skipped_too_large: 0,
            skipped_too_small: 0,
            skipped_duplicate: 0,
            failed: 0,
            links_emitted: 0,
        }
    }

    /// Record one page outcome.
    pub fn record(&mut self, outcome: &PageOutcome) {
        self.pages_seen += 1;
        match outcome {
            PageOutcome::Accepted { links } => {
                self.accepted += 1;
                self.links_emitted += links.len();
            }
            PageOutcome::SkippedFetchError { .. } => self.skipped_fetch_error += 1,
            PageOutcome::SkippedEmpty => self.skipped_empty += 1,
            PageOutcome::SkippedTooLarge { .. } => self.skipped_too_large += 1,
            PageOutcome::SkippedTooSmall { .. } => self.skipped_too_small += 1,
            PageOutcome::SkippedDuplicate => self.skipped_duplicate += 1,
        }
    }

    /// Record a page that errored instead of producing an outcome.
    pub fn record_failure(&mut self) {
        self.pages_seen += 1;
        self.failed += 1;
    }

    /// Mark the run as finished.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_accessor() {
        let accepted = PageOutcome::Accepted {
            links: vec!["https://example.com/a".to_string()],
        };
        assert_eq!(accepted.links().len(), 1);
        assert!(accepted.is_accepted());

        assert!(PageOutcome::SkippedDuplicate.links().is_empty());
        assert!(!PageOutcome::SkippedEmpty.is_accepted());
    }

    #[test]
    fn test_stats_record() {
        let mut stats = ProcessStats::begin();
        stats.record(&PageOutcome::Accepted {
            links: vec!["a".into(), "b".into()],
        });
        stats.record(&PageOutcome::SkippedDuplicate);
        stats.record(&PageOutcome::SkippedTooSmall { words: 3 });
        stats.record_failure();

        assert_eq!(stats.pages_seen, 4);
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.links_emitted, 2);
        assert_eq!(stats.skipped_duplicate, 1);
        assert_eq!(stats.skipped_too_small, 1);
        assert_eq!(stats.failed, 1);
    }
}
