// src/pipeline/state.rs

//! Shared mutable crawl state.
//!
//! One `CrawlState` per crawl run, injected into the page processor, never
//! process-global. Every check-then-update sequence is a single lock
//! acquisition so concurrent pages cannot both pass a duplicate check or
//! lose frequency increments. No await points while the lock is held.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::models::LongestPage;
use crate::pipeline::frequency::{FrequencyIndex, StopWords};

/// Per-page counters returned by `record_page`.
#[derive(Debug, Clone, Copy)]
pub struct PageStats {
    pub token_count: usize,
    /// Total accepted pages, including this one
    pub pages_recorded: u64,
    pub new_longest: bool,
}

/// Snapshot of the reportable state, taken under the lock, persisted
/// outside it.
#[derive(Debug, Clone)]
pub struct ReportSnapshot {
    /// Ranked frequency report
    pub frequencies: Vec<(String, u64)>,
    /// Count of distinct pages accepted
    pub unique_pages: u64,
    pub longest: Option<LongestPage>,
}

#[derive(Debug)]
struct StateInner {
    frequencies: FrequencyIndex,
    seen_urls: HashSet<String>,
    seen_fingerprints: HashSet<String>,
    longest: Option<LongestPage>,
    unique_pages: u64,
}

/// The process-wide mutable state of a crawl run.
#[derive(Debug)]
pub struct CrawlState {
    inner: Mutex<StateInner>,
}

impl CrawlState {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            inner: Mutex::new(StateInner {
                frequencies: FrequencyIndex::new(stop_words),
                seen_urls: HashSet::new(),
                seen_fingerprints: HashSet::new(),
                longest: None,
                unique_pages: 0,
            }),
        }
    }

    // Poisoning is recovered; guarded updates hold their invariants on
    // every path, panics included.
    fn lock(&self) -> MutexGuard<'_, StateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a fingerprint, returning true when it was not seen before.
    /// Check and record are one atomic step.
    pub fn check_and_record_fingerprint(&self, digest: &str) -> bool {
        self.lock().seen_fingerprints.insert(digest.to_string())
    }

    /// Mark a URL as dispatched/discovered. Returns true when new.
    pub fn mark_url_seen(&self, url: &str) -> bool {
        self.lock().seen_urls.insert(url.to_string())
    }

    /// Fold an accepted page into the frequency index, longest-page
    /// record, and unique-page counter, atomically.
    pub fn record_page(&self, url: &str, text: &str, tokens: &[String]) -> PageStats {
        let mut inner = self.lock();

        inner.frequencies.update(tokens);
        inner.unique_pages += 1;

        let new_longest = inner
            .longest
            .as_ref()
            .is_none_or(|l| tokens.len() > l.token_count);
        if new_longest {
            inner.longest = Some(LongestPage {
                url: url.to_string(),
                token_count: tokens.len(),
                text: text.to_string(),
            });
        }

        PageStats {
            token_count: tokens.len(),
            pages_recorded: inner.unique_pages,
            new_longest,
        }
    }

    /// Drop candidates already in the seen-URL set and record the
    /// survivors, preserving order.
    pub fn filter_unseen_links(&self, candidates: Vec<String>) -> Vec<String> {
        let mut inner = self.lock();
        candidates
            .into_iter()
            .filter(|url| inner.seen_urls.insert(url.clone()))
            .collect()
    }

    /// Current count for a token.
    pub fn token_count(&self, token: &str) -> u64 {
        self.lock().frequencies.count(token)
    }

    /// Count of distinct pages accepted so far.
    pub fn unique_pages(&self) -> u64 {
        self.lock().unique_pages
    }

    /// Take a consistent snapshot for persistence.
    pub fn snapshot(&self, top_n: i64) -> ReportSnapshot {
        let inner = self.lock();
        ReportSnapshot {
            frequencies: inner.frequencies.export(top_n),
            unique_pages: inner.unique_pages,
            longest: inner.longest.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> CrawlState {
        CrawlState::new(StopWords::default())
    }

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fingerprint_check_and_record() {
        let s = state();
        assert!(s.check_and_record_fingerprint("abc"));
        assert!(!s.check_and_record_fingerprint("abc"));
        assert!(s.check_and_record_fingerprint("def"));
    }

    #[test]
    fn test_record_page_counts() {
        let s = state();
        let tokens = words(&["crawler", "index", "crawler"]);
        let stats = s.record_page("https://example.com/a", "crawler index crawler", &tokens);

        assert_eq!(stats.token_count, 3);
        assert_eq!(stats.pages_recorded, 1);
        assert!(stats.new_longest);
        assert_eq!(s.token_count("crawler"), 2);
        assert_eq!(s.unique_pages(), 1);
    }

    #[test]
    fn test_longest_page_replaced_only_when_exceeded() {
        let s = state();
        s.record_page("https://example.com/long", "w", &words(&["a1", "b2", "c3"]));
        let stats = s.record_page("https://example.com/short", "w", &words(&["d4"]));
        assert!(!stats.new_longest);

        let snapshot = s.snapshot(-1);
        let longest = snapshot.longest.unwrap();
        assert_eq!(longest.url, "https://example.com/long");
        assert_eq!(longest.token_count, 3);
    }

    #[test]
    fn test_filter_unseen_links() {
        let s = state();
        s.mark_url_seen("https://example.com/seen");

        let fresh = s.filter_unseen_links(vec![
            "https://example.com/seen".to_string(),
            "https://example.com/new".to_string(),
        ]);
        assert_eq!(fresh, vec!["https://example.com/new".to_string()]);

        // Survivors are recorded too.
        assert!(s.filter_unseen_links(vec!["https://example.com/new".to_string()]).is_empty());
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let s = state();
        s.record_page("https://example.com/a", "alpha beta alpha", &words(&["alpha", "beta", "alpha"]));

        let snapshot = s.snapshot(-1);
        assert_eq!(snapshot.unique_pages, 1);
        assert_eq!(snapshot.frequencies[0], ("alpha".to_string(), 2));
    }
}
