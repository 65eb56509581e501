// src/pipeline/frequency.rs

//! Running word-frequency index.
//!
//! One index per crawl run, fed by every accepted page. Counts are never
//! reset; the export is deterministic so consecutive persisted reports
//! only differ where counts actually changed.

use std::collections::{HashMap, HashSet};

use crate::models::StopWordsConfig;

/// Stop-word set tested against already-lowercased tokens.
#[derive(Debug, Clone)]
pub struct StopWords(HashSet<String>);

impl StopWords {
    pub fn new(words: &[String]) -> Self {
        Self(words.iter().cloned().collect())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::new(&StopWordsConfig::default().words)
    }
}

#[derive(Debug, Clone)]
struct TokenEntry {
    count: u64,
    /// First-insertion order, for stable tie-breaking in exports
    order: u64,
}

/// Mapping token -> occurrence count across all counted pages.
#[derive(Debug, Default)]
pub struct FrequencyIndex {
    stop_words: StopWords,
    counts: HashMap<String, TokenEntry>,
    next_order: u64,
}

impl FrequencyIndex {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            counts: HashMap::new(),
            next_order: 0,
        }
    }

    /// Increment the count of every non-stop-word token by one.
    pub fn update<I>(&mut self, tokens: I)
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for token in tokens {
            let token = token.as_ref();
            if self.stop_words.contains(token) {
                continue;
            }
            match self.counts.get_mut(token) {
                Some(entry) => entry.count += 1,
                None => {
                    let order = self.next_order;
                    self.next_order += 1;
                    self.counts
                        .insert(token.to_string(), TokenEntry { count: 1, order });
                }
            }
        }
    }

    /// Current count for a token (0 if never seen or a stop word).
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).map_or(0, |e| e.count)
    }

    /// Number of distinct tokens in the index.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Export a ranked report: descending count, ties broken by first
    /// insertion. Truncated to `top_n` entries when `top_n >= 0`,
    /// unbounded when negative.
    pub fn export(&self, top_n: i64) -> Vec<(String, u64)> {
        let mut entries: Vec<(&String, &TokenEntry)> = self.counts.iter().collect();
        entries.sort_by(|a, b| b.1.count.cmp(&a.1.count).then(a.1.order.cmp(&b.1.order)));

        let mut report: Vec<(String, u64)> = entries
            .into_iter()
            .map(|(token, entry)| (token.clone(), entry.count))
            .collect();
        if top_n >= 0 {
            report.truncate(top_n as usize);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> FrequencyIndex {
        FrequencyIndex::new(StopWords::default())
    }

    #[test]
    fn test_update_accumulates() {
        let mut idx = index();
        idx.update(["crawler"]);
        idx.update(["crawler"]);
        assert_eq!(idx.count("crawler"), 2);
    }

    #[test]
    fn test_stop_words_skipped() {
        let mut idx = index();
        idx.update(["the", "quick", "brown", "fox", "and", "they're"]);
        assert_eq!(idx.count("the"), 0);
        assert_eq!(idx.count("and"), 0);
        assert_eq!(idx.count("they're"), 0);
        assert_eq!(idx.count("quick"), 1);
        assert_eq!(idx.len(), 3);
    }

    #[test]
    fn test_export_sorted_descending() {
        let mut idx = index();
        idx.update(["beta", "alpha", "beta", "gamma", "beta", "gamma"]);
        let report = idx.export(-1);
        assert_eq!(
            report,
            vec![
                ("beta".to_string(), 3),
                ("gamma".to_string(), 2),
                ("alpha".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_export_ties_break_by_insertion_order() {
        let mut idx = index();
        idx.update(["zebra", "apple", "mango"]);
        let report = idx.export(-1);
        assert_eq!(
            report,
            vec![
                ("zebra".to_string(), 1),
                ("apple".to_string(), 1),
                ("mango".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_export_truncation() {
        let mut idx = index();
        idx.update(["one", "two", "three", "two"]);
        assert_eq!(idx.export(1).len(), 1);
        assert_eq!(idx.export(0).len(), 0);
        assert_eq!(idx.export(-1).len(), 3);
        assert_eq!(idx.export(100).len(), 3);
    }

    #[test]
    fn test_unknown_token_count_zero() {
        assert_eq!(index().count("nope"), 0);
    }

    #[test]
    fn test_custom_stop_words() {
        let stops = StopWords::new(&["crawler".to_string()]);
        let mut idx = FrequencyIndex::new(stops);
        idx.update(["crawler", "page"]);
        assert_eq!(idx.count("crawler"), 0);
        assert_eq!(idx.count("page"), 1);
    }
}
