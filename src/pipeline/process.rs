// src/pipeline/process.rs

//! Page processing orchestration.
//!
//! Drives the per-page state machine: gate on fetch status and size,
//! extract text and hrefs, gate on minimum size and duplicate content,
//! fold statistics into the shared state, persist reports, and emit the
//! normalized, filtered candidate links.

use std::collections::HashSet;
use std::sync::Arc;

use url::Url;

use crate::error::Result;
use crate::models::{Config, FetchedPage, PageOutcome};
use crate::pipeline::dedup::fingerprint;
use crate::pipeline::extract::extract;
use crate::pipeline::filter::UrlFilter;
use crate::pipeline::state::CrawlState;
use crate::pipeline::tokenize::tokenize;
use crate::storage::ReportStorage;
use crate::utils::url::normalize;

/// Orchestrator for the page-processing pipeline.
///
/// One instance per crawl run; safe to share across worker tasks.
pub struct PageProcessor {
    config: Arc<Config>,
    state: Arc<CrawlState>,
    filter: UrlFilter,
    storage: Arc<dyn ReportStorage>,
    /// Serializes report writes from concurrent workers
    persist_lock: tokio::sync::Mutex<()>,
}

impl PageProcessor {
    pub fn new(
        config: Arc<Config>,
        state: Arc<CrawlState>,
        storage: Arc<dyn ReportStorage>,
    ) -> Result<Self> {
        let filter = UrlFilter::new(&config.scope)?;
        Ok(Self {
            config,
            state,
            filter,
            storage,
            persist_lock: tokio::sync::Mutex::new(()),
        })
    }

    /// Process one fetched page and return its outcome.
    ///
    /// `url` is the request URL the page was fetched under; it doubles as
    /// the base for resolving relative hrefs. Skip conditions are data,
    /// not errors; an `Err` here means a logic-level failure (unparsable
    /// page URL, persistence I/O).
    pub async fn process(&self, url: &str, page: &FetchedPage) -> Result<PageOutcome> {
        self.state.mark_url_seen(url);

        if !(200..400).contains(&page.status) {
            log::debug!("skip {url}: status {}", page.status);
            return Ok(PageOutcome::SkippedFetchError {
                status: page.status,
            });
        }

        let content = match page.content.as_deref() {
            Some(bytes) if !bytes.is_empty() => bytes,
            _ => {
                log::debug!("skip {url}: no content");
                return Ok(PageOutcome::SkippedEmpty);
            }
        };

        if content.len() > self.config.processor.max_content_bytes {
            log::debug!("skip {url}: {} bytes", content.len());
            return Ok(PageOutcome::SkippedTooLarge {
                bytes: content.len(),
            });
        }

        let extraction = extract(content)?;
        let tokens: Vec<String> = tokenize(&extraction.text).collect();

        // Gate before statistics: rejected pages do not touch the
        // frequency index or the longest-page record.
        if tokens.len() < self.config.processor.min_word_count {
            log::debug!("skip {url}: only {} words", tokens.len());
            return Ok(PageOutcome::SkippedTooSmall {
                words: tokens.len(),
            });
        }

        let digest = fingerprint(&extraction.text);
        if !self.state.check_and_record_fingerprint(&digest) {
            log::debug!("skip {url}: duplicate content");
            return Ok(PageOutcome::SkippedDuplicate);
        }

        let stats = self.state.record_page(url, &extraction.text, &tokens);
        if stats.new_longest {
            log::info!("new longest page: {url} ({} tokens)", stats.token_count);
        }

        let every = self.config.processor.persist_every.max(1) as u64;
        if stats.pages_recorded % every == 0 {
            self.persist().await?;
        }

        let links = self.collect_links(url, &extraction.hrefs)?;
        Ok(PageOutcome::Accepted { links })
    }

    /// Normalize hrefs against the page URL, collapse within-page
    /// duplicates, drop already-seen URLs, and apply the scope filter
    /// when configured.
    fn collect_links(&self, page_url: &str, hrefs: &[String]) -> Result<Vec<String>> {
        let mut base = Url::parse(page_url)?;
        base.set_fragment(None);
        let self_url = base.to_string();

        let mut collected = Vec::new();
        let mut within_page = HashSet::new();
        for href in hrefs {
            let Some(normalized) = normalize(&base, href) else {
                continue;
            };
            if normalized == self_url {
                continue;
            }
            if within_page.insert(normalized.clone()) {
                collected.push(normalized);
            }
        }

        let fresh = self.state.filter_unseen_links(collected);
        if self.config.processor.apply_filter {
            Ok(fresh
                .into_iter()
                .filter(|candidate| self.filter.is_valid(candidate))
                .collect())
        } else {
            Ok(fresh)
        }
    }

    /// Persist the current report snapshot to the configured sink.
    pub async fn persist(&self) -> Result<()> {
        let _guard = self.persist_lock.lock().await;
        let snapshot = self.state.snapshot(self.config.processor.report_top_n);
        if let Err(error) = self.storage.write_reports(&snapshot).await {
            log::error!("failed to persist reports: {error}");
            return Err(error);
        }
        Ok(())
    }
}
