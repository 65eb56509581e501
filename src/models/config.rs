//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Page-processing behavior settings
    #[serde(default)]
    pub processor: ProcessorConfig,

    /// Crawl-scope policy for the URL filter
    #[serde(default)]
    pub scope: ScopePolicy,

    /// Stop-word list for the frequency index
    #[serde(default)]
    pub stopwords: StopWordsConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.processor.max_content_bytes == 0 {
            return Err(AppError::validation("processor.max_content_bytes must be > 0"));
        }
        if self.processor.min_word_count == 0 {
            return Err(AppError::validation("processor.min_word_count must be > 0"));
        }
        if self.processor.persist_every == 0 {
            return Err(AppError::validation("processor.persist_every must be > 0"));
        }
        if self.processor.max_concurrent == 0 {
            return Err(AppError::validation("processor.max_concurrent must be > 0"));
        }
        if self.scope.allowed_domains.is_empty() {
            return Err(AppError::validation("No allowed domains defined"));
        }
        if self.scope.allowed_domains.iter().any(|d| d.trim().is_empty()) {
            return Err(AppError::validation("scope.allowed_domains contains an empty entry"));
        }
        if self.scope.blocked_extensions.is_empty() {
            return Err(AppError::validation("No blocked extensions defined"));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            processor: ProcessorConfig::default(),
            scope: ScopePolicy::default(),
            stopwords: StopWordsConfig::default(),
        }
    }
}

/// Page-processing behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Maximum content size in bytes; larger pages are skipped
    #[serde(default = "defaults::max_content_bytes")]
    pub max_content_bytes: usize,

    /// Minimum extracted word count; smaller pages are skipped
    #[serde(default = "defaults::min_word_count")]
    pub min_word_count: usize,

    /// Number of entries in the persisted frequency report (negative = all)
    #[serde(default = "defaults::report_top_n")]
    pub report_top_n: i64,

    /// Persist reports after every Nth accepted page
    #[serde(default = "defaults::persist_every")]
    pub persist_every: usize,

    /// Apply the scope filter to candidate links before returning them
    #[serde(default = "defaults::apply_filter")]
    pub apply_filter: bool,

    /// Maximum pages processed concurrently by the CLI driver
    #[serde(default = "defaults::max_concurrent")]
    pub max_concurrent: usize,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_content_bytes: defaults::max_content_bytes(),
            min_word_count: defaults::min_word_count(),
            report_top_n: defaults::report_top_n(),
            persist_every: defaults::persist_every(),
            apply_filter: defaults::apply_filter(),
            max_concurrent: defaults::max_concurrent(),
        }
    }
}

/// Crawl-scope policy: which URLs are worth fetching.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopePolicy {
    /// Domain suffixes the crawl is restricted to
    #[serde(default = "defaults::allowed_domains")]
    pub allowed_domains: Vec<String>,

    /// Substrings that disqualify a host (subdomain denylist)
    #[serde(default)]
    pub denied_hosts: Vec<String>,

    /// Path substrings marking trap/low-value pages
    #[serde(default = "defaults::trap_patterns")]
    pub trap_patterns: Vec<String>,

    /// Maximum number of `=`-delimited query parameters
    #[serde(default = "defaults::max_query_params")]
    pub max_query_params: usize,

    /// Non-HTML file extensions to reject
    #[serde(default = "defaults::blocked_extensions")]
    pub blocked_extensions: Vec<String>,
}

impl Default for ScopePolicy {
    fn default() -> Self {
        Self {
            allowed_domains: defaults::allowed_domains(),
            denied_hosts: Vec::new(),
            trap_patterns: defaults::trap_patterns(),
            max_query_params: defaults::max_query_params(),
            blocked_extensions: defaults::blocked_extensions(),
        }
    }
}

/// Stop-word list, externalized so runs can localize or trim it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StopWordsConfig {
    #[serde(default = "defaults::stop_words")]
    pub words: Vec<String>,
}

impl Default for StopWordsConfig {
    fn default() -> Self {
        Self {
            words: defaults::stop_words(),
        }
    }
}

mod defaults {
    // Processor defaults
    pub fn max_content_bytes() -> usize {
        5_000_000
    }
    pub fn min_word_count() -> usize {
        50
    }
    pub fn report_top_n() -> i64 {
        -1
    }
    pub fn persist_every() -> usize {
        1
    }
    pub fn apply_filter() -> bool {
        true
    }
    pub fn max_concurrent() -> usize {
        8
    }

    // Scope defaults
    pub fn allowed_domains() -> Vec<String> {
        vec![
            "ics.uci.edu".into(),
            "cs.uci.edu".into(),
            "informatics.uci.edu".into(),
            "stat.uci.edu".into(),
        ]
    }
    pub fn trap_patterns() -> Vec<String> {
        vec![
            "calendar".into(),
            "/events".into(),
            "/event/".into(),
            "login".into(),
            "logout".into(),
            "/feed".into(),
            "/rss".into(),
            "/share".into(),
            "replytocom".into(),
        ]
    }
    pub fn max_query_params() -> usize {
        5
    }
    pub fn blocked_extensions() -> Vec<String> {
        [
            "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2",
            "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf",
            "ps", "eps", "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data",
            "dat", "exe", "bz2", "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll",
            "cnf", "tgz", "sha1", "thmx", "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv",
            "swf", "wma", "zip", "rar", "gz",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }

    // Common English function words: articles, pronouns, contractions,
    // conjunctions. Matched case-sensitively against lowercased tokens.
    pub fn stop_words() -> Vec<String> {
        [
            "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any",
            "are", "aren't", "as", "at", "be", "because", "been", "before", "being", "below",
            "between", "both", "but", "by", "can't", "cannot", "could", "couldn't", "did",
            "didn't", "do", "does", "doesn't", "doing", "don't", "down", "during", "each", "few",
            "for", "from", "further", "had", "hadn't", "has", "hasn't", "have", "haven't",
            "having", "he", "he'd", "he'll", "he's", "her", "here", "here's", "hers", "herself",
            "him", "himself", "his", "how", "how's", "i", "i'd", "i'll", "i'm", "i've", "if",
            "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's", "me", "more",
            "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
            "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own",
            "same", "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so",
            "some", "such", "than", "that", "that's", "the", "their", "theirs", "them",
            "themselves", "then", "there", "there's", "these", "they", "they'd", "they'll",
            "they're", "they've", "this", "those", "through", "to", "too", "under", "until",
            "up", "very", "was", "wasn't", "we", "we'd", "we'll", "we're", "we've", "were",
            "weren't", "what", "what's", "when", "when's", "where", "where's", "which", "while",
            "who", "who's", "whom", "why", "why's", "with", "won't", "would", "wouldn't", "you",
            "you'd", "you'll", "you're", "you've", "your", "yours", "yourself", "yourselves",
        ]
        .into_iter()
        .map(String::from)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_word_count() {
        let mut config = Config::default();
        config.processor.min_word_count = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_domains() {
        let mut config = Config::default();
        config.scope.allowed_domains.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_persist_cadence() {
        let mut config = Config::default();
        config.processor.persist_every = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn default_stop_words_cover_contractions() {
        let words = StopWordsConfig::default().words;
        assert!(words.iter().any(|w| w == "they're"));
        assert!(words.iter().any(|w| w == "the"));
    }

    #[test]
    fn parse_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [processor]
            min_word_count = 10

            [scope]
            allowed_domains = ["example.org"]
            "#,
        )
        .unwrap();

        assert_eq!(config.processor.min_word_count, 10);
        assert_eq!(config.processor.max_content_bytes, 5_000_000);
        assert_eq!(config.scope.allowed_domains, vec!["example.org"]);
        assert_eq!(config.scope.max_query_params, 5);
        assert!(!config.stopwords.words.is_empty());
    }
}
