// src/pipeline/filter.rs

//! Crawl-scope URL filter.
//!
//! Decides whether a normalized candidate URL is worth fetching. The
//! filter fails closed: anything unparsable is invalid, never an error.

use regex::Regex;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ScopePolicy;

/// Validator for candidate URLs against a crawl-scope policy.
#[derive(Debug, Clone)]
pub struct UrlFilter {
    allowed_domains: Vec<String>,
    denied_hosts: Vec<String>,
    trap_patterns: Vec<String>,
    max_query_params: usize,
    extension_re: Regex,
}

impl UrlFilter {
    /// Build a filter from a scope policy.
    ///
    /// An extension list that does not compile into a pattern is a
    /// configuration bug and surfaces as an error here, once, instead of
    /// per candidate.
    pub fn new(policy: &ScopePolicy) -> Result<Self> {
        let alternation = policy
            .blocked_extensions
            .iter()
            .map(|ext| regex::escape(ext))
            .collect::<Vec<_>>()
            .join("|");
        let extension_re = Regex::new(&format!(r"(?i)\.(?:{alternation})$"))
            .map_err(|e| AppError::config(format!("invalid blocked_extensions: {e}")))?;

        Ok(Self {
            allowed_domains: lowercased(&policy.allowed_domains),
            denied_hosts: lowercased(&policy.denied_hosts),
            trap_patterns: lowercased(&policy.trap_patterns),
            max_query_params: policy.max_query_params,
            extension_re,
        })
    }

    /// Whether a candidate URL is inside the crawl scope.
    pub fn is_valid(&self, candidate: &str) -> bool {
        let Ok(url) = Url::parse(candidate) else {
            return false;
        };

        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        let Some(host) = url.host_str() else {
            return false;
        };
        let host = host.to_lowercase();
        if host.is_empty() || !self.domain_allowed(&host) {
            return false;
        }

        let netloc = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.clone(),
        };
        if self.denied_hosts.iter().any(|d| netloc.contains(d.as_str())) {
            return false;
        }

        let path = url.path().to_lowercase();
        if self.trap_patterns.iter().any(|p| path.contains(p.as_str())) {
            return false;
        }

        if let Some(query) = url.query() {
            if query.matches('=').count() > self.max_query_params {
                return false;
            }
        }

        !self.extension_re.is_match(&path)
    }

    /// Dot-anchored suffix match: `www.ics.uci.edu` matches `ics.uci.edu`,
    /// `notics.uci.edu` does not.
    fn domain_allowed(&self, host: &str) -> bool {
        self.allowed_domains.iter().any(|domain| {
            host == domain
                || (host.len() > domain.len()
                    && host.ends_with(domain.as_str())
                    && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
        })
    }
}

fn lowercased(items: &[String]) -> Vec<String> {
    items.iter().map(|s| s.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> UrlFilter {
        UrlFilter::new(&ScopePolicy::default()).unwrap()
    }

    #[test]
    fn test_accepts_in_scope_page() {
        let f = filter();
        assert!(f.is_valid("https://www.ics.uci.edu/research/index.html"));
        assert!(f.is_valid("http://cs.uci.edu/people"));
        assert!(f.is_valid("https://stat.uci.edu/"));
    }

    #[test]
    fn test_rejects_wrong_scheme() {
        let f = filter();
        assert!(!f.is_valid("ftp://ics.uci.edu/file"));
        assert!(!f.is_valid("mailto:someone@ics.uci.edu"));
    }

    #[test]
    fn test_rejects_out_of_scope_domain() {
        let f = filter();
        assert!(!f.is_valid("https://example.com/"));
        assert!(!f.is_valid("https://uci.edu/"));
    }

    #[test]
    fn test_domain_suffix_is_dot_anchored() {
        let f = filter();
        assert!(f.is_valid("https://vision.ics.uci.edu/"));
        assert!(!f.is_valid("https://notics.uci.edu/"));
    }

    #[test]
    fn test_rejects_denied_host() {
        let mut policy = ScopePolicy::default();
        policy.denied_hosts = vec!["archive.".to_string()];
        let f = UrlFilter::new(&policy).unwrap();
        assert!(!f.is_valid("https://archive.ics.uci.edu/ml/index.html"));
        assert!(f.is_valid("https://www.ics.uci.edu/ml/index.html"));
    }

    #[test]
    fn test_rejects_trap_path() {
        let f = filter();
        assert!(!f.is_valid("https://ics.uci.edu/events/calendar?month=3"));
        assert!(!f.is_valid("https://ics.uci.edu/wp-login.php"));
        assert!(!f.is_valid("https://ics.uci.edu/news/feed"));
    }

    #[test]
    fn test_trap_match_is_case_insensitive() {
        let f = filter();
        assert!(!f.is_valid("https://ics.uci.edu/Events/Calendar"));
    }

    #[test]
    fn test_query_parameter_cap() {
        let f = filter();
        assert!(f.is_valid("https://ics.uci.edu/page?a=1&b=2&c=3&d=4&e=5"));
        assert!(!f.is_valid("https://ics.uci.edu/page?a=1&b=2&c=3&d=4&e=5&f=6"));
    }

    #[test]
    fn test_rejects_blocked_extensions() {
        let f = filter();
        assert!(!f.is_valid("https://ics.uci.edu/logo.png"));
        assert!(!f.is_valid("https://ics.uci.edu/paper.PDF"));
        assert!(!f.is_valid("https://ics.uci.edu/data.tar"));
        assert!(f.is_valid("https://ics.uci.edu/page.html"));
    }

    #[test]
    fn test_malformed_url_fails_closed() {
        let f = filter();
        assert!(!f.is_valid("not a url"));
        assert!(!f.is_valid("http://"));
        assert!(!f.is_valid(""));
    }
}
