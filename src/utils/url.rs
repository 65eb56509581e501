// src/utils/url.rs

//! URL canonicalization.
//!
//! Candidate hrefs arrive relative or absolute, with or without fragments.
//! Everything downstream (seen-set, scope filter, frontier) works on the
//! canonical form produced here: absolute, fragment-free.

use url::Url;

/// Resolve a potentially relative href against a base URL and strip any
/// fragment component.
///
/// Returns `None` for hrefs that cannot be resolved into a URL. Malformed
/// input is a normal crawl condition, never an error.
///
/// # Examples
/// ```
/// use url::Url;
/// use scopecrawl::utils::url::normalize;
///
/// let base = Url::parse("https://www.ics.uci.edu/index.html").unwrap();
/// assert_eq!(
///     normalize(&base, "/path/to/page#section2"),
///     Some("https://www.ics.uci.edu/path/to/page".to_string())
/// );
/// ```
pub fn normalize(base: &Url, href: &str) -> Option<String> {
    let mut resolved = base.join(href).ok()?;
    resolved.set_fragment(None);
    Some(resolved.to_string())
}

/// Resolve an href against a base URL given as a string.
pub fn normalize_str(base: &str, href: &str) -> Option<String> {
    let base = Url::parse(base).ok()?;
    normalize(&base, href)
}

/// Extract the host from a URL string.
pub fn host_of(url_str: &str) -> Option<String> {
    Url::parse(url_str)
        .ok()
        .and_then(|u| u.host_str().map(|s| s.to_lowercase()))
}
