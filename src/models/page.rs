// src/models/page.rs

use serde::{Deserialize, Serialize};

/// A page handed over by the external fetcher.
///
/// Consumed exactly once by the page processor. `content` is `None` when
/// the fetch produced no body (errors, redirects without content).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// Request URL the fetcher used
    pub url: String,
    /// HTTP status code returned by the server
    pub status: u16,
    /// Raw response body, if any
    pub content: Option<Vec<u8>>,
}

impl FetchedPage {
    pub fn new(url: impl Into<String>, status: u16, content: Option<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status,
            content,
        }
    }
}

/// Record of the page with the most tokens seen so far.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongestPage {
    pub url: String,
    pub token_count: usize,
    /// Full extracted text of the page
    pub text: String,
}
