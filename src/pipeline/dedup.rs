// src/pipeline/dedup.rs

//! Content fingerprinting for near-duplicate detection.
//!
//! The digest is computed over the whitespace-collapsed form of the
//! extracted visible text, so pages differing only in formatting hash to
//! the same fingerprint. Membership tracking lives in `CrawlState`; this
//! module only produces digests.

use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of a page's visible text, hex-encoded.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    let mut first = true;
    for word in text.split_whitespace() {
        if !first {
            hasher.update(b" ");
        }
        hasher.update(word.as_bytes());
        first = false;
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_insensitive() {
        let a = fingerprint("hello   world\n\tfoo");
        let b = fingerprint(" hello world foo ");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_text_differs() {
        assert_ne!(fingerprint("hello world"), fingerprint("hello worlds"));
    }

    #[test]
    fn test_stable_hex_digest() {
        let digest = fingerprint("");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, fingerprint("  \n "));
    }
}
