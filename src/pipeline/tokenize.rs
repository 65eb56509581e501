// src/pipeline/tokenize.rs

//! Word tokenization for extracted page text.
//!
//! Character-scan tokenizer: ASCII alphanumerics are lowercased into the
//! current word, apostrophes and hyphens ride along, and a period is kept
//! only when it glues an abbreviation together (`u.s.a`). Everything else
//! terminates the word. Buffers without a single alphanumeric character
//! are discarded.

use std::iter::Peekable;
use std::str::Chars;

/// Lazy iterator over the tokens of a text.
pub struct Tokens<'a> {
    chars: Peekable<Chars<'a>>,
    done: bool,
}

impl Iterator for Tokens<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.done {
            return None;
        }

        let mut buf = String::new();
        let mut has_alnum = false;

        loop {
            match self.chars.next() {
                Some(c) if c.is_ascii_alphanumeric() => {
                    buf.push(c.to_ascii_lowercase());
                    has_alnum = true;
                }
                Some(c @ ('\'' | '-')) => buf.push(c),
                Some('.') => match self.chars.peek() {
                    // Keep the period only when followed by a non-space
                    // character (abbreviations, domain-like tokens).
                    Some(next) if !next.is_whitespace() => buf.push('.'),
                    _ => {
                        if has_alnum {
                            return Some(buf);
                        }
                        buf.clear();
                        has_alnum = false;
                    }
                },
                Some(_) => {
                    if has_alnum {
                        return Some(buf);
                    }
                    buf.clear();
                    has_alnum = false;
                }
                None => {
                    self.done = true;
                    if has_alnum {
                        return Some(buf);
                    }
                    return None;
                }
            }
        }
    }
}

/// Tokenize a text into a lazy sequence of normalized word tokens.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens {
        chars: text.chars().peekable(),
        done: false,
    }
}

/// Number of tokens in a text.
pub fn token_count(text: &str) -> usize {
    tokenize(text).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(text: &str) -> Vec<String> {
        tokenize(text).collect()
    }

    #[test]
    fn test_basic_words() {
        assert_eq!(toks("Hello, World! u.s.a."), vec!["hello", "world", "u.s.a"]);
    }

    #[test]
    fn test_apostrophe_and_hyphen() {
        assert_eq!(toks("don't use a stop-gap"), vec!["don't", "use", "a", "stop-gap"]);
    }

    #[test]
    fn test_period_before_whitespace_terminates() {
        assert_eq!(toks("end. next"), vec!["end", "next"]);
        assert_eq!(toks("trailing."), vec!["trailing"]);
    }

    #[test]
    fn test_intra_word_period_kept() {
        assert_eq!(toks("visit www.example.com now"), vec!["www.example.com", "now"]);
    }

    #[test]
    fn test_pure_punctuation_discarded() {
        assert_eq!(toks("--- ''' -'- abc"), vec!["abc"]);
        assert!(toks("!!! ???").is_empty());
    }

    #[test]
    fn test_digits_and_case() {
        assert_eq!(toks("ABC123 x9"), vec!["abc123", "x9"]);
    }

    #[test]
    fn test_non_ascii_terminates() {
        assert_eq!(toks("café"), vec!["caf"]);
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(toks("").is_empty());
        assert!(toks("  \t\n ").is_empty());
    }

    #[test]
    fn test_token_count() {
        assert_eq!(token_count("one two three"), 3);
        assert_eq!(token_count(""), 0);
    }

    #[test]
    fn test_tokens_are_well_formed() {
        let messy = "A &b^ c.d.e!  F--G 'h' .. 0x1F café don't...";
        for token in tokenize(messy) {
            assert!(!token.is_empty());
            assert!(token.chars().any(|c| c.is_ascii_alphanumeric()), "{token}");
            assert!(
                token
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '\'' | '-' | '.')),
                "{token}"
            );
            assert!(!token.chars().any(|c| c.is_ascii_uppercase()), "{token}");
        }
    }
}
