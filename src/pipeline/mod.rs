//! The page-processing pipeline.
//!
//! - `process`: per-page orchestration, the entry point for callers
//! - `extract`: HTML -> visible text + raw hrefs
//! - `tokenize`: text -> word tokens
//! - `frequency`: running token -> count index
//! - `dedup`: content fingerprinting
//! - `filter`: crawl-scope URL validation
//! - `state`: shared mutable state behind one lock

pub mod dedup;
pub mod extract;
pub mod filter;
pub mod frequency;
pub mod process;
pub mod state;
pub mod tokenize;

pub use filter::UrlFilter;
pub use frequency::{FrequencyIndex, StopWords};
pub use process::PageProcessor;
pub use state::{CrawlState, ReportSnapshot};
