// src/lib.rs

//! scopecrawl — content-processing core for a restricted-domain crawler.
//!
//! Given a fetched page, the pipeline extracts visible text and outbound
//! links, maintains a running word-frequency index, rejects duplicate and
//! low-value pages, and returns the normalized, in-scope links to enqueue
//! next. Fetching, scheduling, and politeness live in the caller.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod utils;
