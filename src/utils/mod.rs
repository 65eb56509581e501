//! Utility functions and helpers.

pub mod url;

pub use url::{host_of, normalize, normalize_str};
