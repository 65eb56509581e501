//! Storage abstractions for persisted crawl artifacts.
//!
//! The processor persists three artifacts after accepted pages:
//!
//! ```text
//! {root}/
//! ├── frequencies.txt     # `<token> <count>` per line, descending count
//! ├── unique_pages.txt    # single integer, distinct pages accepted
//! ├── longest_page.txt    # URL + token count, blank line, full text
//! └── stats.json          # run counters (written by the CLI driver)
//! ```

pub mod local;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::ProcessStats;
use crate::pipeline::state::ReportSnapshot;

// Re-export for convenience
pub use local::LocalStorage;

/// Artifact file names under the storage root.
pub const FREQUENCIES_FILE: &str = "frequencies.txt";
pub const UNIQUE_PAGES_FILE: &str = "unique_pages.txt";
pub const LONGEST_PAGE_FILE: &str = "longest_page.txt";
pub const STATS_FILE: &str = "stats.json";

/// Trait for report storage backends.
#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Write the frequency report, unique-page counter, and longest-page
    /// record from a state snapshot.
    async fn write_reports(&self, snapshot: &ReportSnapshot) -> Result<()>;

    /// Write run statistics.
    async fn write_stats(&self, stats: &ProcessStats) -> Result<()>;
}
