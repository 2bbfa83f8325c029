/*!
 * filescan - walk a directory tree and list, filter and sort file metadata
 *
 * The pipeline walks the tree in a chosen order, extracts one record per
 * regular file, then optionally filters and sorts the records. Directory and
 * file failures are collected next to the results instead of aborting the
 * scan.
 */

pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod fs;
pub mod logging;
pub mod report;
pub mod scanner;
pub mod sort;
pub mod types;
pub mod utils;
pub mod walker;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::Config;
pub use error::{Result, ScanError};
pub use extract::{extension_of, MetadataExtractor};
pub use filter::{filter, Predicate, TimeField};
pub use fs::{FileSystem, HostFs, MemoryFs};
pub use report::{ReportFormat, Reporter, ScanReport};
pub use scanner::{ScanOptions, ScanOutcome, Scanner};
pub use sort::{sort, SortKey, SortOrder};
pub use types::{EntryKind, EntryMetadata, FileRecord, ListedEntry};
pub use walker::{TraversalOrder, TreeWalker, WalkOutcome};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
