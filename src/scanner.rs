/*!
 * Scan pipeline: walk, extract, filter, sort
 */

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::ProgressBar;
use log::{debug, warn};

use crate::error::{Result, ScanError};
use crate::extract::MetadataExtractor;
use crate::filter::{filter, Predicate};
use crate::fs::FileSystem;
use crate::sort::{sort, SortKey, SortOrder};
use crate::types::FileRecord;
use crate::walker::{TraversalOrder, TreeWalker};

/// What to scan and how to shape the result
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Directory to walk
    pub root: PathBuf,
    /// Directory expansion order
    pub order: TraversalOrder,
    /// Keep only matching records
    pub predicate: Option<Predicate>,
    /// Reorder the records
    pub sort: Option<(SortKey, SortOrder)>,
}

impl ScanOptions {
    /// Breadth-first walk of `root` with no filter and no sort
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            order: TraversalOrder::default(),
            predicate: None,
            sort: None,
        }
    }
}

/// Records produced by a scan with the errors that were skipped over
#[derive(Debug)]
pub struct ScanOutcome {
    /// Extracted records, filtered and sorted as requested
    pub records: Vec<FileRecord>,
    /// Non-fatal errors, directories first, then files
    pub errors: Vec<ScanError>,
    /// Time spent walking and extracting
    pub elapsed: Duration,
}

impl ScanOutcome {
    /// Sum of the sizes of the reported records
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(FileRecord::size).sum()
    }
}

/// Runs scans against a [`FileSystem`]
pub struct Scanner<F> {
    fs: F,
    /// Progress bar ticked once per discovered file
    pub progress: Arc<ProgressBar>,
}

impl<F: FileSystem> Scanner<F> {
    /// Create a new scanner
    pub fn new(fs: F, progress: Arc<ProgressBar>) -> Self {
        Self { fs, progress }
    }

    /// Scan `options.root`.
    ///
    /// Only an unreadable root is an error; everything else is collected in
    /// [`ScanOutcome::errors`].
    pub fn run(&self, options: &ScanOptions) -> Result<ScanOutcome> {
        let start = Instant::now();
        let extractor = MetadataExtractor::new(&self.fs);
        let mut records = Vec::new();
        let mut failures = Vec::new();

        let mut errors = TreeWalker::new(&self.fs).walk_with(&options.root, options.order, |path| {
            self.progress.inc(1);
            match extractor.extract(path) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!("[scan] {err}");
                    failures.push(err);
                }
            }
        })?;
        errors.extend(failures);
        let elapsed = start.elapsed();

        debug!(
            "[scan] {} record(s) from {} in {:?}",
            records.len(),
            options.root.display(),
            elapsed
        );

        if let Some(predicate) = &options.predicate {
            records = filter(records, predicate);
        }
        if let Some((key, order)) = options.sort {
            records = sort(&records, key, order);
        }

        Ok(ScanOutcome {
            records,
            errors,
            elapsed,
        })
    }
}
