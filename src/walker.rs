/*!
 * Directory tree traversal
 *
 * The walker expands one directory at a time and yields every regular file it
 * finds. Three expansion orders are available; they discover the same set of
 * files and differ only in the sequence files are reported in, which callers
 * should not rely on beyond streaming.
 *
 * The iterative orders keep their pending directories in a local queue, so
 * memory grows with the number of directories waiting to be expanded. The
 * recursive order uses one stack frame per level of nesting and is limited by
 * the thread's stack size on very deep trees.
 */

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, trace, warn};
use serde::Serialize;
use strum::{Display, EnumString};

use crate::error::{Result, ScanError};
use crate::fs::FileSystem;
use crate::types::{EntryKind, ListedEntry};

/// Order in which directories are expanded
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, ValueEnum, Serialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TraversalOrder {
    /// FIFO queue of pending directories
    #[default]
    BreadthFirst,
    /// LIFO stack of pending directories
    DepthFirst,
    /// Plain recursion; depth is bounded by the call stack
    Recursive,
}

/// A directory waiting to be enumerated
#[derive(Debug)]
struct DirectoryTask {
    path: PathBuf,
    depth: usize,
}

/// Files discovered by a walk plus the non-fatal errors met on the way
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// File paths in discovery order
    pub files: Vec<PathBuf>,
    /// Unavailable directories and unreadable entries
    pub errors: Vec<ScanError>,
}

/// Walks a directory tree through a [`FileSystem`]
pub struct TreeWalker<F> {
    fs: F,
}

impl<F: FileSystem> TreeWalker<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Walk `root` and collect every regular file below it.
    ///
    /// Fails only when `root` itself cannot be enumerated.
    pub fn walk(&self, root: &Path, order: TraversalOrder) -> Result<WalkOutcome> {
        let mut files = Vec::new();
        let errors = self.walk_with(root, order, |path| files.push(path.to_path_buf()))?;
        Ok(WalkOutcome { files, errors })
    }

    /// Walk `root`, calling `on_file` as soon as each file is discovered.
    ///
    /// Returns the non-fatal errors recorded during the walk.
    pub fn walk_with(
        &self,
        root: &Path,
        order: TraversalOrder,
        mut on_file: impl FnMut(&Path),
    ) -> Result<Vec<ScanError>> {
        let children = self
            .fs
            .list_dir(root)
            .map_err(|source| ScanError::InvalidRoot {
                path: root.to_path_buf(),
                source,
            })?;

        let mut errors = Vec::new();
        let subdirs = self.expand(children, 1, &mut on_file, &mut errors);

        match order {
            TraversalOrder::BreadthFirst | TraversalOrder::DepthFirst => {
                let mut pending: VecDeque<DirectoryTask> = subdirs.into();
                loop {
                    let next = match order {
                        TraversalOrder::BreadthFirst => pending.pop_front(),
                        _ => pending.pop_back(),
                    };
                    let Some(task) = next else {
                        break;
                    };
                    if let Some(children) = self.open(&task, &mut errors) {
                        let subdirs = self.expand(children, task.depth + 1, &mut on_file, &mut errors);
                        pending.extend(subdirs);
                    }
                }
            }
            TraversalOrder::Recursive => {
                for task in subdirs {
                    self.walk_recursive(&task, &mut on_file, &mut errors);
                }
            }
        }

        debug!(
            "[walk] {} finished ({}) with {} error(s)",
            root.display(),
            order,
            errors.len()
        );
        Ok(errors)
    }

    fn walk_recursive(
        &self,
        task: &DirectoryTask,
        on_file: &mut dyn FnMut(&Path),
        errors: &mut Vec<ScanError>,
    ) {
        let Some(children) = self.open(task, errors) else {
            return;
        };
        for subdir in self.expand(children, task.depth + 1, on_file, errors) {
            self.walk_recursive(&subdir, on_file, errors);
        }
    }

    /// List a pending directory, recording it as unavailable on failure
    fn open(
        &self,
        task: &DirectoryTask,
        errors: &mut Vec<ScanError>,
    ) -> Option<Vec<Result<ListedEntry>>> {
        trace!("[walk] expanding {} (depth {})", task.path.display(), task.depth);
        match self.fs.list_dir(&task.path) {
            Ok(children) => Some(children),
            Err(source) => {
                let err = ScanError::DirectoryUnavailable {
                    path: task.path.clone(),
                    source,
                };
                warn!("[walk] {err}");
                errors.push(err);
                None
            }
        }
    }

    /// Yield the files among `children` and return their subdirectories as
    /// new tasks, in listing order
    fn expand(
        &self,
        children: Vec<Result<ListedEntry>>,
        depth: usize,
        on_file: &mut dyn FnMut(&Path),
        errors: &mut Vec<ScanError>,
    ) -> Vec<DirectoryTask> {
        let mut subdirs = Vec::new();

        for child in children {
            let entry = match child {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("[walk] {err}");
                    errors.push(err);
                    continue;
                }
            };

            match entry.kind {
                EntryKind::Directory => {
                    if entry.name == "." || entry.name == ".." {
                        continue;
                    }
                    subdirs.push(DirectoryTask {
                        path: entry.path,
                        depth,
                    });
                }
                EntryKind::File => on_file(&entry.path),
                EntryKind::Other => trace!("[walk] skipping {}", entry.path.display()),
            }
        }

        subdirs
    }
}
