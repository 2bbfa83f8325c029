/*!
 * Directory enumeration capability and its adapters
 *
 * The walker and the metadata extractor only depend on the [`FileSystem`]
 * trait. [`HostFs`] reads the real filesystem through walkdir, one directory
 * level at a time; [`MemoryFs`] is an in-memory tree used to reproduce
 * unreadable directories and vanished files.
 */

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use walkdir::WalkDir;

use crate::error::{Result, ScanError};
use crate::types::{EntryKind, EntryMetadata, ListedEntry};

/// What the core needs from a filesystem
pub trait FileSystem {
    /// List the direct children of `dir`.
    ///
    /// The outer error means `dir` itself could not be opened. Inner errors
    /// belong to single entries and do not prevent the others from listing.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<Result<ListedEntry>>>;

    /// Stat a single file
    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata>;
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<Result<ListedEntry>>> {
        (**self).list_dir(dir)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        (**self).metadata(path)
    }
}

/// The host filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct HostFs;

impl FileSystem for HostFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<Result<ListedEntry>>> {
        // walkdir silently yields nothing for a file root, so check first
        if !fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("not a directory: {}", dir.display()),
            ));
        }

        let mut entries = Vec::new();
        // The iterator owns the directory handle and drops it on every exit path
        for item in WalkDir::new(dir).min_depth(1).max_depth(1) {
            match item {
                Ok(entry) => {
                    let file_type = entry.file_type();
                    let kind = if file_type.is_dir() {
                        EntryKind::Directory
                    } else if file_type.is_file() {
                        EntryKind::File
                    } else {
                        EntryKind::Other
                    };
                    entries.push(Ok(ListedEntry {
                        name: entry.file_name().to_string_lossy().to_string(),
                        path: entry.into_path(),
                        kind,
                    }));
                }
                Err(err) if err.depth() == 0 => return Err(io::Error::from(err)),
                Err(err) => {
                    let path = err
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| dir.to_path_buf());
                    entries.push(Err(ScanError::Metadata {
                        path,
                        source: io::Error::from(err),
                    }));
                }
            }
        }

        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        let meta = fs::metadata(path)?;
        let modified = meta.modified()?;
        // Not every filesystem records a birth time
        let created = meta.created().unwrap_or(modified);

        Ok(EntryMetadata {
            size: meta.len(),
            created,
            modified,
            attributes: attributes(&meta),
        })
    }
}

#[cfg(unix)]
fn attributes(meta: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    meta.permissions().mode()
}

#[cfg(windows)]
fn attributes(meta: &fs::Metadata) -> u32 {
    use std::os::windows::fs::MetadataExt;
    meta.file_attributes()
}

#[cfg(not(any(unix, windows)))]
fn attributes(meta: &fs::Metadata) -> u32 {
    u32::from(meta.permissions().readonly())
}

#[derive(Debug, Clone)]
enum MemoryNode {
    Dir { readable: bool },
    File { metadata: Option<EntryMetadata> },
}

/// In-memory directory tree.
///
/// Paths are stored as given; parents are created on demand. Listing order is
/// the lexical order of the paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<PathBuf, MemoryNode>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory and any missing parents
    pub fn add_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            self.nodes
                .entry(ancestor.to_path_buf())
                .or_insert(MemoryNode::Dir { readable: true });
        }
        self
    }

    /// Add a file of `size` bytes with both timestamps at the epoch
    pub fn add_file(&mut self, path: impl AsRef<Path>, size: u64) -> &mut Self {
        self.add_file_with(
            path,
            EntryMetadata {
                size,
                created: UNIX_EPOCH,
                modified: UNIX_EPOCH,
                attributes: 0o100644,
            },
        )
    }

    /// Add a file with explicit metadata
    pub fn add_file_with(&mut self, path: impl AsRef<Path>, metadata: EntryMetadata) -> &mut Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes.insert(
            path.to_path_buf(),
            MemoryNode::File {
                metadata: Some(metadata),
            },
        );
        self
    }

    /// Add a file with the given size and timestamps
    pub fn add_file_at(
        &mut self,
        path: impl AsRef<Path>,
        size: u64,
        created: SystemTime,
        modified: SystemTime,
    ) -> &mut Self {
        self.add_file_with(
            path,
            EntryMetadata {
                size,
                created,
                modified,
                attributes: 0o100644,
            },
        )
    }

    /// Make listing `path` fail with permission denied
    pub fn deny_dir(&mut self, path: impl AsRef<Path>) -> &mut Self {
        self.add_dir(path.as_ref());
        self.nodes.insert(
            path.as_ref().to_path_buf(),
            MemoryNode::Dir { readable: false },
        );
        self
    }

    /// Add a file that is listed but whose stat fails, as if it was removed
    /// between discovery and extraction
    pub fn add_vanished_file(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.add_dir(parent);
        }
        self.nodes
            .insert(path.to_path_buf(), MemoryNode::File { metadata: None });
        self
    }
}

impl FileSystem for MemoryFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<Result<ListedEntry>>> {
        match self.nodes.get(dir) {
            Some(MemoryNode::Dir { readable: true }) => {}
            Some(MemoryNode::Dir { readable: false }) => {
                return Err(io::Error::new(
                    io::ErrorKind::PermissionDenied,
                    format!("permission denied: {}", dir.display()),
                ))
            }
            Some(MemoryNode::File { .. }) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("not a directory: {}", dir.display()),
                ))
            }
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", dir.display()),
                ))
            }
        }

        let entries = self
            .nodes
            .iter()
            .filter(|(path, _)| path.parent() == Some(dir))
            .map(|(path, node)| {
                let kind = match node {
                    MemoryNode::Dir { .. } => EntryKind::Directory,
                    MemoryNode::File { .. } => EntryKind::File,
                };
                Ok(ListedEntry {
                    path: path.clone(),
                    name: path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string(),
                    kind,
                })
            })
            .collect();

        Ok(entries)
    }

    fn metadata(&self, path: &Path) -> io::Result<EntryMetadata> {
        match self.nodes.get(path) {
            Some(MemoryNode::File {
                metadata: Some(metadata),
            }) => Ok(*metadata),
            Some(MemoryNode::Dir { .. }) => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("is a directory: {}", path.display()),
            )),
            _ => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such file: {}", path.display()),
            )),
        }
    }
}
