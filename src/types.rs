/*!
 * Core types and data structures for filescan
 */

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Kind of a directory entry as reported by the enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory to descend into
    Directory,
    /// Symlinks, sockets, devices and anything else that is neither
    Other,
}

/// One child of an enumerated directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedEntry {
    /// Full path of the entry
    pub path: PathBuf,
    /// Final path component
    pub name: String,
    /// Entry kind
    pub kind: EntryKind,
}

impl ListedEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Result of a stat on a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryMetadata {
    /// Size in bytes
    pub size: u64,
    /// Creation time; hosts without one report the modification time
    pub created: SystemTime,
    /// Last modification time
    pub modified: SystemTime,
    /// Platform attribute bits (unix mode, windows file attributes)
    pub attributes: u32,
}

/// Metadata for one regular file found during a walk.
///
/// Records are immutable; all fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    path: PathBuf,
    name: String,
    extension: String,
    size: u64,
    created: SystemTime,
    modified: SystemTime,
    attributes: u32,
}

impl FileRecord {
    /// Build a record from a path, its file name and its stat result
    pub fn new(path: PathBuf, name: String, metadata: EntryMetadata) -> Self {
        let extension = crate::extract::extension_of(&name).to_string();
        Self {
            path,
            name,
            extension,
            size: metadata.size,
            created: metadata.created,
            modified: metadata.modified,
            attributes: metadata.attributes,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Text after the last `.` of the name, possibly empty
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn created(&self) -> SystemTime {
        self.created
    }

    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Opaque platform attribute bits
    pub fn attributes(&self) -> u32 {
        self.attributes
    }
}
