/*!
 * Per-file metadata extraction
 */

use std::path::Path;

use crate::error::{Result, ScanError};
use crate::fs::FileSystem;
use crate::types::FileRecord;

/// Text after the last `.` in `name`, or `""` when there is none.
///
/// `"report.tar.gz"` gives `"gz"`, `"archive."` gives `""` and `".gitignore"`
/// gives `"gitignore"`.
pub fn extension_of(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) => &name[pos + 1..],
        None => "",
    }
}

/// Builds [`FileRecord`]s from paths discovered by the walker
pub struct MetadataExtractor<F> {
    fs: F,
}

impl<F: FileSystem> MetadataExtractor<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Stat `path` and build its record
    pub fn extract(&self, path: &Path) -> Result<FileRecord> {
        let metadata = self.fs.metadata(path).map_err(|source| ScanError::Metadata {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        Ok(FileRecord::new(path.to_path_buf(), name, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::{HostFs, MemoryFs};
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn test_extension_of() {
        let cases = [
            ("report.tar.gz", "gz"),
            ("README", ""),
            ("archive.", ""),
            (".gitignore", "gitignore"),
            ("main.CPP", "CPP"),
            ("", ""),
        ];
        for (name, expected) in cases {
            assert_eq!(extension_of(name), expected, "extension of {:?}", name);
        }
    }

    #[test]
    fn test_extract_from_memory() {
        let created = UNIX_EPOCH + Duration::from_secs(100);
        let modified = UNIX_EPOCH + Duration::from_secs(200);
        let mut mem = MemoryFs::new();
        mem.add_file_at("/root/notes.md", 42, created, modified);

        let record = MetadataExtractor::new(&mem)
            .extract(Path::new("/root/notes.md"))
            .unwrap();
        assert_eq!(record.name(), "notes.md");
        assert_eq!(record.extension(), "md");
        assert_eq!(record.size(), 42);
        assert_eq!(record.created(), created);
        assert_eq!(record.modified(), modified);
    }

    #[test]
    fn test_extract_vanished_file_is_metadata_error() {
        let mut mem = MemoryFs::new();
        mem.add_vanished_file("/root/gone.txt");

        let err = MetadataExtractor::new(&mem)
            .extract(Path::new("/root/gone.txt"))
            .unwrap_err();
        assert!(matches!(err, ScanError::Metadata { .. }));
        assert_eq!(err.path(), Some(Path::new("/root/gone.txt")));
    }

    #[test]
    fn test_extract_from_host() -> std::io::Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("archive.tar.gz");
        std::fs::write(&path, b"0123456789")?;

        let record = MetadataExtractor::new(HostFs).extract(&path).unwrap();
        assert_eq!(record.path(), path.as_path());
        assert_eq!(record.extension(), "gz");
        assert_eq!(record.size(), 10);
        Ok(())
    }
}
