/*!
 * End-to-end scans of real directory trees
 */

use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use filetime::{set_file_mtime, FileTime};
use indicatif::ProgressBar;
use tempfile::tempdir;

use crate::filter::{Predicate, TimeField};
use crate::fs::HostFs;
use crate::scanner::{ScanOptions, Scanner};
use crate::sort::{SortKey, SortOrder};
use crate::walker::{TraversalOrder, TreeWalker};

// root/{a.txt(10b), sub/{b.log(5b)}, sub2/{}}
fn setup_test_directory() -> io::Result<tempfile::TempDir> {
    let temp_dir = tempdir()?;

    fs::create_dir(temp_dir.path().join("sub"))?;
    fs::create_dir(temp_dir.path().join("sub2"))?;

    let mut a = File::create(temp_dir.path().join("a.txt"))?;
    a.write_all(b"0123456789")?;

    let mut b = File::create(temp_dir.path().join("sub").join("b.log"))?;
    b.write_all(b"01234")?;

    Ok(temp_dir)
}

fn scanner() -> Scanner<HostFs> {
    Scanner::new(HostFs, Arc::new(ProgressBar::hidden()))
}

fn names(records: &[crate::FileRecord]) -> Vec<&str> {
    records.iter().map(|r| r.name()).collect()
}

#[test]
fn test_full_walk() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let outcome = scanner().run(&ScanOptions::new(temp_dir.path())).unwrap();
    let found: BTreeSet<&str> = names(&outcome.records).into_iter().collect();

    assert_eq!(found, BTreeSet::from(["a.txt", "b.log"]));
    assert!(outcome.errors.is_empty());
    Ok(())
}

#[test]
fn test_filter_by_extension() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let options = ScanOptions {
        predicate: Some(Predicate::Extension("log".into())),
        ..ScanOptions::new(temp_dir.path())
    };
    let outcome = scanner().run(&options).unwrap();

    assert_eq!(names(&outcome.records), vec!["b.log"]);
    Ok(())
}

#[test]
fn test_sort_by_size() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let options = ScanOptions {
        sort: Some((SortKey::Size, SortOrder::Ascending)),
        ..ScanOptions::new(temp_dir.path())
    };
    let outcome = scanner().run(&options).unwrap();

    assert_eq!(names(&outcome.records), vec!["b.log", "a.txt"]);
    let sizes: Vec<u64> = outcome.records.iter().map(|r| r.size()).collect();
    assert_eq!(sizes, vec![5, 10]);
    assert_eq!(outcome.total_size(), 15);
    Ok(())
}

#[test]
fn test_all_orders_find_same_files() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let deep = temp_dir.path().join("sub").join("x").join("y");
    fs::create_dir_all(&deep)?;
    File::create(deep.join("deep.rs"))?;
    File::create(temp_dir.path().join("sub2").join("README"))?;

    let walker = TreeWalker::new(HostFs);
    let mut sets = Vec::new();
    for order in [
        TraversalOrder::BreadthFirst,
        TraversalOrder::DepthFirst,
        TraversalOrder::Recursive,
    ] {
        let outcome = walker.walk(temp_dir.path(), order).unwrap();
        assert_eq!(outcome.files.len(), 4);
        sets.push(outcome.files.into_iter().collect::<BTreeSet<PathBuf>>());
    }

    assert_eq!(sets[0], sets[1]);
    assert_eq!(sets[1], sets[2]);
    Ok(())
}

#[test]
fn test_empty_directory() -> io::Result<()> {
    let temp_dir = tempdir()?;
    fs::create_dir(temp_dir.path().join("nothing"))?;

    let outcome = scanner().run(&ScanOptions::new(temp_dir.path())).unwrap();
    assert!(outcome.records.is_empty());
    assert!(outcome.errors.is_empty());
    Ok(())
}

#[test]
fn test_missing_root_is_invalid() {
    let err = scanner()
        .run(&ScanOptions::new("/definitely/not/a/real/root"))
        .unwrap_err();
    assert!(matches!(err, crate::ScanError::InvalidRoot { .. }));
}

#[test]
fn test_modified_timestamp_filter() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    let pinned = UNIX_EPOCH + Duration::from_secs(1_600_000_000);
    set_file_mtime(
        temp_dir.path().join("a.txt"),
        FileTime::from_unix_time(1_600_000_000, 0),
    )?;

    let options = ScanOptions {
        predicate: Some(Predicate::Timestamp {
            field: TimeField::Modified,
            at: pinned,
        }),
        ..ScanOptions::new(temp_dir.path())
    };
    let outcome = scanner().run(&options).unwrap();

    assert_eq!(names(&outcome.records), vec!["a.txt"]);
    Ok(())
}

#[test]
fn test_creation_time_is_always_present() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;

    let outcome = scanner().run(&ScanOptions::new(temp_dir.path())).unwrap();
    for record in &outcome.records {
        assert!(record.created() > UNIX_EPOCH);
    }
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_symlinks_are_not_reported_or_followed() -> io::Result<()> {
    let temp_dir = setup_test_directory()?;
    std::os::unix::fs::symlink(
        temp_dir.path().join("a.txt"),
        temp_dir.path().join("link.txt"),
    )?;
    // A link back to the root would loop forever if followed
    std::os::unix::fs::symlink(temp_dir.path(), temp_dir.path().join("sub2").join("loop"))?;

    let outcome = scanner().run(&ScanOptions::new(temp_dir.path())).unwrap();
    let mut found = names(&outcome.records);
    found.sort();
    assert_eq!(found, vec!["a.txt", "b.log"]);
    Ok(())
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory() -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = setup_test_directory()?;
    let locked = temp_dir.path().join("locked");
    fs::create_dir(&locked)?;
    File::create(locked.join("secret.txt"))?;
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000))?;

    // Privileged users read through the mode bits; nothing to observe then
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;
        return Ok(());
    }

    let outcome = scanner().run(&ScanOptions::new(temp_dir.path())).unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755))?;

    assert_eq!(outcome.errors.len(), 1);
    assert_eq!(outcome.errors[0].path(), Some(Path::new(&locked)));
    let mut found = names(&outcome.records);
    found.sort();
    assert_eq!(found, vec!["a.txt", "b.log"]);
    Ok(())
}
