/*!
 * Record predicates
 */

use std::time::SystemTime;

use clap::ValueEnum;
use serde::Serialize;
use strum::Display;

use crate::extract::extension_of;
use crate::types::{FileRecord, ListedEntry};

/// Which timestamp a [`Predicate::Timestamp`] compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, ValueEnum, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TimeField {
    #[default]
    Created,
    Modified,
}

/// A membership test for filtered results
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Name contains the text, ignoring case
    Substring(String),
    /// Extension equals the text, ignoring case
    Extension(String),
    /// Timestamp equals the value exactly, at host precision.
    ///
    /// Exact equality against a low precision input almost never holds, so
    /// this is rarely useful as a search.
    Timestamp { field: TimeField, at: SystemTime },
}

impl Predicate {
    /// Evaluate against an extracted record
    pub fn matches(&self, record: &FileRecord) -> bool {
        match self {
            Self::Substring(partial) => contains_folded(record.name(), partial),
            Self::Extension(ext) => eq_folded(record.extension(), ext),
            Self::Timestamp { field, at } => {
                let value = match field {
                    TimeField::Created => record.created(),
                    TimeField::Modified => record.modified(),
                };
                value == *at
            }
        }
    }

    /// Evaluate against a raw listing entry, before any stat.
    ///
    /// Directories never match an extension and timestamp predicates never
    /// match here since no metadata has been read yet.
    pub fn matches_entry(&self, entry: &ListedEntry) -> bool {
        match self {
            Self::Substring(partial) => contains_folded(&entry.name, partial),
            Self::Extension(ext) => !entry.is_dir() && eq_folded(extension_of(&entry.name), ext),
            Self::Timestamp { .. } => false,
        }
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn eq_folded(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Keep the records matching `predicate`, in their original order
pub fn filter(records: Vec<FileRecord>, predicate: &Predicate) -> Vec<FileRecord> {
    records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect()
}
