/*!
 * Record ordering
 */

use std::cmp::Ordering;

use clap::ValueEnum;
use serde::Serialize;
use strum::{Display, EnumString};

use crate::types::FileRecord;

/// Key to order records by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, ValueEnum, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Byte size
    Size,
    /// Creation time
    Created,
    /// Modification time
    Modified,
    /// Extension, ignoring case
    Extension,
}

/// Direction of a sort
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    /// The exact reverse of the ascending result
    Descending,
}

impl SortKey {
    fn compare(self, a: &FileRecord, b: &FileRecord) -> Ordering {
        match self {
            Self::Size => a.size().cmp(&b.size()),
            Self::Created => a.created().cmp(&b.created()),
            Self::Modified => a.modified().cmp(&b.modified()),
            Self::Extension => a
                .extension()
                .to_lowercase()
                .cmp(&b.extension().to_lowercase()),
        }
    }
}

/// Return the records ordered by `key`.
///
/// Ascending order is stable: records with equal keys keep their input order.
pub fn sort(records: &[FileRecord], key: SortKey, order: SortOrder) -> Vec<FileRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| key.compare(a, b));
    if order == SortOrder::Descending {
        sorted.reverse();
    }
    sorted
}
