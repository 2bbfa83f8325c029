/*!
 * Configuration handling for filescan
 */

use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use clap::{ArgAction, ArgGroup, Parser};
use clap_complete::Shell;

use crate::error::Result;
use crate::filter::{Predicate, TimeField};
use crate::report::ReportFormat;
use crate::scanner::ScanOptions;
use crate::sort::{SortKey, SortOrder};
use crate::walker::TraversalOrder;
use crate::{bail, ensure};

/// Local time format accepted for timestamp filters, also used for display
pub const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Command-line arguments for filescan
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "filescan",
    version = env!("CARGO_PKG_VERSION"),
    about = "List, filter and sort the files below a directory",
    long_about = "Walks a directory tree and reports name, extension, size, creation and modification time of every regular file, optionally filtered by one predicate and sorted by one key."
)]
#[clap(group(ArgGroup::new("filter").multiple(false)))]
pub struct Args {
    /// Directory to scan
    #[clap(default_value = ".")]
    pub directory_path: String,

    /// Order in which directories are expanded
    #[clap(long, value_enum, default_value_t = TraversalOrder::default())]
    pub order: TraversalOrder,

    /// Keep files whose name contains this text (case-insensitive)
    #[clap(long, group = "filter")]
    pub name: Option<String>,

    /// Keep files with this extension (case-insensitive, without the dot)
    #[clap(long, group = "filter")]
    pub ext: Option<String>,

    /// Keep files created exactly at this time ("YYYY/MM/DD HH:MM:SS" or RFC 3339)
    #[clap(long, group = "filter")]
    pub created: Option<String>,

    /// Keep files modified exactly at this time ("YYYY/MM/DD HH:MM:SS" or RFC 3339)
    #[clap(long, group = "filter")]
    pub modified: Option<String>,

    /// Sort the results by this key
    #[clap(long, value_enum)]
    pub sort: Option<SortKey>,

    /// Reverse the sort order
    #[clap(long, requires = "sort")]
    pub descending: bool,

    /// Output format
    #[clap(long, value_enum, default_value_t = ReportFormat::ConsoleTable)]
    pub format: ReportFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Directory to scan
    pub target_dir: PathBuf,

    /// Directory expansion order
    pub order: TraversalOrder,

    /// Active filter, if any
    pub predicate: Option<Predicate>,

    /// Active sort, if any
    pub sort: Option<(SortKey, SortOrder)>,

    /// Output format
    pub format: ReportFormat,

    /// Number of `-v` flags
    pub verbosity: u8,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let predicate = if let Some(name) = args.name {
            Some(Predicate::Substring(name))
        } else if let Some(ext) = args.ext {
            Some(Predicate::Extension(ext.trim_start_matches('.').to_string()))
        } else if let Some(created) = args.created {
            Some(Predicate::Timestamp {
                field: TimeField::Created,
                at: parse_timestamp(&created)?,
            })
        } else if let Some(modified) = args.modified {
            Some(Predicate::Timestamp {
                field: TimeField::Modified,
                at: parse_timestamp(&modified)?,
            })
        } else {
            None
        };

        let order = if args.descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };

        Ok(Self {
            target_dir: PathBuf::from(args.directory_path),
            order: args.order,
            predicate,
            sort: args.sort.map(|key| (key, order)),
            format: args.format,
            verbosity: args.verbose,
        })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.target_dir.is_dir(),
            Config,
            "Target directory not found: {}",
            self.target_dir.display()
        );
        Ok(())
    }

    /// Options for a scan of the configured directory
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            root: self.target_dir.clone(),
            order: self.order,
            predicate: self.predicate.clone(),
            sort: self.sort,
        }
    }
}

/// Parse a timestamp given as local `YYYY/MM/DD HH:MM:SS` or RFC 3339
pub fn parse_timestamp(value: &str) -> Result<SystemTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(SystemTime::from(dt));
    }

    let naive = match NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT) {
        Ok(naive) => naive,
        Err(e) => bail!(InvalidArgument, "Invalid timestamp {:?}: {}", value, e),
    };
    match Local.from_local_datetime(&naive).single() {
        Some(dt) => Ok(SystemTime::from(dt)),
        None => bail!(
            InvalidArgument,
            "Ambiguous or skipped local time: {:?}",
            value
        ),
    }
}
