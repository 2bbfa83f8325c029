/*!
 * Reporting functionality for filescan
 *
 * Renders scan results as console tables (via tabled), JSON, or the plain
 * per-file listing.
 */

use std::fmt::Write as _;
use std::path::Path;

use clap::ValueEnum;
use serde::Serialize;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::error::Result;
use crate::scanner::ScanOutcome;
use crate::types::FileRecord;
use crate::utils::{format_file_size, format_timestamp, relative_path, rfc3339_timestamp};
use crate::walker::TraversalOrder;

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Console table output
    #[value(name = "table")]
    ConsoleTable,
    /// Pretty-printed JSON
    Json,
    /// One block of lines per file
    Plain,
}

/// A finished scan together with how it was run
#[derive(Debug)]
pub struct ScanReport<'a> {
    /// Scanned directory
    pub root: &'a Path,
    /// Expansion order used
    pub order: TraversalOrder,
    /// Scan result
    pub outcome: &'a ScanOutcome,
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    path: String,
    name: &'a str,
    extension: &'a str,
    size: u64,
    created: String,
    modified: String,
    attributes: u32,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    root: String,
    order: TraversalOrder,
    elapsed_ms: u128,
    total_size: u64,
    files: Vec<JsonRecord<'a>>,
    errors: Vec<String>,
}

/// Report generator for scan results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &ScanReport) -> Result<String> {
        match self.format {
            ReportFormat::ConsoleTable => Ok(self.generate_console_report(report)),
            ReportFormat::Json => self.generate_json_report(report),
            ReportFormat::Plain => Ok(self.generate_plain_report(report)),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &ScanReport) -> Result<()> {
        println!("{}", self.generate_report(report)?);
        Ok(())
    }

    fn create_files_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct FileRow {
            #[tabled(rename = "File Path")]
            path: String,

            #[tabled(rename = "Ext")]
            extension: String,

            #[tabled(rename = "Size")]
            size: String,

            #[tabled(rename = "Created")]
            created: String,

            #[tabled(rename = "Modified")]
            modified: String,
        }

        let rows = report.outcome.records.iter().map(|record| FileRow {
            path: relative_path(report.root, record.path()),
            extension: record.extension().to_string(),
            size: format_file_size(record.size()),
            created: format_timestamp(record.created()),
            modified: format_timestamp(record.modified()),
        });

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn create_summary_table(&self, report: &ScanReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: &'static str,

            #[tabled(rename = "Value")]
            value: String,
        }

        let outcome = report.outcome;
        let rows = vec![
            SummaryRow {
                key: "Root",
                value: report.root.display().to_string(),
            },
            SummaryRow {
                key: "Order",
                value: report.order.to_string(),
            },
            SummaryRow {
                key: "Files",
                value: outcome.records.len().to_string(),
            },
            SummaryRow {
                key: "Total Size",
                value: format_file_size(outcome.total_size()),
            },
            SummaryRow {
                key: "Errors",
                value: outcome.errors.len().to_string(),
            },
            SummaryRow {
                key: "Process Time",
                value: format!("{:.4?}", outcome.elapsed),
            },
        ];

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        table.to_string()
    }

    fn generate_console_report(&self, report: &ScanReport) -> String {
        let mut out = String::new();
        if report.outcome.records.is_empty() {
            out.push_str("No files found\n");
        } else {
            let _ = writeln!(out, "FILES\n{}", self.create_files_table(report));
        }
        let _ = write!(out, "\nSUMMARY\n{}", self.create_summary_table(report));
        self.append_errors(&mut out, report);
        out
    }

    fn generate_json_report(&self, report: &ScanReport) -> Result<String> {
        let files = report
            .outcome
            .records
            .iter()
            .map(|record: &FileRecord| JsonRecord {
                path: record.path().to_string_lossy().to_string(),
                name: record.name(),
                extension: record.extension(),
                size: record.size(),
                created: rfc3339_timestamp(record.created()),
                modified: rfc3339_timestamp(record.modified()),
                attributes: record.attributes(),
            })
            .collect();

        let json = JsonReport {
            root: report.root.to_string_lossy().to_string(),
            order: report.order,
            elapsed_ms: report.outcome.elapsed.as_millis(),
            total_size: report.outcome.total_size(),
            files,
            errors: report.outcome.errors.iter().map(|e| e.to_string()).collect(),
        };

        Ok(serde_json::to_string_pretty(&json)?)
    }

    fn generate_plain_report(&self, report: &ScanReport) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Execution Time: {} milliseconds",
            report.outcome.elapsed.as_millis()
        );
        let _ = writeln!(out, "\n{} order:", report.order);

        for record in &report.outcome.records {
            let _ = writeln!(out, "File: {}", record.name());
            let _ = writeln!(out, "Extension: {}", record.extension());
            let _ = writeln!(out, "Size: {} bytes", record.size());
            let _ = writeln!(out, "Creation Time: {}", format_timestamp(record.created()));
            let _ = writeln!(out, "Modification Time: {}", format_timestamp(record.modified()));
            out.push_str("---------------------------\n");
        }

        self.append_errors(&mut out, report);
        out
    }

    fn append_errors(&self, out: &mut String, report: &ScanReport) {
        if report.outcome.errors.is_empty() {
            return;
        }
        let _ = writeln!(out, "\n{} error(s):", report.outcome.errors.len());
        for err in &report.outcome.errors {
            let _ = writeln!(out, "  {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanError;
    use crate::types::EntryMetadata;
    use std::io;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    fn outcome() -> ScanOutcome {
        let record = FileRecord::new(
            PathBuf::from("/r/sub/b.log"),
            "b.log".into(),
            EntryMetadata {
                size: 5,
                created: UNIX_EPOCH,
                modified: UNIX_EPOCH + Duration::from_secs(1),
                attributes: 0o644,
            },
        );
        ScanOutcome {
            records: vec![record],
            errors: vec![ScanError::DirectoryUnavailable {
                path: PathBuf::from("/r/locked"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
            }],
            elapsed: Duration::from_millis(12),
        }
    }

    fn render(format: ReportFormat, outcome: &ScanOutcome) -> String {
        let report = ScanReport {
            root: Path::new("/r"),
            order: TraversalOrder::DepthFirst,
            outcome,
        };
        Reporter::new(format).generate_report(&report).unwrap()
    }

    #[test]
    fn test_console_report() {
        let text = render(ReportFormat::ConsoleTable, &outcome());
        assert!(text.contains("sub/b.log"));
        assert!(text.contains("5 bytes"));
        assert!(text.contains("depth-first"));
        assert!(text.contains("/r/locked"));
    }

    #[test]
    fn test_plain_report_lists_fields() {
        let text = render(ReportFormat::Plain, &outcome());
        assert!(text.starts_with("Execution Time: 12 milliseconds"));
        assert!(text.contains("File: b.log\nExtension: log\nSize: 5 bytes\n"));
        assert!(text.contains("---------------------------"));
        assert!(text.contains("1 error(s):"));
    }

    #[test]
    fn test_json_report_parses() {
        let text = render(ReportFormat::Json, &outcome());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["order"], "depth-first");
        assert_eq!(value["total_size"], 5);
        assert_eq!(value["files"][0]["extension"], "log");
        assert_eq!(value["errors"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_console_report() {
        let empty = ScanOutcome {
            records: Vec::new(),
            errors: Vec::new(),
            elapsed: Duration::ZERO,
        };
        let text = render(ReportFormat::ConsoleTable, &empty);
        assert!(text.contains("No files found"));
        assert!(!text.contains("error(s)"));
    }
}
