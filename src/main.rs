/*!
 * Command-line interface for filescan
 */

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use clap_complete::generate;
use indicatif::{ProgressBar, ProgressStyle};

use filescan::config::{Args, Config};
use filescan::fs::HostFs;
use filescan::logging;
use filescan::report::{ReportFormat, Reporter, ScanReport};
use filescan::scanner::Scanner;

fn main() -> filescan::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    if let Some(shell) = args.generate {
        let mut cmd = Args::command();
        generate(shell, &mut cmd, "filescan", &mut io::stdout());
        return Ok(());
    }

    let config = Config::from_args(args)?;

    if let Err(e) = logging::init(config.verbosity) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    config.validate()?;

    // Spinner only for the interactive table output
    let progress = if config.format == ReportFormat::ConsoleTable {
        ProgressBar::new_spinner()
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {pos} files {msg}") {
        progress.set_style(style);
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_message(format!("scanning {}", config.target_dir.display()));

    let scanner = Scanner::new(HostFs, Arc::new(progress.clone()));
    let outcome = scanner.run(&config.scan_options())?;

    progress.finish_and_clear();

    let report = ScanReport {
        root: &config.target_dir,
        order: config.order,
        outcome: &outcome,
    };
    Reporter::new(config.format).print_report(&report)?;

    Ok(())
}
