/*!
 * Stderr logger for the `log` facade
 */

use std::sync::OnceLock;

use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Environment variable holding the log level (`error` .. `trace`)
pub const LOG_LEVEL_ENV: &str = "FILESCAN_LOG";

struct Logger {
    level: Level,
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            eprintln!(
                "{} {} [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

/// Parse a level name; unknown names and `off` fall back to `Warn`
fn parse_level(value: Option<&str>) -> Level {
    value
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .and_then(|filter| filter.to_level())
        .unwrap_or(Level::Warn)
}

/// Level for `-v` repetitions; zero defers to the environment
fn level_for(verbosity: u8, env_value: Option<&str>) -> Level {
    match verbosity {
        0 => parse_level(env_value),
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

/// Install the logger. Later calls keep the first level.
pub fn init(verbosity: u8) -> Result<(), SetLoggerError> {
    static LOGGER: OnceLock<Logger> = OnceLock::new();

    let env_value = std::env::var(LOG_LEVEL_ENV).ok();
    let level = level_for(verbosity, env_value.as_deref());
    let init_call = LOGGER.get().is_none();
    let logger = LOGGER.get_or_init(|| Logger { level });

    if init_call {
        log::set_logger(logger)?;
        log::set_max_level(logger.level.to_level_filter());
    }

    Ok(())
}
