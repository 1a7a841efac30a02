#![cfg(feature = "std")]

use std::env;

use log::{LevelFilter, Metadata, Record};

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "BATTLESHIP_LOG";

struct StderrLogger;

impl log::Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{} [{}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn parse_level(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|lvl| lvl.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// Install the logger with the level from `BATTLESHIP_LOG`, defaulting to
/// `info`. Output goes to stderr so it never mixes with rendered boards.
pub fn init_logging() {
    let level = parse_level(env::var(LOG_ENV).ok().as_deref());
    let _ = log::set_logger(&LOGGER).map(|()| log::set_max_level(level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(parse_level(Some("debug")), LevelFilter::Debug);
        assert_eq!(parse_level(Some("WARN")), LevelFilter::Warn);
        assert_eq!(parse_level(Some("loud")), LevelFilter::Info);
        assert_eq!(parse_level(None), LevelFilter::Info);
    }
}
