use log::{LevelFilter, Log, Metadata, Record};
use std::io::Write;
use std::time::Instant;

/// Environment variable holding the log level (`error`, `warn`, `info`,
/// `debug`, `trace` or `off`).
pub const LOG_ENV: &str = "CSHELL_LOG";

/// Writes diagnostics to stderr so they never interleave with the output
/// that commands relay on stdout.
struct StderrLogger {
    filter: LevelFilter,
    start: Instant,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.filter
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f64();
        let _ = writeln!(
            std::io::stderr().lock(),
            "[{elapsed:.3}s] [{}] {}: {}",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Parse a level name; unknown or missing values turn logging off.
pub fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(LevelFilter::Off)
}

/// Install the global logger, with the level read from [`LOG_ENV`].
///
/// Calling it again is harmless: the first logger stays installed.
pub fn init() {
    let filter = level_from(std::env::var(LOG_ENV).ok().as_deref());
    let logger = StderrLogger {
        filter,
        start: Instant::now(),
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(filter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parsing() {
        assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from(Some(" WARN ")), LevelFilter::Warn);
        assert_eq!(level_from(Some("loud")), LevelFilter::Off);
        assert_eq!(level_from(None), LevelFilter::Off);
    }
}
