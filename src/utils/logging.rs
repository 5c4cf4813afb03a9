// Tue Jan 13 2026 - Alex

use crate::config::Config;
use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};

pub struct LoggingUtils;

impl LoggingUtils {
    /// Installs the coloured stderr logger. Returns false when a logger is
    /// already installed, in which case only the max level is updated.
    pub fn init_logger(level: LevelFilter, use_color: bool) -> bool {
        let logger = Box::new(ColoredLogger::new(level, use_color));
        let installed = log::set_boxed_logger(logger).is_ok();
        log::set_max_level(level);
        installed
    }

    pub fn parse_level(s: &str) -> Option<LevelFilter> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LevelFilter::Error),
            "warn" | "warning" => Some(LevelFilter::Warn),
            "info" => Some(LevelFilter::Info),
            "debug" => Some(LevelFilter::Debug),
            "trace" => Some(LevelFilter::Trace),
            "off" => Some(LevelFilter::Off),
            _ => None,
        }
    }

    /// Like [`LoggingUtils::parse_level`], falling back to `Info`.
    pub fn level_from_str(s: &str) -> LevelFilter {
        Self::parse_level(s).unwrap_or(LevelFilter::Info)
    }

    pub fn level_from_verbosity(verbosity: u8) -> LevelFilter {
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

pub struct ColoredLogger {
    level: LevelFilter,
    use_color: bool,
}

impl ColoredLogger {
    pub fn new(level: LevelFilter, use_color: bool) -> Self {
        Self {
            level,
            use_color,
        }
    }

    fn format_level(&self, level: Level) -> ColoredString {
        match level {
            Level::Error => "ERROR".red().bold(),
            Level::Warn => "WARN ".yellow().bold(),
            Level::Info => "INFO ".green().bold(),
            Level::Debug => "DEBUG".blue().bold(),
            Level::Trace => "TRACE".magenta().bold(),
        }
    }

    pub fn format(&self, record: &Record) -> String {
        let color = self.use_color;

        let level_str = if color {
            self.format_level(record.level()).to_string()
        } else {
            format!("{:5}", record.level())
        };

        let target = if record.target().is_empty() {
            String::new()
        } else if color {
            format!("[{}]", record.target()).dimmed().to_string()
        } else {
            format!("[{}]", record.target())
        };

        format!("{} {} {}", level_str, target, record.args())
    }
}

impl Log for ColoredLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("{}", self.format(record));
        }
    }

    fn flush(&self) {}
}

/// Verbosity from the command line wins over the configured level.
pub fn init_logger(verbosity: u8, config: &Config) -> bool {
    let level = if verbosity > 0 {
        LoggingUtils::level_from_verbosity(verbosity)
    } else {
        config.log_filter()
    };
    LoggingUtils::init_logger(level, config.color)
}

/// Installs `env_logger` reading `RUST_LOG`, for embedders that prefer it.
pub fn init_from_env() -> bool {
    env_logger::Builder::from_default_env().try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_str() {
        assert_eq!(LoggingUtils::level_from_str("WARNING"), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_str(" trace "), LevelFilter::Trace);
        assert_eq!(LoggingUtils::level_from_str("off"), LevelFilter::Off);
        assert_eq!(LoggingUtils::level_from_str("chatty"), LevelFilter::Info);
        assert_eq!(LoggingUtils::parse_level("chatty"), None);
    }

    #[test]
    fn test_level_from_verbosity() {
        assert_eq!(LoggingUtils::level_from_verbosity(0), LevelFilter::Warn);
        assert_eq!(LoggingUtils::level_from_verbosity(2), LevelFilter::Debug);
        assert_eq!(LoggingUtils::level_from_verbosity(9), LevelFilter::Trace);
    }

    #[test]
    fn test_plain_format() {
        let logger = ColoredLogger::new(LevelFilter::Debug, false);
        let line = logger.format(
            &Record::builder()
                .level(Level::Warn)
                .target("cor::error")
                .args(format_args!("frame {}", 3))
                .build(),
        );
        assert_eq!(line, "WARN  [cor::error] frame 3");
    }

    #[test]
    fn test_enabled_respects_level() {
        let logger = ColoredLogger::new(LevelFilter::Info, false);
        let debug = Metadata::builder().level(Level::Debug).build();
        let error = Metadata::builder().level(Level::Error).build();

        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&error));
    }
}
