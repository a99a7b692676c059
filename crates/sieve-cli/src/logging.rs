//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Logs go to stderr so report output on stdout stays clean. `RUST_LOG`
//! overrides the level picked from `-v`/`-q`.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    /// Whether to use ANSI colors in output.
    pub with_ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            with_ansi: true,
        }
    }
}

impl LogConfig {
    /// Create a `LogConfig` from CLI flags.
    ///
    /// - `-q`: errors only
    /// - none: warnings
    /// - `-v`: info
    /// - `-vv`: debug
    /// - `-vvv`: trace
    #[must_use]
    pub fn from_verbosity(verbosity: u8, quiet: bool) -> Self {
        let level = if quiet {
            Level::ERROR
        } else {
            match verbosity {
                0 => Level::WARN,
                1 => Level::INFO,
                2 => Level::DEBUG,
                _ => Level::TRACE,
            }
        };
        Self {
            level,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(config.with_ansi)
        .with_target(false)
        .without_time();

    tracing_subscriber::registry()
        .with(build_env_filter(config.level))
        .with(layer)
        .init();
}

/// `RUST_LOG` wins when set; otherwise only sieve crates log at `level`.
fn build_env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = level.as_str().to_lowercase();
        EnvFilter::new(format!("warn,sieve={level},sieve_cli={level}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_verbosity() {
        assert_eq!(LogConfig::from_verbosity(0, false).level, Level::WARN);
        assert_eq!(LogConfig::from_verbosity(1, false).level, Level::INFO);
        assert_eq!(LogConfig::from_verbosity(2, false).level, Level::DEBUG);
        assert_eq!(LogConfig::from_verbosity(7, false).level, Level::TRACE);
    }

    #[test]
    fn test_quiet_wins() {
        assert_eq!(LogConfig::from_verbosity(3, true).level, Level::ERROR);
    }
}
