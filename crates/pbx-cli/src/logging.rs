//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! Library crates only emit `tracing` events; this module is the one
//! place a subscriber is installed.

use tracing::Level;
use tracing_subscriber::{
    EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable output.
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
}

/// Configuration for logging behavior.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level filter.
    pub level: Level,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(config: &LogConfig) {
    let filter = build_env_filter(config.level);
    match config.format {
        LogFormat::Compact => {
            let layer = fmt::layer().compact().without_time().with_target(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
        LogFormat::Pretty => {
            let layer = fmt::layer().without_time().with_target(false);
            tracing_subscriber::registry().with(filter).with(layer).init();
        }
    }
}

/// Build an `EnvFilter` from the given level; `RUST_LOG` overrides it.
fn build_env_filter(level: Level) -> EnvFilter {
    let level_str = level.as_str().to_lowercase();
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "warn,pbx_cli={level},pbx_proj={level},pbx_plist={level},\
             pbx_setting={level},pbx_util={level}",
            level = level_str
        ))
    })
}
