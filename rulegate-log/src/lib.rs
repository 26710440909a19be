//! Rulegate Logging
//!
//! Small, environment-controlled logging used across the rulegate crates.
//! Records are written to stderr as JSON lines (default) or a compact
//! single-line format, or forwarded to `tracing` when the `tracing` feature
//! is enabled.
//!
//! # Usage
//!
//! ```rust
//! use rulegate_log::{debug, info, trace, warn};
//!
//! debug!("Building rule set");
//! info!("Loaded {} rules", 14);
//! trace!(target: "rulegate::validator", "Evaluating {}", "max:5");
//! warn!("Unknown rule");
//! ```
//!
//! # Environment Variables
//!
//! - `RULEGATE_DEBUG=1` - Lower the level to `debug`
//! - `RULEGATE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level (default `warn`)
//! - `RULEGATE_LOG_FORMAT=json|compact` - Set output format (default `json`)

use once_cell::sync::Lazy;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

// ============================================================================
// Levels and formats
// ============================================================================

/// Log level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    /// Disables all output
    Off = 5,
}

impl Level {
    /// Upper-case level name as written in records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            _ => Level::Off,
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(Level::Trace),
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            "off" | "none" => Ok(Level::Off),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for stderr records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// One JSON object per line
    Json,
    /// `HH:MM:SS L target: message`
    Compact,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Format::Json),
            "compact" => Ok(Format::Compact),
            other => Err(format!("unknown log format: {}", other)),
        }
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Logging configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Minimum level written
    pub level: Level,
    /// Output format
    pub format: Format,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Warn,
            format: Format::Json,
        }
    }
}

impl LogConfig {
    /// Read `RULEGATE_DEBUG`, `RULEGATE_LOG_LEVEL` and `RULEGATE_LOG_FORMAT`.
    ///
    /// Unparseable values fall back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`LogConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let debug = lookup("RULEGATE_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let level = lookup("RULEGATE_LOG_LEVEL")
            .and_then(|v| v.parse().ok())
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = lookup("RULEGATE_LOG_FORMAT")
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.format);

        Self { level, format }
    }
}

/// Runtime level override; `UNSET` until the environment has been read.
static LEVEL: AtomicU8 = AtomicU8::new(UNSET);
const UNSET: u8 = u8::MAX;

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    let _ = LEVEL.compare_exchange(
        UNSET,
        config.level as u8,
        Ordering::SeqCst,
        Ordering::SeqCst,
    );
    config
});

// ============================================================================
// Public API
// ============================================================================

/// Eagerly read the environment configuration.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Global configuration as read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Current minimum level.
pub fn current_level() -> Level {
    init();
    Level::from_u8(LEVEL.load(Ordering::Relaxed))
}

/// Override the minimum level at runtime.
pub fn set_level(level: Level) {
    init();
    LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Whether records at `level` are written.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    level != Level::Off && level >= current_level()
}

/// Write one record. Used by the macros.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_level_enabled(level) {
        return;
    }
    emit(level, target, message);
}

#[cfg(feature = "tracing")]
fn emit(level: Level, target: &str, message: &str) {
    match level {
        Level::Trace => tracing::trace!(log.target = target, "{}", message),
        Level::Debug => tracing::debug!(log.target = target, "{}", message),
        Level::Info => tracing::info!(log.target = target, "{}", message),
        Level::Warn => tracing::warn!(log.target = target, "{}", message),
        Level::Error => tracing::error!(log.target = target, "{}", message),
        Level::Off => {}
    }
}

#[cfg(not(feature = "tracing"))]
fn emit(level: Level, target: &str, message: &str) {
    let line = match config().format {
        Format::Json => render_json(level, target, message),
        Format::Compact => render_compact(level, target, message),
    };
    eprintln!("{}", line);
}

/// Render a record as a single JSON object.
#[cfg(feature = "json")]
pub fn render_json(level: Level, target: &str, message: &str) -> String {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Record<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let record = Record {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    serde_json::to_string(&record).unwrap_or_else(|_| render_compact(level, target, message))
}

/// Without `serde_json` the JSON format degrades to the compact one.
#[cfg(not(feature = "json"))]
pub fn render_json(level: Level, target: &str, message: &str) -> String {
    render_compact(level, target, message)
}

/// Render a record in the compact single-line format.
pub fn render_compact(level: Level, target: &str, message: &str) -> String {
    let initial = level.as_str().chars().next().unwrap_or('?');
    let time = chrono::Local::now().format("%H:%M:%S");
    if target.is_empty() {
        format!("{} {} {}", time, initial, message)
    } else {
        format!("{} {} {}: {}", time, initial, target, message)
    }
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __log {
    ($level:expr, target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, $target, &format!($($arg)+));
        }
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::__log!($level, target: module_path!(), $($arg)+)
    };
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Trace, $($arg)+) };
}

/// Log a debug message.
///
/// ```rust
/// use rulegate_log::debug;
///
/// let attribute = "email";
/// debug!("Evaluating {}", attribute);
/// debug!(target: "rulegate::rules", "Parsed {} tokens", 3);
/// ```
#[macro_export]
macro_rules! debug {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Debug, $($arg)+) };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Info, $($arg)+) };
}

/// Log a warning message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Warn, $($arg)+) };
}

/// Log an error message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)+) => { $crate::__log!($crate::Level::Error, $($arg)+) };
}
