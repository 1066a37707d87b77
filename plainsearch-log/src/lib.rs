//! Logging for plainsearch.
//!
//! Output goes to stderr and is controlled entirely through the environment,
//! so builders and pipelines can log without the caller wiring a backend.
//!
//! ```rust
//! use plainsearch_log::{debug, trace};
//!
//! let batch = 3;
//! trace!("Emitting bulk batch {}", batch);
//! debug!(target: "plainsearch::bulk", "Pipeline exhausted");
//! ```
//!
//! # Environment Variables
//!
//! - `PLAINSEARCH_DEBUG=1` - Enable debug logging
//! - `PLAINSEARCH_LOG_LEVEL=trace|debug|info|warn|error|off` - Minimum level (default `warn`)
//! - `PLAINSEARCH_LOG_FORMAT=pretty|compact|json` - Output format (default `compact`)

use once_cell::sync::Lazy;
use std::env;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

// ============================================================================
// Levels and formats
// ============================================================================

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    /// Per-fragment and per-batch detail
    Trace = 0,
    /// Request and pipeline lifecycle
    Debug = 1,
    /// Informational
    Info = 2,
    /// Warnings
    Warn = 3,
    /// Errors
    Error = 4,
    /// Nothing is logged
    Off = 5,
}

impl Level {
    /// Parse a level name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::Trace),
            "debug" => Some(Level::Debug),
            "info" => Some(Level::Info),
            "warn" | "warning" => Some(Level::Warn),
            "error" => Some(Level::Error),
            "off" | "none" => Some(Level::Off),
            _ => None,
        }
    }

    /// Upper-case level name.
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

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Full timestamp, padded level and bracketed target
    Pretty,
    /// Short single-line format
    Compact,
    /// One JSON object per line
    Json,
}

impl Format {
    /// Parse a format name, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Some(Format::Pretty),
            "compact" => Some(Format::Compact),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

// ============================================================================
// Global state
// ============================================================================

static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(LogConfig::from_env);

/// Logging configuration, read once from the environment.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// `PLAINSEARCH_DEBUG` was set
    pub debug: bool,
    /// Minimum level
    pub level: Level,
    /// Output format
    pub format: Format,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            debug: false,
            level: Level::Warn,
            format: Format::Compact,
        }
    }
}

impl LogConfig {
    /// Read `PLAINSEARCH_*` variables and publish the level to the global atomics.
    pub fn from_env() -> Self {
        let debug = env::var("PLAINSEARCH_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let level = env::var("PLAINSEARCH_LOG_LEVEL")
            .ok()
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { Level::Warn });

        let format = env::var("PLAINSEARCH_LOG_FORMAT")
            .ok()
            .and_then(|s| Format::parse(&s))
            .unwrap_or(Format::Compact);

        DEBUG_ENABLED.store(debug, Ordering::SeqCst);
        LOG_LEVEL.store(level as u8, Ordering::SeqCst);

        Self {
            debug,
            level,
            format,
        }
    }
}

// ============================================================================
// Public API
// ============================================================================

/// Force the environment to be read now instead of on the first log call.
pub fn init() {
    Lazy::force(&CONFIG);
}

/// Whether debug mode is on.
#[inline]
pub fn is_debug_enabled() -> bool {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.load(Ordering::Relaxed)
}

/// Whether a message at `level` is emitted: the level passes the minimum, or
/// it is `Debug` and debug mode is on.
#[inline]
pub fn is_enabled(level: Level) -> bool {
    let debug = is_debug_enabled();
    passes(level, current_level(), debug)
}

fn passes(level: Level, minimum: Level, debug: bool) -> bool {
    level != Level::Off && (level >= minimum || (debug && level == Level::Debug))
}

/// Whether messages at `level` are emitted.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    Lazy::force(&CONFIG);
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

/// Current minimum level.
pub fn current_level() -> Level {
    Level::from_u8(LOG_LEVEL.load(Ordering::Relaxed))
}

/// Change the minimum level at runtime.
pub fn set_level(level: Level) {
    Lazy::force(&CONFIG);
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
}

/// Toggle debug mode at runtime. Turning it on lowers the level to `Debug`.
pub fn set_debug(enabled: bool) {
    Lazy::force(&CONFIG);
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    if enabled && current_level() > Level::Debug {
        set_level(Level::Debug);
    }
}

/// The configuration read from the environment.
pub fn config() -> &'static LogConfig {
    &CONFIG
}

/// Emit one line. Used by the macros.
#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str) {
    if !is_enabled(level) {
        return;
    }

    match config().format {
        Format::Pretty => {
            let now = chrono::Local::now();
            let _ = writeln!(
                std::io::stderr().lock(),
                "{} {:5} [{}] {}",
                now.format("%Y-%m-%d %H:%M:%S%.3f"),
                level.as_str(),
                target,
                message
            );
        }
        Format::Compact => {
            let now = chrono::Local::now();
            let initial = level.as_str().chars().next().unwrap_or('?');
            let _ = writeln!(
                std::io::stderr().lock(),
                "{} {} {}: {}",
                now.format("%H:%M:%S"),
                initial,
                target,
                message
            );
        }
        Format::Json => log_json(level, target, message),
    }
}

#[cfg(feature = "json")]
fn log_json(level: Level, target: &str, message: &str) {
    use serde::Serialize;

    #[derive(Serialize)]
    struct Line<'a> {
        timestamp: String,
        level: &'a str,
        target: &'a str,
        message: &'a str,
    }

    let line = Line {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
    };

    if let Ok(json) = serde_json::to_string(&line) {
        let _ = writeln!(std::io::stderr().lock(), "{}", json);
    }
}

#[cfg(not(feature = "json"))]
fn log_json(level: Level, target: &str, message: &str) {
    let _ = writeln!(
        std::io::stderr().lock(),
        "{} {} {}: {}",
        chrono::Utc::now().to_rfc3339(),
        level.as_str(),
        target,
        message
    );
}

// ============================================================================
// Macros
// ============================================================================

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Trace) {
            $crate::log($crate::Level::Trace, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a debug message. Also emitted when `PLAINSEARCH_DEBUG=1`, whatever
/// `PLAINSEARCH_LOG_LEVEL` says.
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_enabled($crate::Level::Debug) {
            $crate::log($crate::Level::Debug, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log an info message.
#[macro_export]
macro_rules! info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Info) {
            $crate::log($crate::Level::Info, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log a warning.
#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Warn) {
            $crate::log($crate::Level::Warn, module_path!(), &format!($($arg)+));
        }
    };
}

/// Log an error.
#[macro_export]
macro_rules! error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, $target, &format!($($arg)+));
        }
    };
    ($($arg:tt)+) => {
        if $crate::is_level_enabled($crate::Level::Error) {
            $crate::log($crate::Level::Error, module_path!(), &format!($($arg)+));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Off);
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse("TRACE"), Some(Level::Trace));
        assert_eq!(Level::parse("warning"), Some(Level::Warn));
        assert_eq!(Level::parse("none"), Some(Level::Off));
        assert_eq!(Level::parse("loud"), None);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!(Format::parse("Json"), Some(Format::Json));
        assert_eq!(Format::parse("compact"), Some(Format::Compact));
        assert_eq!(Format::parse("xml"), None);
    }

    #[test]
    fn test_off_is_never_enabled() {
        let original = current_level();
        set_level(Level::Trace);
        assert!(is_level_enabled(Level::Error));
        assert!(!is_level_enabled(Level::Off));
        set_level(original);
    }

    #[test]
    fn test_debug_mode_bypasses_minimum_level() {
        assert!(passes(Level::Debug, Level::Warn, true));
        assert!(!passes(Level::Debug, Level::Warn, false));
        assert!(!passes(Level::Info, Level::Warn, true));
        assert!(!passes(Level::Trace, Level::Warn, true));
        assert!(passes(Level::Error, Level::Warn, false));
        assert!(!passes(Level::Off, Level::Trace, true));
    }

    #[test]
    fn test_macros_compile() {
        let batch = 2;
        trace!("batch {}", batch);
        debug!(target: "plainsearch::test", "debug {}", batch);
        info!("info");
        warn!(target: "plainsearch::test", "warn");
        error!("error");
    }
}
