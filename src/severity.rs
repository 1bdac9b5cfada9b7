use serde::Serialize;
use std::fmt;

/// The seven-level taxonomy used across all sinks, ordered from most to
/// least severe: `error > warn > info > http > verbose > debug > silly`.
///
/// The discriminant is the severity rank; a smaller rank is more severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Http = 3,
    Verbose = 4,
    Debug = 5,
    Silly = 6,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Http => "http",
            Level::Verbose => "verbose",
            Level::Debug => "debug",
            Level::Silly => "silly",
        }
    }

    /// Parse a level name. Total over all inputs: unrecognized names fall
    /// back to [`Level::Info`] so a bad level can never break a log call.
    pub fn from_name(name: &str) -> Level {
        match name.to_ascii_lowercase().as_str() {
            "error" => Level::Error,
            "warn" => Level::Warn,
            "info" => Level::Info,
            "http" => Level::Http,
            "verbose" => Level::Verbose,
            "debug" => Level::Debug,
            "silly" => Level::Silly,
            _ => Level::Info,
        }
    }

    /// Filtering tier. `http` shares the informational tier so request
    /// logs survive the common `info` threshold.
    fn filter_rank(self) -> u8 {
        match self {
            Level::Error => 0,
            Level::Warn => 1,
            Level::Info | Level::Http => 2,
            Level::Verbose => 3,
            Level::Debug => 4,
            Level::Silly => 5,
        }
    }

    /// Whether a record at this level passes a sink threshold of `min`.
    /// A sink at `info` admits `info`, `http` and everything more severe,
    /// but none of `verbose`/`debug`/`silly`.
    pub fn passes(self, min: Level) -> bool {
        self.filter_rank() <= min.filter_rank()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// OpenTelemetry log severity numbers, restricted to the tiers this
/// taxonomy emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum SeverityNumber {
    Trace = 1,
    Debug = 5,
    Debug2 = 6,
    Debug3 = 7,
    Info = 9,
    Warn = 13,
    Error = 17,
}

/// Map a level onto the OpenTelemetry severity scale.
///
/// Table-driven and total; callers that hold an unrecognized level name
/// should go through [`Level::from_name`] first, which lands them on the
/// informational tier.
pub fn map_severity(level: Level) -> SeverityNumber {
    match level {
        Level::Error => SeverityNumber::Error,
        Level::Warn => SeverityNumber::Warn,
        Level::Info => SeverityNumber::Info,
        Level::Http => SeverityNumber::Debug3,
        Level::Verbose => SeverityNumber::Debug2,
        Level::Debug => SeverityNumber::Debug,
        Level::Silly => SeverityNumber::Trace,
    }
}

pub const ALL_LEVELS: [Level; 7] = [
    Level::Error,
    Level::Warn,
    Level::Info,
    Level::Http,
    Level::Verbose,
    Level::Debug,
    Level::Silly,
];
