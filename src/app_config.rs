use log::LevelFilter;
use std::fmt;
use std::ops::Neg;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::errors::AppError;

/// Application configuration module
/// This module holds the settings of one shift run: which file to read, where to
/// write, how far to move the timestamps and how chatty the logger should be.
/// Represents the configuration of a single run
#[derive(Debug, Clone)]
pub struct Config {
    /// Subtitle file to read
    pub input_path: PathBuf,

    /// Subtitle file to write
    pub output_path: PathBuf,

    /// Offset subtracted from every timestamp
    pub shift: ShiftAmount,

    /// Log level
    pub log_level: LogLevel,
}

impl Config {
    /// Create a configuration with the default log level
    pub fn new<P1: AsRef<Path>, P2: AsRef<Path>>(input_path: P1, output_path: P2, shift: ShiftAmount) -> Self {
        Config {
            input_path: input_path.as_ref().to_path_buf(),
            output_path: output_path.as_ref().to_path_buf(),
            shift,
            log_level: LogLevel::default(),
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.input_path.as_os_str().is_empty() {
            return Err(AppError::Config("Input path is empty".to_string()));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(AppError::Config("Output path is empty".to_string()));
        }

        Ok(())
    }
}

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    // @returns: Matching filter for the log facade
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

// Largest offset accepted, in days
const MAX_SHIFT_DAYS: i64 = 999_999_999;
const MS_PER_DAY: i64 = 86_400_000;
const MAX_SHIFT_MS: i64 = MAX_SHIFT_DAYS * MS_PER_DAY;

/// Signed timestamp offset with millisecond resolution.
///
/// A positive shift moves subtitles earlier, a negative one delays them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShiftAmount {
    millis: i64,
}

impl ShiftAmount {
    /// No shift at all
    pub const ZERO: ShiftAmount = ShiftAmount { millis: 0 };

    /// Build a shift from a whole number of milliseconds
    pub fn from_millis(millis: i64) -> Result<Self, AppError> {
        if !(-MAX_SHIFT_MS..=MAX_SHIFT_MS).contains(&millis) {
            return Err(AppError::InvalidShift {
                value: format!("{}ms", millis),
                reason: format!("magnitude exceeds {} days", MAX_SHIFT_DAYS),
            });
        }

        Ok(ShiftAmount { millis })
    }

    /// Build a shift from decimal seconds, rounded to the nearest millisecond
    pub fn from_seconds(seconds: f64) -> Result<Self, AppError> {
        if !seconds.is_finite() {
            return Err(AppError::InvalidShift {
                value: seconds.to_string(),
                reason: "must be a finite number of seconds".to_string(),
            });
        }

        let millis = (seconds * 1000.0).round();
        if millis.abs() > MAX_SHIFT_MS as f64 {
            return Err(AppError::InvalidShift {
                value: seconds.to_string(),
                reason: format!("magnitude exceeds {} days", MAX_SHIFT_DAYS),
            });
        }

        Ok(ShiftAmount { millis: millis as i64 })
    }

    pub fn as_millis(self) -> i64 {
        self.millis
    }
}

impl FromStr for ShiftAmount {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, AppError> {
        let seconds: f64 = s.trim().parse().map_err(|_| AppError::InvalidShift {
            value: s.to_string(),
            reason: "expected a decimal number of seconds, e.g. 3.5 or -2".to_string(),
        })?;

        Self::from_seconds(seconds).map_err(|e| match e {
            AppError::InvalidShift { reason, .. } => AppError::InvalidShift {
                value: s.to_string(),
                reason,
            },
            other => other,
        })
    }
}

impl Neg for ShiftAmount {
    type Output = ShiftAmount;

    // Range is symmetric, so negation never leaves it
    fn neg(self) -> ShiftAmount {
        ShiftAmount { millis: -self.millis }
    }
}

impl fmt::Display for ShiftAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.millis < 0 { "-" } else { "" };
        let abs = self.millis.unsigned_abs();
        write!(f, "{}{}.{:03}s", sign, abs / 1000, abs % 1000)
    }
}
