// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use log::{LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use srtshift::app_config::{Config, LogLevel, ShiftAmount};
use srtshift::app_controller::Controller;

// @const: Binary name used in the usage line
const PROGRAM_NAME: &str = "srtshift";

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => LogLevel::Error,
            CliLogLevel::Warn => LogLevel::Warn,
            CliLogLevel::Info => LogLevel::Info,
            CliLogLevel::Debug => LogLevel::Debug,
            CliLogLevel::Trace => LogLevel::Trace,
        }
    }
}

/// srtshift - move SRT subtitles in time
///
/// Shifts every timestamp of an SRT file by a fixed number of seconds,
/// strips inline markup and renumbers the entries.
#[derive(Parser, Debug)]
#[command(name = "srtshift")]
#[command(version)]
#[command(about = "Shift SRT subtitle timestamps by a fixed offset")]
#[command(long_about = "srtshift subtracts a fixed offset from every timestamp of an SRT file.

Positive offsets make subtitles appear earlier, negative offsets delay them.
Entries that would start before 00:00:00,000 are dropped, markup tags such as
<i> are removed, and the remaining entries are renumbered from 1.

EXAMPLES:
    srtshift movie.srt fixed.srt 3.5         # Show subtitles 3.5 seconds earlier
    srtshift movie.srt fixed.srt -2          # Show subtitles 2 seconds later
    srtshift -l info movie.srt fixed.srt 1   # Print a summary of dropped entries")]
struct CommandLineOptions {
    /// Subtitle file to read
    #[arg(value_name = "INPUT")]
    input_path: PathBuf,

    /// Subtitle file to write
    #[arg(value_name = "OUTPUT")]
    output_path: PathBuf,

    /// Offset in seconds (e.g. 3.5 or -2)
    #[arg(value_name = "SECONDS")]
    shift: String,

    /// Set logging level
    #[arg(short, long, value_enum, default_value = "warn")]
    log_level: CliLogLevel,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Tag and ANSI color for level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("ERROR", "1;31"),
            Level::Warn => ("WARN ", "1;33"),
            Level::Info => ("INFO ", "1;32"),
            Level::Debug => ("DEBUG", "1;36"),
            Level::Trace => ("TRACE", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (tag, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn usage_line() -> String {
    format!("Usage: {} input.srt output.srt 3.5", PROGRAM_NAME)
}

/// Moves the known flags in front of a `--` separator so every other token
/// is taken as a positional, even when it starts with `-` (`-.5`, `-inf`,
/// `-in.srt`). A user-supplied `--` ends flag recognition early.
fn separate_positionals<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    let mut flags: Vec<OsString> = args.next().into_iter().collect();
    let mut positionals = Vec::new();

    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy().into_owned();
        match text.as_str() {
            "--" => {
                positionals.extend(args.by_ref());
                break;
            }
            "-h" | "--help" | "-V" | "--version" => flags.push(arg),
            "-l" | "--log-level" => {
                flags.push(arg);
                flags.extend(args.next());
            }
            _ if text.starts_with("--log-level=") => flags.push(arg),
            _ => positionals.push(arg),
        }
    }

    flags.push(OsString::from("--"));
    flags.extend(positionals);
    flags
}

fn main() -> Result<()> {
    let cli = match CommandLineOptions::try_parse_from(separate_positionals(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion | ErrorKind::InvalidValue => err.exit(),
            // Wrong argument count or unknown arguments
            _ => {
                println!("{}", usage_line());
                std::process::exit(1);
            }
        },
    };

    let log_level: LogLevel = cli.log_level.into();
    CustomLogger::init(log_level.to_level_filter())?;

    let shift: ShiftAmount = cli.shift.parse()?;

    let mut config = Config::new(&cli.input_path, &cli.output_path, shift);
    config.log_level = log_level;

    let controller = Controller::with_config(config)?;
    controller.run()?;

    println!("Done. Wrote shifted subtitles to {}", cli.output_path.display());

    Ok(())
}
