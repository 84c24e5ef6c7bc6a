/*!
 * # srtshift - shift SRT subtitles in time
 *
 * A Rust library and command line tool that moves every timestamp of an SRT
 * subtitle file by a fixed offset, strips inline markup and renumbers the result.
 *
 * ## Pipeline
 *
 * 1. Split the input into blocks of non-blank lines
 * 2. Parse each block's timing line and subtract the offset
 * 3. Drop malformed blocks and entries that would start before zero
 * 4. Renumber the survivors from 1 and write them back out
 *
 * ## Architecture
 *
 * - `app_config`: Run configuration, shift amount and log level
 * - `subtitle_processor`: Block splitting, shifting, filtering and serialization
 * - `formatting`: Markup removal for caption lines
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]

// Public modules
pub mod app_config;
pub mod file_utils;
pub mod formatting;
pub mod subtitle_processor;
pub mod app_controller;
pub mod errors;

// Re-export main types for easier usage
pub use app_config::{Config, LogLevel, ShiftAmount};
pub use app_controller::Controller;
pub use subtitle_processor::{Rejection, ShiftReport, SubtitleCollection, SubtitleEntry};
pub use errors::AppError;
