/*!
 * Error types for the srtshift application.
 *
 * Fatal conditions only. Blocks that cannot be shifted are not errors; they are
 * reported through `subtitle_processor::Rejection` and simply left out of the output.
 */

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// The shift argument is not a usable number of seconds
    #[error("Invalid shift '{value}': {reason}")]
    InvalidShift {
        /// Raw value as given on the command line
        value: String,
        /// Why it was refused
        reason: String,
    },

    /// The run configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),
}
