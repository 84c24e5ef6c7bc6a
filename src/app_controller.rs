use anyhow::{Result, Context};
use log::{info, warn, debug};
use crate::app_config::Config;
use crate::file_utils::FileManager;
use crate::subtitle_processor::{ShiftReport, SubtitleCollection};

// @module: Application controller for subtitle shifting

/// Main application controller: read, shift, write
pub struct Controller {
    // @field: Run configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()
            .context("Configuration validation failed")?;

        Ok(Self { config })
    }

    /// Run the whole transform from input file to output file
    pub fn run(&self) -> Result<ShiftReport> {
        let input = &self.config.input_path;
        let output = &self.config.output_path;

        debug!("Reading subtitles from {:?}", input);
        let content = FileManager::read_to_string(input)?;

        let (collection, report) = SubtitleCollection::shift_srt_string(&content, self.config.shift);

        if collection.is_empty() {
            warn!("No subtitle entries left after shifting {:?} by {}", input, self.config.shift);
        }

        collection.write_to_srt(output)?;

        info!("Shifted {:?} by {}: {}", input, self.config.shift, report);

        Ok(report)
    }
}
