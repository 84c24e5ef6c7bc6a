/*!
 * End-to-end tests for shifting subtitle files
 */

use std::fs;
use anyhow::Result;
use srtshift::app_config::{Config, ShiftAmount};
use srtshift::app_controller::Controller;
use srtshift::subtitle_processor::SubtitleCollection;
use crate::common;

fn run_shift(content: &str, shift: &str) -> Result<String> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "input.srt", content)?;
    let output = temp_dir.path().join("output.srt");

    Controller::with_config(Config::new(&input, &output, shift.parse()?))?.run()?;

    Ok(fs::read_to_string(&output)?)
}

/// Test the documented three-second scenario
#[test]
fn test_shift_workflow_withEarlyEntry_shouldDropItAndRenumber() -> Result<()> {
    let output = run_shift(common::SAMPLE_SRT, "3.0")?;

    assert_eq!(output, "1\n00:00:02,000 --> 00:00:04,000\nHello world\n\n");

    Ok(())
}

/// Zero shift keeps everything except markup
#[test]
fn test_shift_workflow_withZeroShift_shouldOnlyStripMarkupAndRenumber() -> Result<()> {
    let input = "10\n00:00:05,000 --> 00:00:07,000\n<i>Hello</i> world\n\n20\n00:00:01,000 --> 00:00:02,000\nplain\n";
    let output = run_shift(input, "0")?;

    assert_eq!(
        output,
        "1\n00:00:05,000 --> 00:00:07,000\nHello world\n\n2\n00:00:01,000 --> 00:00:02,000\nplain\n\n"
    );

    Ok(())
}

/// Windows line endings, blank-line runs and junk blocks
#[test]
fn test_shift_workflow_withMessyInput_shouldSurvive() -> Result<()> {
    let input = "\u{feff}1\r\n00:00:10,000 --> 00:00:12,000\r\nFirst\r\n\r\n\r\n\r\njunk\r\n\r\n3\r\nbroken --> timing\r\ntext\r\n\r\n4\r\n00:00:20,000 --> 00:00:21,500 X1:0\r\n\r\n";
    let output = run_shift(input, "-1.5")?;

    assert_eq!(
        output,
        "1\n00:00:11,500 --> 00:00:13,500\nFirst\n\n2\n00:00:21,500 --> 00:00:23,000\n\n"
    );

    Ok(())
}

/// Shifting by +S and then -S restores survivors
#[test]
fn test_shift_workflow_withRoundTrip_shouldRestoreTimestamps() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_subtitle(temp_dir.path(), "input.srt")?;
    let shifted = temp_dir.path().join("shifted.srt");
    let restored = temp_dir.path().join("restored.srt");
    let shift: ShiftAmount = "4.25".parse()?;

    Controller::with_config(Config::new(&input, &shifted, shift))?.run()?;
    Controller::with_config(Config::new(&shifted, &restored, -shift))?.run()?;

    let original = fs::read_to_string(&input)?;
    let (expected, _) = SubtitleCollection::shift_srt_string(&original, ShiftAmount::ZERO);
    let (actual, _) = SubtitleCollection::shift_srt_string(&fs::read_to_string(&restored)?, ShiftAmount::ZERO);

    // The first entry starts at one second and does not survive the first pass
    assert_eq!(actual.len(), 2);
    for (got, want) in actual.entries.iter().zip(&expected.entries[1..]) {
        assert_eq!(got.start_time_ms, want.start_time_ms);
        assert_eq!(got.end_time_ms, want.end_time_ms);
    }

    Ok(())
}

/// Nothing survives: the output file still gets written, empty
#[test]
fn test_shift_workflow_withAllEntriesDropped_shouldWriteEmptyFile() -> Result<()> {
    let output = run_shift(common::SAMPLE_SRT, "60")?;

    assert!(output.is_empty());

    Ok(())
}
