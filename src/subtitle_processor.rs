use std::fmt;
use std::path::Path;
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, anyhow};
use log::{debug, trace};

use crate::app_config::ShiftAmount;
use crate::file_utils::FileManager;
use crate::formatting::strip_markup;

// @module: Subtitle parsing, shifting and serialization

// @const: SRT timing line regex, anchored at the start of the line only
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3}) --> ([0-9]{2}:[0-9]{2}:[0-9]{2},[0-9]{3})").unwrap()
});

/// Parse an SRT timestamp (`HH:MM:SS,mmm`) to milliseconds.
///
/// Field widths are fixed but values are not range checked, so `00:75:00,000`
/// reads as 75 minutes.
pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
    let parts: Vec<&str> = timestamp.split([':', ',']).collect();
    let widths = [2, 2, 2, 3];

    if parts.len() != widths.len()
        || parts.iter().zip(widths).any(|(p, w)| p.len() != w || !p.bytes().all(|b| b.is_ascii_digit()))
    {
        return Err(anyhow!("Invalid timestamp format: {}", timestamp));
    }

    let hours: u64 = parts[0].parse()?;
    let minutes: u64 = parts[1].parse()?;
    let seconds: u64 = parts[2].parse()?;
    let millis: u64 = parts[3].parse()?;

    Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
}

/// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm).
///
/// Hours are at least two digits wide and grow past 99 as needed.
pub fn format_timestamp(ms: u64) -> String {
    let hours = ms / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;

    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
}

/// Parse a timing line into start and end milliseconds
pub fn parse_timing_line(line: &str) -> Option<(u64, u64)> {
    let caps = TIMESTAMP_REGEX.captures(line)?;
    let start = parse_timestamp(caps.get(1)?.as_str()).ok()?;
    let end = parse_timestamp(caps.get(2)?.as_str()).ok()?;
    Some((start, end))
}

/// Characters that end a line. `\r\n` is a single terminator.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Iterator over the lines of a text, splitting on every `LINE_BREAKS` character
struct SrtLines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for SrtLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }

        match self.rest.char_indices().find(|(_, ch)| LINE_BREAKS.contains(ch)) {
            Some((pos, ch)) => {
                let line = &self.rest[..pos];
                let terminator = if self.rest[pos..].starts_with("\r\n") { 2 } else { ch.len_utf8() };
                self.rest = &self.rest[pos + terminator..];
                Some(line)
            }
            None => {
                let line = self.rest;
                self.rest = "";
                Some(line)
            }
        }
    }
}

/// Empty or made only of whitespace, counting the `\x1f` unit separator
fn is_blank(line: &str) -> bool {
    line.chars().all(|ch| ch.is_whitespace() || ch == '\x1f')
}

/// Raw block: the non-blank lines of one entry, in source order
pub type Block<'a> = Vec<&'a str>;

/// Lazy splitter yielding maximal runs of non-blank lines.
///
/// Whitespace-only lines count as blank, and a run of blank lines of any length is
/// a single separator.
pub struct Blocks<'a> {
    lines: SrtLines<'a>,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        let mut block = Vec::new();

        for line in &mut self.lines {
            if !is_blank(line) {
                block.push(line);
            } else if !block.is_empty() {
                return Some(block);
            }
        }

        if block.is_empty() { None } else { Some(block) }
    }
}

/// Split subtitle text into blocks
pub fn split_blocks(content: &str) -> Blocks<'_> {
    Blocks { lines: SrtLines { rest: content } }
}

/// Why a block did not make it into the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// Fewer than two lines, so no timing line
    TooShort,
    /// Second line is not `HH:MM:SS,mmm --> HH:MM:SS,mmm`
    MalformedTiming,
    /// Start time falls before zero once shifted
    NegativeStart,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let reason = match self {
            Rejection::TooShort => "block has no timing line",
            Rejection::MalformedTiming => "timing line is malformed",
            Rejection::NegativeStart => "shifted start is before zero",
        };
        f.write_str(reason)
    }
}

// @struct: Single shifted subtitle entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleEntry {
    // @field: Index line as read, only kept for diagnostics
    pub source_index: String,

    // @field: Start time in ms
    pub start_time_ms: u64,

    // @field: End time in ms, may precede start
    pub end_time_ms: u64,

    // @field: Caption lines with markup removed
    pub text_lines: Vec<String>,
}

impl SubtitleEntry {
    /// Creates a new subtitle entry
    pub fn new(source_index: &str, start_time_ms: u64, end_time_ms: u64, text_lines: Vec<String>) -> Self {
        SubtitleEntry {
            source_index: source_index.to_string(),
            start_time_ms,
            end_time_ms,
            text_lines,
        }
    }

    /// Convert start time to formatted SRT timestamp
    pub fn format_start_time(&self) -> String {
        format_timestamp(self.start_time_ms)
    }

    /// Convert end time to formatted SRT timestamp
    pub fn format_end_time(&self) -> String {
        format_timestamp(self.end_time_ms)
    }

    /// Write this entry in SRT form under the given sequence number
    pub fn write_srt<W: fmt::Write>(&self, out: &mut W, seq_num: usize) -> fmt::Result {
        writeln!(out, "{}", seq_num)?;
        writeln!(out, "{} --> {}", self.format_start_time(), self.format_end_time())?;
        for line in &self.text_lines {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)
    }
}

/// Parse one block and move it by `shift`.
///
/// Start and end are shifted independently. A negative start rejects the block,
/// a negative end is clamped to zero.
pub fn shift_block(block: &[&str], shift: ShiftAmount) -> Result<SubtitleEntry, Rejection> {
    let [index_line, timing_line, text @ ..] = block else {
        return Err(Rejection::TooShort);
    };

    let (start, end) = parse_timing_line(timing_line).ok_or(Rejection::MalformedTiming)?;

    // Both operands are bounded well inside i64
    let start = start as i64 - shift.as_millis();
    let end = end as i64 - shift.as_millis();

    let start_time_ms = u64::try_from(start).map_err(|_| Rejection::NegativeStart)?;
    let end_time_ms = u64::try_from(end).unwrap_or(0);

    Ok(SubtitleEntry {
        source_index: index_line.trim().to_string(),
        start_time_ms,
        end_time_ms,
        text_lines: text.iter().map(|line| strip_markup(line)).collect(),
    })
}

/// Counters describing one pass over a subtitle file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftReport {
    /// Blocks found in the input
    pub blocks_read: usize,
    /// Entries that survived and were renumbered
    pub entries_kept: usize,
    /// Blocks with fewer than two lines
    pub too_short: usize,
    /// Blocks whose timing line did not match
    pub malformed_timing: usize,
    /// Entries that would start before zero
    pub negative_start: usize,
}

impl ShiftReport {
    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::TooShort => self.too_short += 1,
            Rejection::MalformedTiming => self.malformed_timing += 1,
            Rejection::NegativeStart => self.negative_start += 1,
        }
    }

    /// Total number of dropped blocks
    pub fn dropped(&self) -> usize {
        self.too_short + self.malformed_timing + self.negative_start
    }
}

impl fmt::Display for ShiftReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "read {} blocks, kept {}, dropped {} (too short: {}, malformed timing: {}, negative start: {})",
            self.blocks_read,
            self.entries_kept,
            self.dropped(),
            self.too_short,
            self.malformed_timing,
            self.negative_start
        )
    }
}

/// Ordered collection of shifted entries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtitleCollection {
    /// Surviving entries in source order
    pub entries: Vec<SubtitleEntry>,
}

impl SubtitleCollection {
    /// Keep the shifted entries of a sequence of outcomes, in order
    pub fn from_outcomes<I>(outcomes: I) -> (Self, ShiftReport)
    where
        I: IntoIterator<Item = Result<SubtitleEntry, Rejection>>,
    {
        let mut report = ShiftReport::default();
        let mut entries = Vec::new();

        for outcome in outcomes {
            report.blocks_read += 1;
            match outcome {
                Ok(entry) => entries.push(entry),
                Err(rejection) => report.record(rejection),
            }
        }

        report.entries_kept = entries.len();
        (SubtitleCollection { entries }, report)
    }

    /// Split, shift and filter SRT text in one pass
    pub fn shift_srt_string(content: &str, shift: ShiftAmount) -> (Self, ShiftReport) {
        let outcomes = split_blocks(content).map(|block| {
            let outcome = shift_block(&block, shift);
            match &outcome {
                Ok(entry) => trace!(
                    "Block '{}' shifted to {} --> {}",
                    entry.source_index,
                    entry.format_start_time(),
                    entry.format_end_time()
                ),
                Err(rejection) => debug!(
                    "Dropping block '{}': {}",
                    block.first().map(|line| line.trim()).unwrap_or_default(),
                    rejection
                ),
            }
            outcome
        });

        Self::from_outcomes(outcomes)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render all entries in SRT format, numbered from 1
    pub fn to_srt_string(&self) -> String {
        let mut out = String::new();
        for (i, entry) in self.entries.iter().enumerate() {
            // Writing to a String cannot fail
            let _ = entry.write_srt(&mut out, i + 1);
        }
        out
    }

    /// Write subtitles to an SRT file
    pub fn write_to_srt<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        FileManager::write_to_file(path, &self.to_srt_string())
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, entry) in self.entries.iter().enumerate() {
            entry.write_srt(f, i + 1)?;
        }
        Ok(())
    }
}
