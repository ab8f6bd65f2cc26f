//! Unmatched-assets log parser.
//!
//! The log is a human-oriented report: a banner, a separator line of
//! underscores, then timestamped `INFO:` lines. Movies appear as
//! `Title (Year)`; series are the same line followed by one or more
//! `Season:` lines, or carry an explicit "Seasons listed below" suffix.
//! A section headed "Unmatched Collections" lists bare collection names.
//!
//! Parsing is a small state machine over the line stream with one line of
//! lookahead. It never fails: lines it does not recognise are counted and
//! dropped.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use shared::{CollectionEntry, MovieEntry, SeriesEntry, UniqueList};
use std::path::Path;
use tracing::{debug, info};

/// Marker text of the collections section header
const COLLECTIONS_MARKER: &str = "Unmatched Collections";

/// Payload prefix of a season continuation line
const SEASON_PREFIX: &str = "Season:";

/// Payload prefixes of banner and box-drawing lines inside the collections block
const DECORATIVE_PREFIXES: [&str; 2] = ["***", "|"];

/// `MM/DD/YY HH:MM[:SS] AM|PM INFO: <payload>`
static TIMESTAMPED_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{2}/\d{2}/\d{2} \d{2}:\d{2}(?::\d{2})? [AP]M INFO:\s*(.*)$")
        .expect("Invalid timestamped line regex")
});

static TITLE_WITH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+) \((\d{4})\)$").expect("Invalid title regex"));

static EXPLICIT_SERIES_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.+) \((\d{4})\) \(Seasons listed below have missing posters\)$")
        .expect("Invalid series header regex")
});

/// Season number, optionally followed by the `<- Missing` annotation
static SEASON_NUMBER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^Season:\s*(\d+)(?:\s*<-\s*Missing)?$").expect("Invalid season regex")
});

/// Entries extracted from one log, each list de-duplicated in first-seen order
#[derive(Debug, Clone, Default)]
pub struct ParsedAssets {
    pub movies: UniqueList<MovieEntry>,
    pub series: UniqueList<SeriesEntry>,
    pub collections: UniqueList<CollectionEntry>,
    pub stats: ParseStats,
}

/// Line accounting for a parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Lines after the separator that were examined
    pub lines_scanned: usize,
    /// Lines that matched no recognised shape
    pub lines_skipped: usize,
}

impl ParsedAssets {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.series.is_empty() && self.collections.is_empty()
    }
}

/// Series header waiting for its season lines
#[derive(Debug)]
struct PendingSeries {
    name: String,
    year: String,
    missing_seasons: Vec<String>,
}

#[derive(Debug, Default)]
enum ParserState {
    #[default]
    Scanning,
    InCollectionsBlock,
    InSeasonContinuation(PendingSeries),
}

/// Result of feeding one line to the current state
enum Step {
    Consumed,
    /// The state changed and the same line must be fed again
    Reprocess,
}

/// Incremental log parser
#[derive(Debug, Default)]
pub struct LogParser {
    state: ParserState,
    parsed: ParsedAssets,
}

impl LogParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one line, with `next` as the lookahead line if there is one.
    pub fn feed(&mut self, line: &str, next: Option<&str>) {
        self.parsed.stats.lines_scanned += 1;
        while let Step::Reprocess = self.step(line, next) {}
    }

    /// Flush any pending series and return everything collected.
    pub fn finish(mut self) -> ParsedAssets {
        if let ParserState::InSeasonContinuation(pending) = std::mem::take(&mut self.state) {
            self.emit_series(pending);
        }
        self.parsed
    }

    fn step(&mut self, line: &str, next: Option<&str>) -> Step {
        match std::mem::take(&mut self.state) {
            ParserState::Scanning => {
                self.scan(line, next);
                Step::Consumed
            }
            ParserState::InCollectionsBlock => {
                if line.contains(COLLECTIONS_MARKER) {
                    self.state = ParserState::InCollectionsBlock;
                    return Step::Consumed;
                }
                match timestamped_payload(line) {
                    Some(payload) => {
                        if is_collection_name(payload) {
                            self.parsed.collections.push(CollectionEntry::new(payload));
                        } else {
                            self.parsed.stats.lines_skipped += 1;
                        }
                        self.state = ParserState::InCollectionsBlock;
                        Step::Consumed
                    }
                    None => {
                        debug!(line = line.trim(), "Leaving collections block");
                        Step::Reprocess
                    }
                }
            }
            ParserState::InSeasonContinuation(mut pending) => match season_payload(line) {
                Some(payload) => {
                    if let Some(season) = season_number(payload) {
                        pending.missing_seasons.push(season.to_string());
                    }
                    self.state = ParserState::InSeasonContinuation(pending);
                    Step::Consumed
                }
                None => {
                    self.emit_series(pending);
                    Step::Reprocess
                }
            },
        }
    }

    fn scan(&mut self, line: &str, next: Option<&str>) {
        if line.contains(COLLECTIONS_MARKER) {
            debug!("Entering collections block");
            self.state = ParserState::InCollectionsBlock;
            return;
        }

        let Some(payload) = timestamped_payload(line) else {
            self.parsed.stats.lines_skipped += 1;
            return;
        };

        if let Some(caps) = TITLE_WITH_YEAR.captures(payload) {
            let name = caps[1].to_string();
            let year = caps[2].to_string();
            if next.is_some_and(|n| season_payload(n).is_some()) {
                self.state = ParserState::InSeasonContinuation(PendingSeries {
                    name,
                    year,
                    missing_seasons: Vec::new(),
                });
            } else {
                self.parsed.movies.push(MovieEntry::new(name, year));
            }
        } else if let Some(caps) = EXPLICIT_SERIES_HEADER.captures(payload) {
            self.state = ParserState::InSeasonContinuation(PendingSeries {
                name: caps[1].to_string(),
                year: caps[2].to_string(),
                missing_seasons: Vec::new(),
            });
        } else {
            self.parsed.stats.lines_skipped += 1;
        }
    }

    fn emit_series(&mut self, pending: PendingSeries) {
        self.parsed.series.push(SeriesEntry::new(
            pending.name,
            pending.year,
            pending.missing_seasons,
        ));
    }
}

/// Strip the timestamp prefix, returning the trimmed payload
fn timestamped_payload(line: &str) -> Option<&str> {
    TIMESTAMPED_LINE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

/// Payload of a `Season:` continuation line
fn season_payload(line: &str) -> Option<&str> {
    timestamped_payload(line).filter(|payload| payload.starts_with(SEASON_PREFIX))
}

fn season_number(payload: &str) -> Option<&str> {
    SEASON_NUMBER
        .captures(payload)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn is_collection_name(payload: &str) -> bool {
    !payload.is_empty() && !DECORATIVE_PREFIXES.iter().any(|p| payload.starts_with(p))
}

fn is_separator(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && line.chars().all(|c| c == '_')
}

/// Index of the first line after the underscore separator, or 0 if there is none
fn scan_start(lines: &[&str]) -> usize {
    lines
        .iter()
        .position(|line| is_separator(line))
        .map_or(0, |idx| idx + 1)
}

/// Parse a whole log held in memory
pub fn parse_lines<'a, I>(lines: I) -> ParsedAssets
where
    I: IntoIterator<Item = &'a str>,
{
    let lines: Vec<&str> = lines.into_iter().collect();
    let start = scan_start(&lines);
    if start == 0 {
        debug!("No separator line found, scanning the whole log");
    }

    let mut parser = LogParser::new();
    let mut remaining = lines[start..].iter().copied().peekable();
    while let Some(line) = remaining.next() {
        parser.feed(line, remaining.peek().copied());
    }
    parser.finish()
}

/// Read and parse the log at `path`
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParsedAssets> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read log file: {}", path.display()))?;
    let content = String::from_utf8_lossy(&bytes);

    let parsed = parse_lines(content.lines());
    info!(
        path = %path.display(),
        movies = parsed.movies.len(),
        series = parsed.series.len(),
        collections = parsed.collections.len(),
        lines_scanned = parsed.stats.lines_scanned,
        lines_skipped = parsed.stats.lines_skipped,
        "Parsed unmatched assets log"
    );

    Ok(parsed)
}
