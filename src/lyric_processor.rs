use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::{self, Write as _};
use std::path::Path;
use std::str::FromStr;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use log::debug;

use crate::errors::LyricFileError;
use crate::file_utils::FileManager;
use crate::time_tag;

// @module: LRC lyric parsing, formatting and editing

// @const: Any of the three line-ending conventions, CRLF first
static LINE_BREAK_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\r\n|\n|\r").unwrap()
});

// @const: Info tag at the start of a line, e.g. [ar:Artist]
static INFO_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\[\s*(\w{1,6})\s*:(.*?)\]").unwrap()
});

/// Default line ending used when formatting
pub const DEFAULT_LINE_ENDING: &str = "\r\n";

/// Default number of digits after the decimal point in time tags
pub const DEFAULT_DECIMAL_PLACES: u32 = 3;

/// Metadata tags keyed by tag name, iterated in key order
pub type InfoMap = BTreeMap<String, String>;

// @struct: Single lyric line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricEntry {
    // @field: Time in seconds, None for untimed lines
    pub time: Option<f64>,

    // @field: Lyric text without the time tag
    pub text: String,
}

impl LyricEntry {
    /// Creates an entry carrying a time tag
    pub fn timed(time: f64, text: impl Into<String>) -> Self {
        LyricEntry {
            time: Some(time),
            text: text.into(),
        }
    }

    /// Creates an entry without a time tag
    pub fn plain(text: impl Into<String>) -> Self {
        LyricEntry {
            time: None,
            text: text.into(),
        }
    }

    /// Whether the entry is rendered with a time tag. NaN counts as no time.
    pub fn is_timed(&self) -> bool {
        self.time.is_some_and(|time| !time.is_nan())
    }

    // @mutates: Drops the time tag, keeps the text
    pub fn strip_tag(&mut self) {
        self.time = None;
    }
}

/// Options controlling how a document is written back to text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    // @field: Digits after the decimal point in time tags
    pub decimal_places: u32,

    // @field: Spaces before timed text, negative leaves the text start untouched
    pub padding_start: i32,

    // @field: Spaces after timed text, negative leaves the text end untouched
    pub padding_end: i32,

    // @field: Milliseconds subtracted from every time tag
    pub offset_ms: i64,

    // @field: Terminator written after every line
    pub line_ending: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            padding_start: 0,
            padding_end: 0,
            offset_ms: 0,
            line_ending: DEFAULT_LINE_ENDING.to_string(),
        }
    }
}

/// Parse LRC text into metadata and lyric entries.
///
/// Lines are split on `\r\n`, `\n` or `\r`, in any mix. Each line becomes
/// a timed entry, an info tag, or a plain entry. Bracketed content that is
/// neither a time tag nor an info tag is kept verbatim as a plain entry, and
/// info tags with an empty value are dropped entirely. This never fails.
pub fn parse_lyric(text: &str) -> (InfoMap, Vec<LyricEntry>) {
    let mut info = InfoMap::new();
    let mut lyrics = Vec::new();

    let mut lines: Vec<&str> = LINE_BREAK_REGEX.split(text).collect();
    // A terminator at the very end closes the last line instead of opening a new one
    if lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    for line in lines {
        if !line.starts_with('[') {
            lyrics.push(LyricEntry::plain(line));
            continue;
        }

        if let Some((time, text)) = time_tag::split_time_tag(line) {
            lyrics.push(LyricEntry::timed(time, text));
            continue;
        }

        if let Some(caps) = INFO_TAG_REGEX.captures(line) {
            let key = caps.get(1).map_or("", |m| m.as_str());
            let value = caps.get(2).map_or("", |m| m.as_str()).trim();
            // Tags without a value are dropped along with their line
            if !value.is_empty() {
                info.insert(key.to_string(), value.to_string());
            }
            continue;
        }

        lyrics.push(LyricEntry::plain(line));
    }

    debug!("Parsed {} info tags and {} lyric lines", info.len(), lyrics.len());

    (info, lyrics)
}

/// Format metadata and lyric entries as LRC text.
///
/// Info tags come first as `[key: value]`, followed by the entries in order.
/// Every line, including the last, is terminated with the configured line
/// ending.
pub fn format_lyric(info: &InfoMap, lyrics: &[LyricEntry], options: &FormatOptions) -> String {
    let eol = options.line_ending.as_str();
    let mut output = String::new();

    for (key, value) in info {
        // Writing into a String cannot fail
        let _ = write!(output, "[{}: {}]{}", key, value, eol);
    }

    for entry in lyrics {
        match entry.time.filter(|time| !time.is_nan()) {
            Some(time) => {
                output.push_str(&time_tag::format_time_tag(
                    time,
                    options.decimal_places,
                    options.offset_ms,
                    true,
                ));
                output.push_str(&pad_text(&entry.text, options.padding_start, options.padding_end));
            }
            None => output.push_str(&entry.text),
        }
        output.push_str(eol);
    }

    output
}

/// Trim and pad lyric text.
///
/// A non-negative `padding_start` trims leading whitespace and prepends that
/// many spaces; `padding_end` does the same at the end. A negative value
/// leaves that side exactly as it was.
pub fn pad_text(text: &str, padding_start: i32, padding_end: i32) -> String {
    let mut body = text;
    let mut prefix = String::new();
    let mut suffix = String::new();

    if padding_start >= 0 {
        body = body.trim_start();
        prefix = " ".repeat(padding_start as usize);
    }
    if padding_end >= 0 {
        body = body.trim_end();
        suffix = " ".repeat(padding_end as usize);
    }

    format!("{}{}{}", prefix, body, suffix)
}

/// Parsed lyric document: metadata plus the ordered lyric lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LyricDocument {
    /// Metadata tags
    pub info: InfoMap,

    /// Lyric lines in source order
    pub lyrics: Vec<LyricEntry>,
}

impl LyricDocument {
    /// Create an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse LRC text into a document
    pub fn parse(text: &str) -> Self {
        let (info, lyrics) = parse_lyric(text);
        LyricDocument { info, lyrics }
    }

    /// Format the document as LRC text
    pub fn format(&self, options: &FormatOptions) -> String {
        format_lyric(&self.info, &self.lyrics, options)
    }

    pub fn lyrics(&self) -> &[LyricEntry] {
        &self.lyrics
    }

    pub fn infos(&self) -> &InfoMap {
        &self.info
    }

    /// Value of a metadata tag
    pub fn info(&self, key: &str) -> Option<&str> {
        self.info.get(key).map(String::as_str)
    }

    /// Set a metadata tag. The value is trimmed, and an empty value removes the tag.
    pub fn set_info(&mut self, key: impl Into<String>, value: &str) {
        let key = key.into();
        let value = value.trim();
        if value.is_empty() {
            self.info.remove(&key);
        } else {
            self.info.insert(key, value.to_string());
        }
    }

    pub fn remove_info(&mut self, key: &str) {
        self.info.remove(key);
    }

    pub fn clear_infos(&mut self) {
        self.info.clear();
    }

    pub fn append_lyric(&mut self, entry: LyricEntry) {
        self.lyrics.push(entry);
    }

    /// Insert an entry before `index`. An index past the end is ignored.
    pub fn insert_lyric(&mut self, index: usize, entry: LyricEntry) {
        if index <= self.lyrics.len() {
            self.lyrics.insert(index, entry);
        }
    }

    /// Remove the entry at `index`. An index past the end is ignored.
    pub fn remove_lyric(&mut self, index: usize) {
        if index < self.lyrics.len() {
            self.lyrics.remove(index);
        }
    }

    pub fn clear_lyrics(&mut self) {
        self.lyrics.clear();
    }

    /// Clear metadata and lyrics
    pub fn clear(&mut self) {
        self.clear_infos();
        self.clear_lyrics();
    }

    /// Strip the time tag of the entry at `index`. An index past the end is ignored.
    pub fn remove_tag(&mut self, index: usize) {
        if let Some(entry) = self.lyrics.get_mut(index) {
            entry.strip_tag();
        }
    }

    /// Strip the time tag of every entry
    pub fn remove_tags(&mut self) {
        self.lyrics.iter_mut().for_each(LyricEntry::strip_tag);
    }

    /// Remove every entry whose text is empty after trimming
    pub fn remove_empty(&mut self) {
        let before = self.lyrics.len();
        self.lyrics.retain(|entry| !entry.text.trim().is_empty());
        debug!("Removed {} empty lyric lines", before - self.lyrics.len());
    }

    /// Number of entries carrying a time tag
    pub fn timed_count(&self) -> usize {
        self.lyrics.iter().filter(|entry| entry.is_timed()).count()
    }
}

impl FromStr for LyricDocument {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for LyricDocument {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.format(&FormatOptions::default()))
    }
}

/// Lyric document together with the options used to write it back.
///
/// Setters only assign when the value differs and report whether it changed.
#[derive(Debug, Clone, Default)]
pub struct LyricProcessor {
    document: LyricDocument,
    options: FormatOptions,
}

impl LyricProcessor {
    /// Create a processor with default format options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with the given format options
    pub fn with_options(options: FormatOptions) -> Self {
        LyricProcessor {
            document: LyricDocument::default(),
            options,
        }
    }

    /// Replace the current document with parsed LRC text
    pub fn load_lyric(&mut self, text: &str) {
        self.document = LyricDocument::parse(text);
    }

    /// Current document as LRC text
    pub fn lyric(&self) -> String {
        self.document.format(&self.options)
    }

    /// Load a lyric file. On failure the current document is kept.
    pub fn load_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), LyricFileError> {
        let content = FileManager::read_lyric_file(path)?;
        self.load_lyric(&content);
        Ok(())
    }

    /// Write the current document to a lyric file
    pub fn save_file<P: AsRef<Path>>(&self, path: P) -> Result<(), LyricFileError> {
        FileManager::write_lyric_file(path, &self.lyric())
    }

    pub fn document(&self) -> &LyricDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut LyricDocument {
        &mut self.document
    }

    pub fn lyrics(&self) -> &[LyricEntry] {
        self.document.lyrics()
    }

    pub fn infos(&self) -> &InfoMap {
        self.document.infos()
    }

    pub fn info(&self, key: &str) -> Option<&str> {
        self.document.info(key)
    }

    pub fn set_info(&mut self, key: impl Into<String>, value: &str) {
        self.document.set_info(key, value);
    }

    pub fn remove_info(&mut self, key: &str) {
        self.document.remove_info(key);
    }

    pub fn clear_infos(&mut self) {
        self.document.clear_infos();
    }

    pub fn append_lyric(&mut self, entry: LyricEntry) {
        self.document.append_lyric(entry);
    }

    pub fn insert_lyric(&mut self, index: usize, entry: LyricEntry) {
        self.document.insert_lyric(index, entry);
    }

    pub fn remove_lyric(&mut self, index: usize) {
        self.document.remove_lyric(index);
    }

    pub fn clear_lyrics(&mut self) {
        self.document.clear_lyrics();
    }

    /// Clear metadata and lyrics, keeping the format options
    pub fn clear(&mut self) {
        self.document.clear();
    }

    pub fn remove_tag(&mut self, index: usize) {
        self.document.remove_tag(index);
    }

    pub fn remove_tags(&mut self) {
        self.document.remove_tags();
    }

    pub fn remove_empty(&mut self) {
        self.document.remove_empty();
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: FormatOptions) -> bool {
        replace_if_changed(&mut self.options, options)
    }

    pub fn set_decimal_places(&mut self, decimal_places: u32) -> bool {
        replace_if_changed(&mut self.options.decimal_places, decimal_places)
    }

    pub fn set_padding_start(&mut self, padding_start: i32) -> bool {
        replace_if_changed(&mut self.options.padding_start, padding_start)
    }

    pub fn set_padding_end(&mut self, padding_end: i32) -> bool {
        replace_if_changed(&mut self.options.padding_end, padding_end)
    }

    pub fn set_offset_ms(&mut self, offset_ms: i64) -> bool {
        replace_if_changed(&mut self.options.offset_ms, offset_ms)
    }

    pub fn set_line_ending(&mut self, line_ending: impl Into<String>) -> bool {
        replace_if_changed(&mut self.options.line_ending, line_ending.into())
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
