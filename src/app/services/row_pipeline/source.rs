//! Data-line source shared by the order probe and the row pipeline
//!
//! Wraps a [`LineReader`] and yields cleaned, non-empty data lines. Lines
//! inside an exclusion range, header-repeat blocks and comment-only lines
//! never reach the caller.

use std::io::BufRead;
use std::ops::RangeInclusive;

use super::reader::LineReader;
use super::tokenizer::clean_line;

/// Line-level filtering rules of a file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineFilter {
    pub comments_marker: Option<char>,
    pub purge_chars: Vec<char>,
    /// A line containing this marker starts a repeated header block
    pub header_repeat_marker: Option<String>,
    /// Lines skipped after a repeat marker
    pub header_lines: usize,
    /// Physical line ranges never interpreted as data
    pub exclusions: Vec<RangeInclusive<usize>>,
}

impl LineFilter {
    pub fn is_excluded(&self, line_number: usize) -> bool {
        self.exclusions
            .iter()
            .any(|range| range.contains(&line_number))
    }
}

/// A cleaned data line and its physical line number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLine {
    pub line_number: usize,
    pub content: String,
}

/// Iterator over the data lines of a file
#[derive(Debug)]
pub struct RowSource<'a, R> {
    reader: LineReader<R>,
    filter: &'a LineFilter,
    skip_remaining: usize,
    lines_read: usize,
    lines_excluded: usize,
}

impl<'a, R: BufRead> RowSource<'a, R> {
    pub fn new(reader: LineReader<R>, filter: &'a LineFilter) -> Self {
        Self {
            reader,
            filter,
            skip_remaining: 0,
            lines_read: 0,
            lines_excluded: 0,
        }
    }

    /// Next cleaned data line, `None` at end of file
    pub fn next_row(&mut self) -> std::io::Result<Option<DataLine>> {
        while let Some(raw) = self.reader.next_line()? {
            self.lines_read += 1;
            let line_number = self.reader.line_number();

            if self.skip_remaining > 0 {
                self.skip_remaining -= 1;
                continue;
            }
            if self.filter.is_excluded(line_number) {
                self.lines_excluded += 1;
                continue;
            }
            if let Some(marker) = &self.filter.header_repeat_marker {
                if raw.contains(marker.as_str()) {
                    self.skip_remaining = self.filter.header_lines;
                    continue;
                }
            }

            let content = clean_line(&raw, self.filter.comments_marker, &self.filter.purge_chars);
            if content.is_empty() {
                continue;
            }
            return Ok(Some(DataLine {
                line_number,
                content,
            }));
        }
        Ok(None)
    }

    /// Byte offset of the line following the last one returned
    pub fn offset(&self) -> u64 {
        self.reader.offset()
    }

    /// Physical lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    pub fn lines_excluded(&self) -> usize {
        self.lines_excluded
    }
}
