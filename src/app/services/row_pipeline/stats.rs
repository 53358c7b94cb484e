//! Read statistics and result structures

use serde::{Deserialize, Serialize};

use crate::app::models::Record;

/// Records of one read together with its statistics
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Records inside the requested range, oldest first
    pub records: Vec<Record>,

    /// Statistics of the read
    pub stats: ParseStats,
}

/// Counters collected while streaming a file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Physical lines read after the header or seek point
    pub lines_read: usize,

    /// Rows turned into records
    pub rows_parsed: usize,

    /// Rows with a valid timestamp outside the requested range
    pub rows_out_of_range: usize,

    /// Rows belonging to another station
    pub rows_filtered: usize,

    /// Lines dropped because of a row-level error
    pub rows_skipped: usize,

    /// Lines inside an excluded line range
    pub lines_excluded: usize,

    /// Values replaced by nodata because they could not be parsed
    pub values_to_nodata: usize,

    /// Whether the read started from a seek point
    pub resumed: bool,

    /// Diagnostics of skipped rows
    pub errors: Vec<String>,
}

impl ParseStats {
    /// Create new empty statistics
    pub fn new() -> Self {
        Self {
            lines_read: 0,
            rows_parsed: 0,
            rows_out_of_range: 0,
            rows_filtered: 0,
            rows_skipped: 0,
            lines_excluded: 0,
            values_to_nodata: 0,
            resumed: false,
            errors: Vec::new(),
        }
    }

    /// Share of candidate rows turned into records, as a percentage
    pub fn success_rate(&self) -> f64 {
        let candidates = self.rows_parsed + self.rows_skipped;
        if candidates == 0 {
            0.0
        } else {
            (self.rows_parsed as f64 / candidates as f64) * 100.0
        }
    }

    /// Check if any row was dropped
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Add the counters of another read
    pub fn merge(&mut self, other: &ParseStats) {
        self.lines_read += other.lines_read;
        self.rows_parsed += other.rows_parsed;
        self.rows_out_of_range += other.rows_out_of_range;
        self.rows_filtered += other.rows_filtered;
        self.rows_skipped += other.rows_skipped;
        self.lines_excluded += other.lines_excluded;
        self.values_to_nodata += other.values_to_nodata;
        self.errors.extend(other.errors.iter().cloned());
    }
}

impl Default for ParseStats {
    fn default() -> Self {
        Self::new()
    }
}
