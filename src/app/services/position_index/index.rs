//! Seek point storage

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::debug;

use crate::app::models::Timestamp;

/// Resumable position inside a data file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeekPoint {
    /// Timestamp of the row ending just before `offset`
    pub timestamp: Timestamp,
    /// Byte offset of the next line
    pub offset: u64,
    /// Physical line number of the row carrying `timestamp`
    pub line_number: usize,
    /// Fallback-year wrap state after that row
    pub wrap_active: bool,
}

/// Seek points of one file, sorted by timestamp
#[derive(Debug, Clone, Default)]
pub struct FileIndex {
    points: Vec<SeekPoint>,
}

impl FileIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a point, replacing any point with the same timestamp
    pub fn record(&mut self, point: SeekPoint) {
        match self
            .points
            .binary_search_by(|existing| existing.timestamp.cmp(&point.timestamp))
        {
            Ok(position) => self.points[position] = point,
            Err(position) => self.points.insert(position, point),
        }
    }

    /// Latest point strictly before `start`
    pub fn seek_before(&self, start: Timestamp) -> Option<SeekPoint> {
        let position = self.points.partition_point(|point| point.timestamp < start);
        position.checked_sub(1).map(|last| self.points[last])
    }

    pub fn points(&self) -> &[SeekPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Identity of one indexed row stream
///
/// A file shared by several stations is filtered on a station-id column, so
/// each station sees its own rows at its own offsets and gets its own entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeekKey {
    pub path: PathBuf,
    /// Station id the rows are filtered on, if any
    pub station: Option<String>,
}

impl SeekKey {
    /// Every row of `path`
    pub fn file(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            station: None,
        }
    }

    /// Rows of `path` whose station-id column holds `station`
    pub fn station(path: &Path, station: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            station: Some(station.to_string()),
        }
    }
}

/// Seek points for every file read through one ingestor
///
/// Shared between readers behind an `Arc`. Entries are never persisted.
#[derive(Debug, Default)]
pub struct PositionIndex {
    files: RwLock<HashMap<SeekKey, FileIndex>>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge freshly scanned points into the index of `key`
    pub fn record(&self, key: &SeekKey, points: Vec<SeekPoint>) {
        if points.is_empty() {
            return;
        }
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        let file_index = files.entry(key.clone()).or_default();
        let count = points.len();
        for point in points {
            file_index.record(point);
        }
        debug!(
            "Indexed {} seek points for {} ({} total)",
            count,
            key.path.display(),
            file_index.len()
        );
    }

    /// Latest recorded point of `key` strictly before `start`
    pub fn seek_before(&self, key: &SeekKey, start: Timestamp) -> Option<SeekPoint> {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.get(key)?.seek_before(start)
    }

    /// Number of points recorded for `key`
    pub fn point_count(&self, key: &SeekKey) -> usize {
        let files = self.files.read().unwrap_or_else(|e| e.into_inner());
        files.get(key).map_or(0, FileIndex::len)
    }

    /// Forget every point of `path`, for all stations reading it
    pub fn invalidate(&self, path: &Path) {
        let mut files = self.files.write().unwrap_or_else(|e| e.into_inner());
        files.retain(|key, _| key.path != path);
    }

    /// Number of indexed files
    pub fn file_count(&self) -> usize {
        self.files.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}
