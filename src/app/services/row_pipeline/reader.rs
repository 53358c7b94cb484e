//! Line reading with byte offsets
//!
//! Lines are split on the end-of-line style detected once per file, decoded
//! lossily and returned without their terminator. The reader tracks the byte
//! offset of the next line and the physical number of the last line read, so
//! the pipeline can record seek points and resume from them.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use crate::constants::EOL_DETECTION_WINDOW;
use crate::{Error, Result};

/// End-of-line convention of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EolStyle {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// Bare `\r`
    Cr,
}

impl EolStyle {
    /// Detect the style from the first terminator of a byte window
    pub fn detect(window: &[u8]) -> Self {
        match window.iter().position(|&b| b == b'\n' || b == b'\r') {
            Some(position) if window[position] == b'\n' => Self::Lf,
            Some(position) if window.get(position + 1) == Some(&b'\n') => Self::CrLf,
            Some(position) if position + 1 < window.len() => Self::Cr,
            // A lone trailing `\r` at the window edge is most likely part of `\r\n`
            Some(_) => Self::CrLf,
            None => Self::Lf,
        }
    }

    /// Byte terminating each line
    fn terminator(self) -> u8 {
        match self {
            Self::Lf | Self::CrLf => b'\n',
            Self::Cr => b'\r',
        }
    }
}

/// Detect the end-of-line style of an open file and rewind it
pub fn detect_eol(file: &mut File) -> std::io::Result<EolStyle> {
    let mut window = Vec::with_capacity(EOL_DETECTION_WINDOW);
    file.by_ref()
        .take(EOL_DETECTION_WINDOW as u64)
        .read_to_end(&mut window)?;
    file.seek(SeekFrom::Start(0))?;
    Ok(EolStyle::detect(&window))
}

/// Line iterator over a buffered source
#[derive(Debug)]
pub struct LineReader<R> {
    reader: R,
    terminator: u8,
    offset: u64,
    line_number: usize,
    buffer: Vec<u8>,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a source positioned at `offset`, right after line `line_number`
    pub fn new(reader: R, eol: EolStyle, offset: u64, line_number: usize) -> Self {
        Self {
            reader,
            terminator: eol.terminator(),
            offset,
            line_number,
            buffer: Vec::new(),
        }
    }

    /// Read the next physical line, `None` at end of file
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        self.buffer.clear();
        let read = self.reader.read_until(self.terminator, &mut self.buffer)?;
        if read == 0 {
            return Ok(None);
        }
        self.offset += read as u64;
        self.line_number += 1;

        if self.buffer.last() == Some(&self.terminator) {
            self.buffer.pop();
        }
        if self.buffer.last() == Some(&b'\r') {
            self.buffer.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buffer).into_owned()))
    }

    /// Byte offset of the next line
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Physical number of the last line returned (1-based)
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl LineReader<BufReader<File>> {
    /// Open `path` and position the reader at `offset`
    pub fn open_at(path: &Path, eol: EolStyle, offset: u64, line_number: usize) -> Result<Self> {
        let mut file = File::open(path).map_err(|e| {
            Error::io(format!("Error opening file {} for reading", path.display()), e)
        })?;
        file.seek(SeekFrom::Start(offset)).map_err(|e| {
            Error::io(format!("Could not seek to byte {offset} in {}", path.display()), e)
        })?;
        Ok(Self::new(BufReader::new(file), eol, offset, line_number))
    }
}
