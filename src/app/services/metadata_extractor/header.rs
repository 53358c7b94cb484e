//! Metadata extraction from header lines
//!
//! A header coordinate `fieldtype:line:column` points at one token of one
//! header line, both counted from 1. Lines are split with the header
//! delimiter before the coordinates are applied.

use std::collections::BTreeMap;

use super::fields::{MetadataField, MetadataLayer};
use crate::app::services::row_pipeline::tokenizer::unquote;
use crate::{Error, Result};

/// One `fieldtype:line:column` declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderCoordinate {
    pub field: MetadataField,
    /// Logical header line, 1-based
    pub line: usize,
    /// Token within the line, 1-based
    pub column: usize,
}

impl HeaderCoordinate {
    pub fn parse(spec: &str) -> Result<Self> {
        let parts: Vec<&str> = spec.split(':').map(str::trim).collect();
        let [field, line, column] = parts.as_slice() else {
            return Err(Error::configuration(format!(
                "Wrong format for metadata specification '{spec}', expected fieldtype:line:column"
            )));
        };

        let field = MetadataField::from_keyword(field).ok_or_else(|| {
            Error::configuration(format!(
                "Unknown field type '{field}' in metadata specification '{spec}'"
            ))
        })?;
        let line = parse_position(line, spec)?;
        let column = parse_position(column, spec)?;

        Ok(Self {
            field,
            line,
            column,
        })
    }
}

fn parse_position(value: &str, spec: &str) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(Error::configuration(format!(
            "Line and column numbers must be > 0 in metadata specification '{spec}'"
        ))),
    }
}

/// All header coordinates of a file, grouped by line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderMetadataSpec {
    by_line: BTreeMap<usize, Vec<HeaderCoordinate>>,
}

impl HeaderMetadataSpec {
    /// Parse a space-separated list of `fieldtype:line:column` declarations
    pub fn parse(specs: &str) -> Result<Self> {
        let mut by_line: BTreeMap<usize, Vec<HeaderCoordinate>> = BTreeMap::new();
        for spec in specs.split_whitespace() {
            let coordinate = HeaderCoordinate::parse(spec)?;
            by_line.entry(coordinate.line).or_default().push(coordinate);
        }
        Ok(Self { by_line })
    }

    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }

    /// Whether any coordinate points at `line`
    pub fn wants_line(&self, line: usize) -> bool {
        self.by_line.contains_key(&line)
    }

    /// Highest line number referenced
    pub fn last_line(&self) -> Option<usize> {
        self.by_line.keys().next_back().copied()
    }

    /// Apply every coordinate of `line` to its already split tokens
    pub fn extract_line(
        &self,
        line: usize,
        tokens: &[&str],
        file: &str,
        layer: &mut MetadataLayer,
    ) -> Result<()> {
        let Some(coordinates) = self.by_line.get(&line) else {
            return Ok(());
        };

        for coordinate in coordinates {
            let token = tokens.get(coordinate.column - 1).ok_or_else(|| {
                Error::metadata(
                    file,
                    format!(
                        "Metadata specification for '{}' refers to column {} but header line {} has {} fields",
                        coordinate.field,
                        coordinate.column,
                        line,
                        tokens.len()
                    ),
                )
            })?;
            layer.assign(coordinate.field, unquote(token), file)?;
        }
        Ok(())
    }
}
