//! Metadata extraction from file names
//!
//! A pattern such as `{ID}_{NAME}-{SKIP}_-_{PARAM}` is matched against the
//! file name without directory and extension. A leading literal must match
//! the start of the name, each placeholder runs up to the next occurrence of
//! the literal that follows it, and the last one runs to the end.

use std::path::Path;

use super::fields::{MetadataField, MetadataLayer};
use crate::{Error, Result};

/// Compiled filename pattern
#[derive(Debug, Clone, PartialEq)]
pub struct FilenamePattern {
    pattern: String,
    prefix: String,
    /// Each placeholder with the literal text following it
    placeholders: Vec<(MetadataField, String)>,
}

impl FilenamePattern {
    pub fn compile(pattern: &str) -> Result<Self> {
        let fail = |message: &str| Error::metadata(pattern, message.to_string());

        let first = pattern
            .find('{')
            .ok_or_else(|| fail("no variables defined for filename parsing"))?;
        let prefix = pattern[..first].to_string();

        let mut placeholders = Vec::new();
        let mut rest = &pattern[first..];
        while let Some(body) = rest.strip_prefix('{') {
            let close = body
                .find('}')
                .ok_or_else(|| fail("unclosed variable delimiter '}' in filename pattern"))?;
            let keyword = &body[..close];
            if keyword.contains('{') {
                return Err(fail("unclosed variable delimiter '}' in filename pattern"));
            }
            let field = MetadataField::from_keyword(keyword).ok_or_else(|| {
                Error::metadata(
                    pattern,
                    format!("unknown field type '{keyword}' in filename pattern"),
                )
            })?;

            let after = &body[close + 1..];
            let literal_end = after.find('{').unwrap_or(after.len());
            let literal = &after[..literal_end];
            if literal.contains('}') {
                return Err(fail("unmatched '}' in filename pattern"));
            }
            placeholders.push((field, literal.to_string()));
            rest = &after[literal_end..];
        }

        Ok(Self {
            pattern: pattern.to_string(),
            prefix,
            placeholders,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Extract metadata from the base name of `path`
    pub fn extract(&self, path: &Path) -> Result<MetadataLayer> {
        let file = path.display().to_string();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mismatch = || {
            Error::metadata(
                &file,
                format!(
                    "The filename pattern '{}' does not match the file name '{}'",
                    self.pattern, name
                ),
            )
        };

        let mut rest = name.strip_prefix(self.prefix.as_str()).ok_or_else(mismatch)?;
        let mut layer = MetadataLayer::new();
        let last = self.placeholders.len().saturating_sub(1);

        for (index, (field, literal)) in self.placeholders.iter().enumerate() {
            let value = if index == last {
                let value = rest.strip_suffix(literal.as_str()).ok_or_else(mismatch)?;
                rest = "";
                value
            } else {
                let end = rest.find(literal.as_str()).ok_or_else(mismatch)?;
                let value = &rest[..end];
                rest = &rest[end + literal.len()..];
                value
            };
            layer.assign(*field, value, &file)?;
        }

        Ok(layer)
    }
}
