//! Pattern tokenization and validation
//!
//! A pattern is scanned left to right. Each recognized token becomes a typed
//! [`Segment::Field`]; everything else is kept as literal text. The compiled
//! form remembers the order in which fields appear, which is all the scanner
//! needs to assign values.

use crate::{Error, Result};

/// Calendar or clock component addressed by a pattern token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DateField {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl DateField {
    /// Pattern token for this field
    pub fn token(self) -> &'static str {
        match self {
            DateField::Year => "YYYY",
            DateField::Month => "MM",
            DateField::Day => "DD",
            DateField::Hour => "HH24",
            DateField::Minute => "MI",
            DateField::Second => "SS",
        }
    }

    /// Maximum number of digits consumed for the field, `None` for unbounded
    pub fn max_digits(self) -> Option<usize> {
        match self {
            DateField::Year => Some(4),
            DateField::Second => None,
            _ => Some(2),
        }
    }

    /// True for hour, minute and second
    pub fn is_time(self) -> bool {
        matches!(self, DateField::Hour | DateField::Minute | DateField::Second)
    }
}

/// Token recognized while tokenizing a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Field(DateField),
    TimeZone,
}

/// Tokens in matching order; longer tokens first where prefixes could collide
const TOKENS: &[(&str, Token)] = &[
    ("YYYY", Token::Field(DateField::Year)),
    ("HH24", Token::Field(DateField::Hour)),
    ("MM", Token::Field(DateField::Month)),
    ("DD", Token::Field(DateField::Day)),
    ("MI", Token::Field(DateField::Minute)),
    ("SS", Token::Field(DateField::Second)),
    ("TZ", Token::TimeZone),
];

/// One element of a compiled pattern
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Text that must appear verbatim (whitespace matches any whitespace run)
    Literal(String),
    /// Numeric slot for a calendar or clock component
    Field(DateField),
    /// Trailing timezone token
    TimeZone,
}

/// Compiled date/time pattern
#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeFormat {
    pattern: String,
    fields: Vec<DateField>,
    segments: Vec<Segment>,
    has_time_zone: bool,
}

impl DateTimeFormat {
    /// Compile a pattern that may contain any date and time token
    pub fn compile(pattern: &str) -> Result<Self> {
        let format = Self::tokenize(pattern)?;
        if format.fields.is_empty() {
            return Err(Error::invalid_format_spec(
                pattern,
                "no date or time field (YYYY, MM, DD, HH24, MI, SS) found",
            ));
        }
        Ok(format)
    }

    /// Compile a pattern restricted to time tokens (HH24, MI, SS and TZ)
    pub fn compile_time(pattern: &str) -> Result<Self> {
        let format = Self::compile(pattern)?;
        if let Some(field) = format.fields.iter().find(|field| !field.is_time()) {
            return Err(Error::invalid_format_spec(
                pattern,
                format!("date token {} is not allowed in a time specification", field.token()),
            ));
        }
        Ok(format)
    }

    fn tokenize(pattern: &str) -> Result<Self> {
        if pattern.contains('%') {
            return Err(Error::invalid_format_spec(
                pattern,
                "the '%' character is not allowed",
            ));
        }

        let mut fields: Vec<DateField> = Vec::new();
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut has_time_zone = false;
        let mut position = 0;

        while position < pattern.len() {
            let rest = &pattern[position..];
            let matched = TOKENS.iter().find(|(text, _)| rest.starts_with(text));

            let Some((text, token)) = matched else {
                // Advance by one whole character to stay on UTF-8 boundaries
                let ch = rest.chars().next().unwrap_or_default();
                literal.push(ch);
                position += ch.len_utf8().max(1);
                continue;
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }

            match token {
                Token::Field(field) => {
                    if fields.contains(field) {
                        return Err(Error::invalid_format_spec(
                            pattern,
                            format!("token {} appears more than once", field.token()),
                        ));
                    }
                    fields.push(*field);
                    segments.push(Segment::Field(*field));
                }
                Token::TimeZone => {
                    if position + text.len() != pattern.len() {
                        return Err(Error::invalid_format_spec(
                            pattern,
                            "TZ must be at the very end of the specification",
                        ));
                    }
                    has_time_zone = true;
                    segments.push(Segment::TimeZone);
                }
            }
            position += text.len();
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        let format = Self {
            pattern: pattern.to_string(),
            fields,
            segments,
            has_time_zone,
        };
        format.check_slots()?;
        Ok(format)
    }

    /// Every recognized token must map to exactly one slot
    fn check_slots(&self) -> Result<()> {
        let slots = self
            .segments
            .iter()
            .filter(|segment| !matches!(segment, Segment::Literal(_)))
            .count();
        let expected = self.fields.len() + usize::from(self.has_time_zone);
        if slots != expected {
            return Err(Error::invalid_format_spec(
                &self.pattern,
                format!("found {slots} placeholders for {expected} tokens"),
            ));
        }
        Ok(())
    }

    /// Original pattern string
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Fields in the order they appear in the pattern
    pub fn fields(&self) -> &[DateField] {
        &self.fields
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn has_time_zone(&self) -> bool {
        self.has_time_zone
    }

    /// Whether the pattern carries the given field
    pub fn has_field(&self, field: DateField) -> bool {
        self.fields.contains(&field)
    }
}
