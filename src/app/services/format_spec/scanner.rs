//! Matching compiled patterns against data tokens
//!
//! The scanner walks the segments of a [`DateTimeFormat`] over the input.
//! Bounded fields read at most their width in digits, seconds may carry a
//! fractional part and a timezone slot takes the remaining token. Text left
//! after the last segment is ignored.

use super::compiler::{DateField, DateTimeFormat, Segment};

/// Raw calendar and clock values extracted from one or two tokens
///
/// Fields absent from the pattern keep their zero default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DateParts {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
    pub time_zone: Option<String>,
}

impl DateParts {
    fn assign(&mut self, field: DateField, value: f64) {
        match field {
            DateField::Year => self.year = value as i32,
            DateField::Month => self.month = value as u32,
            DateField::Day => self.day = value as u32,
            DateField::Hour => self.hour = value as u32,
            DateField::Minute => self.minute = value as u32,
            DateField::Second => self.second = value,
        }
    }
}

impl DateTimeFormat {
    /// Match the pattern against `input`, starting from zeroed parts
    pub fn scan(&self, input: &str) -> Option<DateParts> {
        let mut parts = DateParts::default();
        self.scan_into(input, &mut parts)?;
        Some(parts)
    }

    /// Match the pattern against `input`, filling only the fields it carries
    pub fn scan_into(&self, input: &str, parts: &mut DateParts) -> Option<()> {
        let mut rest = input;

        for segment in self.segments() {
            match segment {
                Segment::Literal(text) => rest = match_literal(rest, text)?,
                Segment::Field(field) => {
                    let (value, remaining) = take_number(rest.trim_start(), field.max_digits())?;
                    parts.assign(*field, value);
                    rest = remaining;
                }
                Segment::TimeZone => {
                    let token = rest.split_whitespace().next()?;
                    parts.time_zone = Some(token.to_string());
                    rest = "";
                }
            }
        }

        Some(())
    }
}

fn match_literal<'a>(input: &'a str, literal: &str) -> Option<&'a str> {
    let mut rest = input;
    for ch in literal.chars() {
        if ch.is_whitespace() {
            rest = rest.trim_start();
        } else {
            rest = rest.strip_prefix(ch)?;
        }
    }
    Some(rest)
}

/// Read an unsigned number; bounded widths accept digits only
fn take_number(input: &str, max_digits: Option<usize>) -> Option<(f64, &str)> {
    let bytes = input.as_bytes();
    let limit = max_digits.unwrap_or(usize::MAX);

    let mut end = 0;
    while end < bytes.len() && end < limit && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == 0 {
        return None;
    }

    if max_digits.is_none() && end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }

    let value = input[..end].parse::<f64>().ok()?;
    Some((value, &input[end..]))
}
