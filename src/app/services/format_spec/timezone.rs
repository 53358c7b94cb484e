//! Timezone token resolution
//!
//! Accepts numeric offsets (`+1`, `-5.5`, `+01:30`, `-0130`), optionally
//! prefixed by `UTC` or `GMT`, and the common abbreviations listed below.
//! Offsets are returned in hours east of Greenwich.

/// Known timezone abbreviations and their offsets in hours
const ABBREVIATIONS: &[(&str, f64)] = &[
    ("Z", 0.0),
    ("UTC", 0.0),
    ("UT", 0.0),
    ("GMT", 0.0),
    ("WET", 0.0),
    ("WEST", 1.0),
    ("BST", 1.0),
    ("IST", 1.0),
    ("CET", 1.0),
    ("MET", 1.0),
    ("CEST", 2.0),
    ("MEST", 2.0),
    ("EET", 2.0),
    ("EEST", 3.0),
    ("MSK", 3.0),
    ("AST", -4.0),
    ("ADT", -3.0),
    ("EST", -5.0),
    ("EDT", -4.0),
    ("CST", -6.0),
    ("CDT", -5.0),
    ("MST", -7.0),
    ("MDT", -6.0),
    ("PST", -8.0),
    ("PDT", -7.0),
    ("AKST", -9.0),
    ("AKDT", -8.0),
    ("HST", -10.0),
    ("JST", 9.0),
    ("KST", 9.0),
    ("AWST", 8.0),
    ("ACST", 9.5),
    ("AEST", 10.0),
    ("AEDT", 11.0),
    ("NZST", 12.0),
    ("NZDT", 13.0),
];

/// Resolve a timezone token into an offset in hours
pub fn parse_time_zone(token: &str) -> Option<f64> {
    let upper = token.trim().to_uppercase();
    if upper.is_empty() {
        return None;
    }

    if let Some((_, offset)) = ABBREVIATIONS.iter().find(|(name, _)| *name == upper) {
        return Some(*offset);
    }

    let numeric = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);
    parse_numeric_offset(numeric)
}

fn parse_numeric_offset(text: &str) -> Option<f64> {
    let (sign, body) = match text.as_bytes().first()? {
        b'+' => (1.0, &text[1..]),
        b'-' => (-1.0, &text[1..]),
        _ => (1.0, text),
    };
    if body.is_empty() {
        return None;
    }

    let hours = if let Some((hours, minutes)) = body.split_once(':') {
        let hours: u32 = hours.parse().ok()?;
        let minutes: u32 = minutes.parse().ok()?;
        if minutes >= 60 {
            return None;
        }
        f64::from(hours) + f64::from(minutes) / 60.0
    } else if body.len() == 4 && body.bytes().all(|b| b.is_ascii_digit()) {
        let hours: u32 = body[..2].parse().ok()?;
        let minutes: u32 = body[2..].parse().ok()?;
        if minutes >= 60 {
            return None;
        }
        f64::from(hours) + f64::from(minutes) / 60.0
    } else {
        body.parse::<f64>().ok()?
    };

    if !hours.is_finite() || hours > 14.0 {
        return None;
    }
    Some(sign * hours)
}
