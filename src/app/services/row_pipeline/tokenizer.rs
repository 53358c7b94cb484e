//! Line cleaning and field splitting

/// Strip comments and purge characters, then trim
///
/// Everything from the comment marker onward is dropped. Purged characters
/// (typically quotes) are removed wherever they appear.
pub fn clean_line(line: &str, comments_marker: Option<char>, purge_chars: &[char]) -> String {
    let content = match comments_marker {
        Some(marker) => line.split(marker).next().unwrap_or_default(),
        None => line,
    };
    let cleaned: String = if purge_chars.is_empty() {
        content.to_string()
    } else {
        content.chars().filter(|c| !purge_chars.contains(c)).collect()
    };
    cleaned.trim().to_string()
}

/// Split a cleaned line into trimmed fields
///
/// A space delimiter splits on any whitespace run; any other delimiter splits
/// on every occurrence, so empty fields are kept.
pub fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    if delimiter.is_whitespace() {
        line.split_whitespace().collect()
    } else {
        line.split(delimiter).map(str::trim).collect()
    }
}

/// Remove one level of surrounding quotes
pub fn unquote(token: &str) -> &str {
    let token = token.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = token
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    token
}
