//! Row-level error handling policy

use serde::{Deserialize, Serialize};

/// How row-level errors are treated during a read
///
/// With `silent_errors`, malformed lines are dropped with a warning. With
/// `errors_to_nodata`, unparseable values become nodata while field-count and
/// date errors still abort the read. When both are set, `silent_errors` wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPolicy {
    pub silent_errors: bool,
    pub errors_to_nodata: bool,
}

impl ErrorPolicy {
    /// Abort on the first row-level error
    pub fn strict() -> Self {
        Self::default()
    }

    /// Drop malformed lines with a warning
    pub fn silent() -> Self {
        Self {
            silent_errors: true,
            errors_to_nodata: false,
        }
    }

    /// Store nodata for unparseable values
    pub fn to_nodata() -> Self {
        Self {
            silent_errors: false,
            errors_to_nodata: true,
        }
    }
}
