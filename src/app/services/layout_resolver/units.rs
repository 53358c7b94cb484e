//! Unit recognition and conversion to SI
//!
//! Only a small set of units is recognized. Each maps to a multiplier and an
//! offset applied as `value * multiplier + offset`.

use tracing::warn;

use crate::app::services::row_pipeline::tokenizer::{split_fields, unquote};
use crate::constants::{EMPTY_UNITS, SI_UNITS, WATER_FREEZING_POINT_K};
use crate::{Error, Result};

/// Linear conversion of one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConversion {
    pub multiplier: f64,
    pub offset: f64,
}

impl UnitConversion {
    pub const IDENTITY: Self = Self {
        multiplier: 1.0,
        offset: 0.0,
    };

    const fn scale(multiplier: f64) -> Self {
        Self {
            multiplier,
            offset: 0.0,
        }
    }

    pub fn apply(self, value: f64) -> f64 {
        value * self.multiplier + self.offset
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

impl Default for UnitConversion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Conversion for a unit name, `None` when the unit is not recognized
pub fn conversion_for_unit(unit: &str) -> Option<UnitConversion> {
    let unit = unquote(unit).to_uppercase();
    let unit = unit.as_str();
    if EMPTY_UNITS.contains(&unit) || SI_UNITS.contains(&unit) {
        return Some(UnitConversion::IDENTITY);
    }

    let conversion = match unit {
        "%" | "PC" | "CM" => UnitConversion::scale(0.01),
        "C" | "DEGC" | "GRAD C" | "°C" => UnitConversion {
            multiplier: 1.0,
            offset: WATER_FREEZING_POINT_K,
        },
        "HPA" => UnitConversion::scale(100.0),
        "MM" | "MV" | "MA" => UnitConversion::scale(1e-3),
        "MIN" => UnitConversion::scale(60.0),
        "IN" => UnitConversion::scale(0.0254),
        "FT" => UnitConversion::scale(0.3048),
        "F" => UnitConversion {
            multiplier: 5.0 / 9.0,
            offset: -32.0 * 5.0 / 9.0,
        },
        "KM/H" => UnitConversion::scale(1.0 / 3.6),
        "MPH" => UnitConversion::scale(1.60934 / 3.6),
        "KT" => UnitConversion::scale(1.852 / 3.6),
        _ => return None,
    };
    Some(conversion)
}

/// Conversions for a units line; unknown units are kept as identity
pub fn parse_units(line: &str, delimiter: char) -> Vec<UnitConversion> {
    split_fields(line, delimiter)
        .into_iter()
        .map(|unit| {
            conversion_for_unit(unit).unwrap_or_else(|| {
                warn!("Can not parse unit '{}', no conversion applied", unit);
                UnitConversion::IDENTITY
            })
        })
        .collect()
}

/// Conversions from explicit offset and multiplier vectors
///
/// Each non-empty vector must have exactly one entry per column.
pub fn conversions_from_vectors(
    offsets: &[f64],
    multipliers: &[f64],
    columns: usize,
) -> Result<Vec<UnitConversion>> {
    for (name, values) in [("UNITS_OFFSET", offsets), ("UNITS_MULTIPLIER", multipliers)] {
        if !values.is_empty() && values.len() != columns {
            return Err(Error::configuration(format!(
                "The declared {name} ({}) must match the number of columns ({columns})",
                values.len()
            )));
        }
    }

    Ok((0..columns)
        .map(|column| UnitConversion {
            multiplier: multipliers.get(column).copied().unwrap_or(1.0),
            offset: offsets.get(column).copied().unwrap_or(0.0),
        })
        .collect())
}
