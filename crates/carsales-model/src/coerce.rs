//! Boundary coercion for loosely typed UI input.
//!
//! Numeric widgets hand over text such as `"8"` or `"8.0"`; data grids hand over a mix of JSON
//! numbers and numeric strings. Everything is converted once here so the transforms only ever
//! see typed values.

use serde_json::Value as JsonValue;

use crate::error::{TableError, TableResult};

/// Parse a row count. Integral floats (`"8.0"`) are accepted; zero, negatives and fractions are
/// not.
pub fn parse_count(input: &str) -> TableResult<usize> {
    let trimmed = input.trim();
    if let Ok(count) = trimmed.parse::<usize>() {
        return positive(count, input);
    }

    match trimmed.parse::<f64>() {
        Ok(num) if num.fract() == 0.0 && (1.0..=usize::MAX as f64).contains(&num) => {
            Ok(num as usize)
        }
        _ => {
            log::warn!("rejected count {input:?}");
            Err(TableError::InvalidCount(input.to_string()))
        }
    }
}

fn positive(count: usize, input: &str) -> TableResult<usize> {
    if count == 0 {
        log::warn!("rejected count {input:?}");
        return Err(TableError::InvalidCount(input.to_string()));
    }
    Ok(count)
}

pub fn parse_threshold(input: &str) -> TableResult<f64> {
    match input.trim().parse::<f64>() {
        Ok(num) if num.is_finite() => Ok(num),
        _ => {
            log::warn!("rejected threshold {input:?}");
            Err(TableError::InvalidThreshold(input.to_string()))
        }
    }
}

/// Coerce a grid cell to a finite number.
pub fn json_number(value: &JsonValue) -> Option<f64> {
    let num = match value {
        JsonValue::Number(num) => num.as_f64()?,
        JsonValue::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    num.is_finite().then_some(num)
}
