//! Field-level helpers for tab-delimited lines

use super::{FormatError, Result};
use std::str::FromStr;

/// Split a line on tabs, checking the field count when one is expected
///
/// Extra fields beyond `expected` are tolerated; fewer are an error.
pub fn split_fields(line: &str, expected: Option<usize>, line_number: usize) -> Result<Vec<&str>> {
    let fields: Vec<&str> = line.split('\t').collect();
    if let Some(expected) = expected {
        if fields.len() < expected {
            return Err(FormatError::FieldCount {
                expected,
                actual: fields.len(),
                line: line_number,
            });
        }
    }
    Ok(fields)
}

/// Parse a required field
pub fn parse_required<T>(value: &str, field: &str, line_number: usize) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| FormatError::InvalidField {
        field: field.to_string(),
        line: line_number,
        reason: e.to_string(),
    })
}

/// Parse an optional field, where `.` means missing
pub fn parse_optional<T>(value: &str, field: &str, line_number: usize) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    if value.trim() == "." {
        Ok(None)
    } else {
        parse_required(value, field, line_number).map(Some)
    }
}
