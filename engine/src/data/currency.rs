// Normalization of the free-form `biaya` (cost) column.
//
// The export mixes "58,922,400.00", "1.539.800,00", "1500,00", "1,500" and plain
// integers in the same column. The separator that appears last decides the
// decimal marker; when only one kind of separator is present its position
// relative to the end of the string decides.
use std::str::FromStr;
use thiserror::Error;

/// Literal header token that occasionally leaks into the cost column.
pub const HEADER_TOKEN: &str = "biaya";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseFailure {
    #[error("empty cost value")]
    Empty,
    #[error("header token in cost column")]
    HeaderToken,
    #[error("cost value '{0}' contains no digits")]
    NoDigits(String),
    #[error("failed to parse cost '{raw}' (cleaned to '{cleaned}')")]
    Invalid { raw: String, cleaned: String },
    #[error("cost '{0}' is not a finite number")]
    NonFinite(String),
}

/// Parses one raw cost string into a signed amount.
///
/// Magnitude is never checked: very large or very negative amounts come back
/// unchanged.
pub fn normalize(raw: &str) -> Result<f64, ParseFailure> {
    let value = raw.trim();
    if value.is_empty() {
        return Err(ParseFailure::Empty);
    }
    if value.eq_ignore_ascii_case(HEADER_TOKEN) {
        return Err(ParseFailure::HeaderToken);
    }
    if !value.chars().any(|c| c.is_ascii_digit()) {
        return Err(ParseFailure::NoDigits(value.to_string()));
    }

    let cleaned = strip_separators(value);
    let parsed = f64::from_str(&cleaned).map_err(|_| ParseFailure::Invalid {
        raw: value.to_string(),
        cleaned: cleaned.clone(),
    })?;
    if !parsed.is_finite() {
        return Err(ParseFailure::NonFinite(value.to_string()));
    }
    Ok(parsed)
}

fn strip_separators(value: &str) -> String {
    match (value.find(','), value.find('.')) {
        // "58,922,400.00"
        (Some(comma), Some(period)) if comma < period => value.replace(',', ""),
        // "1.539.800,00"
        (Some(_), Some(_)) => value.replace('.', "").replace(',', "."),
        (Some(_), None) => {
            if is_decimal_position(value, ',') {
                value.replace(',', ".")
            } else {
                value.replace(',', "")
            }
        }
        (None, Some(_)) => {
            if is_decimal_position(value, '.') {
                value.to_string()
            } else {
                value.replace('.', "")
            }
        }
        (None, None) => value.to_string(),
    }
}

// A separator sitting exactly three characters from the end ("1500,00") is a
// decimal marker; anywhere else it groups thousands.
fn is_decimal_position(value: &str, separator: char) -> bool {
    value.chars().count() > 3 && value.chars().rev().nth(2) == Some(separator)
}
