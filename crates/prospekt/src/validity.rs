//! Normalization of leaflet validity text into ISO dates.
//!
//! Listings usually phrase validity as a range (`15.11.2022 - 20.11.2022`),
//! but some embed a single date in prose (`von Dienstag 15.11.2022`).

use chrono::NaiveDate;

const RANGE_SEPARATOR: &str = " - ";
const INPUT_FORMAT: &str = "%d.%m.%Y";
const OUTPUT_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum ValidityError {
    #[error("Invalid date '{0}', expected dd.mm.yyyy")]
    InvalidDate(String),
    #[error("Expected exactly two dates around ' - ', found {0} part(s)")]
    RangeParts(usize),
    #[error("Expected at most two dates, found {0}")]
    TooManyDates(usize),
}

/// Converts a `dd.mm.yyyy` token into `yyyy-mm-dd`.
pub fn to_iso_date(token: &str) -> Result<String, ValidityError> {
    let token = token.trim();
    let invalid = || ValidityError::InvalidDate(token.to_string());

    if !has_date_shape(token) {
        return Err(invalid());
    }

    NaiveDate::parse_from_str(token, INPUT_FORMAT)
        .map(|date| date.format(OUTPUT_FORMAT).to_string())
        .map_err(|_| invalid())
}

/// chrono's `%Y` takes any digit count and a sign, so the shape is checked
/// up front: one or two digit day and month, four digit year.
fn has_date_shape(token: &str) -> bool {
    let is_digits = |part: &str, min: usize, max: usize| {
        (min..=max).contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit())
    };

    match token.split('.').collect::<Vec<_>>().as_slice() {
        [day, month, year] => is_digits(day, 1, 2) && is_digits(month, 1, 2) && is_digits(year, 4, 4),
        _ => false,
    }
}

/// Returns `(valid_from, valid_to)`. Either side may be empty when the text
/// does not carry a full range.
pub fn parse_validity(text: &str) -> Result<(String, String), ValidityError> {
    if text.contains(RANGE_SEPARATOR) {
        let parts: Vec<&str> = text.split(RANGE_SEPARATOR).collect();
        let [from, to] = parts.as_slice() else {
            return Err(ValidityError::RangeParts(parts.len()));
        };
        return Ok((to_iso_date(from)?, to_iso_date(to)?));
    }

    let dated: Vec<&str> = text
        .split_whitespace()
        .filter(|token| token.contains('.'))
        .collect();

    match dated.as_slice() {
        [] => Ok((String::new(), String::new())),
        [from] => Ok((to_iso_date(from)?, String::new())),
        [from, to] => Ok((to_iso_date(from)?, to_iso_date(to)?)),
        _ => Err(ValidityError::TooManyDates(dated.len())),
    }
}
