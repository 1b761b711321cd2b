//! Validators for single dialogue answers. Every function takes the raw
//! message text and trims it first.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{constants::report_labels::DATE_FORMAT, errors::InputError};

static DATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("DATE_REGEX is a valid regex pattern")
});

pub fn non_empty(raw: &str, field: &'static str) -> Result<String, InputError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(InputError::EmptyField { field });
    }
    Ok(text.to_string())
}

pub fn date(raw: &str, field: &'static str) -> Result<NaiveDate, InputError> {
    let text = raw.trim();
    if !DATE_REGEX.is_match(text) {
        return Err(InputError::InvalidDateFormat { field });
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|_| InputError::InvalidDateValue { field })
}

/// Digits only, so `+3`, `-1` and `2.0` are all rejected.
pub fn positive_integer(raw: &str, field: &'static str) -> Result<usize, InputError> {
    let text = raw.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(InputError::NotAPositiveInteger { field });
    }
    match text.parse::<usize>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(InputError::NotAPositiveInteger { field }),
    }
}

pub fn positive_number(raw: &str, field: &'static str) -> Result<f64, InputError> {
    match parse_finite(raw) {
        Some(value) if value > 0.0 => Ok(value),
        _ => Err(InputError::NotAPositiveNumber { field }),
    }
}

/// Accepts both bounds: `0` and `max_score` are valid scores.
pub fn score(raw: &str, max_score: f64) -> Result<f64, InputError> {
    let out_of_range = InputError::ScoreOutOfRange {
        min: 0.0,
        max: max_score,
    };
    match parse_finite(raw) {
        Some(value) if (0.0..=max_score).contains(&value) => Ok(value),
        _ => Err(out_of_range),
    }
}

// `f64::from_str` also accepts "NaN" and "inf", which are never valid answers.
fn parse_finite(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}
