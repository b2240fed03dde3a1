use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Candidate, ValidRecord};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Why a candidate expense was rejected. The message is shown to the user as-is.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid amount greater than 0")]
    InvalidAmount,

    #[error("Please select a date")]
    MissingDate,

    #[error("Please enter the date as YYYY-MM-DD")]
    InvalidDate,

    #[error("Please add a note/description")]
    MissingNote,
}

/// Check a candidate's fields in order, stopping at the first failure.
pub fn validate(candidate: &Candidate) -> Result<ValidRecord, ValidationError> {
    let amount = parse_amount(&candidate.amount).ok_or(ValidationError::InvalidAmount)?;

    let date = candidate.date.trim();
    if date.is_empty() {
        return Err(ValidationError::MissingDate);
    }
    let date =
        NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate)?;

    let note = candidate.note.trim();
    if note.is_empty() {
        return Err(ValidationError::MissingNote);
    }

    Ok(ValidRecord {
        amount,
        date,
        note: note.to_string(),
        category: candidate.category,
    })
}

fn parse_amount(raw: &str) -> Option<f64> {
    let value: f64 = raw.trim().parse().ok()?;
    (value.is_finite() && value > 0.0).then_some(value)
}
