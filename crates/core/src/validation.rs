//! Input validation utilities.
//!
//! These turn raw values arriving from the API or CLI into the validated types the rest of the
//! core works with. Nothing is touched in the store until these checks pass.

use crate::constants::{MAX_NAME_LEN, MAX_SEARCH_TERM_LEN};
use crate::patient::PatientId;
use crate::{PatientError, PatientResult};
use er_types::{NonEmptyText, Severity};

/// Validates a patient name supplied at admission.
///
/// # Errors
///
/// Returns `PatientError::InvalidName` if the name is empty or whitespace, or
/// `PatientError::InvalidInput` if it is longer than [`MAX_NAME_LEN`] characters.
pub fn validate_patient_name(name: &str) -> PatientResult<NonEmptyText> {
    let name = NonEmptyText::new(name)?;
    if name.as_str().chars().count() > MAX_NAME_LEN {
        return Err(PatientError::InvalidInput(format!(
            "name exceeds maximum length of {} characters",
            MAX_NAME_LEN
        )));
    }
    Ok(name)
}

/// Validates a severity score.
///
/// # Errors
///
/// Returns `PatientError::InvalidSeverity` if `severity` is outside 1..=10.
pub fn validate_severity(severity: i64) -> PatientResult<Severity> {
    Ok(Severity::new(severity)?)
}

/// Parses an externally supplied patient identifier.
///
/// # Errors
///
/// Returns `PatientError::InvalidId` if `id` is not a canonical identifier.
pub fn parse_patient_id(id: &str) -> PatientResult<PatientId> {
    Ok(PatientId::parse(id)?)
}

/// Normalises a name-search term.
///
/// Surrounding whitespace is dropped. An empty term is allowed and matches every record.
///
/// # Errors
///
/// Returns `PatientError::InvalidInput` if the term exceeds [`MAX_SEARCH_TERM_LEN`] characters.
pub fn validate_search_term(term: &str) -> PatientResult<&str> {
    let term = term.trim();
    if term.chars().count() > MAX_SEARCH_TERM_LEN {
        return Err(PatientError::InvalidInput(format!(
            "search term exceeds maximum length of {} characters",
            MAX_SEARCH_TERM_LEN
        )));
    }
    Ok(term)
}
