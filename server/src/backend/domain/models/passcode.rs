//! Domain model for a class passcode and the errors raised while managing one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::lenient;

/// A teacher-issued passcode bounding a class session by dates and seats.
///
/// Stored as camelCase JSON in the shared passcode list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasscodeEntry {
    pub code: String,
    #[serde(deserialize_with = "lenient::count")]
    pub max_users: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Normalized names of students who have used this code, in admission order
    #[serde(default)]
    pub used_by: Vec<String>,
}

impl PasscodeEntry {
    pub fn new(code: &str, max_users: u32, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            code: normalize_code(code),
            max_users,
            start_date,
            end_date,
            used_by: Vec::new(),
        }
    }

    /// Whether `today` falls inside the window, inclusive on both ends
    pub fn is_open_on(&self, today: NaiveDate) -> bool {
        today >= self.start_date && today <= self.end_date
    }

    pub fn has_member(&self, normalized_name: &str) -> bool {
        self.used_by.iter().any(|n| n == normalized_name)
    }

    /// True once no new student can be admitted
    pub fn is_full(&self) -> bool {
        self.used_by.len() >= self.max_users as usize
    }

    pub fn seats_used(&self) -> u32 {
        self.used_by.len().min(u32::MAX as usize) as u32
    }
}

/// Codes are matched case-insensitively by storing them upper-cased.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Student names are recorded trimmed and lower-cased.
pub fn normalize_student_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please fill in all fields ({0} is missing).")]
    MissingField(&'static str),
    #[error("{field} is not a valid date: {value}")]
    InvalidDate { field: &'static str, value: String },
    #[error("That code already exists: {0}")]
    DuplicateCode(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdmissionError {
    #[error("Please enter your name.")]
    MissingName,
    #[error("Please enter a passcode.")]
    MissingCode,
    #[error("No passcodes set up yet. Please contact your teacher.")]
    RegistryEmpty,
    #[error("Invalid passcode. Please check with your teacher.")]
    InvalidCode,
    #[error("This passcode is only valid from {start} to {end}.")]
    OutOfWindow { start: NaiveDate, end: NaiveDate },
    #[error("This class session is full. Please contact your teacher.")]
    SessionFull,
    #[error("Please log in with your passcode first.")]
    NotAdmitted,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Admission(#[from] AdmissionError),
    /// Concurrent updates kept invalidating our read of the passcode list
    #[error("The passcode list is busy. Please try again.")]
    Contention,
    #[error("The passcode list could not be saved. Please try again.")]
    StorageUnavailable,
}
