//! An admitted student session and the storage key it owns.

use super::passcode::{normalize_code, normalize_student_name};

/// Namespace for per-student budget records
pub const BUDGET_KEY_PREFIX: &str = "budget:data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSession {
    /// Name as typed at login, trimmed
    pub display_name: String,
    pub normalized_name: String,
    pub code: String,
}

impl StudentSession {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            display_name: name.trim().to_string(),
            normalized_name: normalize_student_name(name),
            code: normalize_code(code),
        }
    }

    /// Key of this student's budget record: `budget:data:{CODE}:{name_slug}`
    pub fn storage_key(&self) -> String {
        format!("{}:{}:{}", BUDGET_KEY_PREFIX, self.code, name_slug(&self.normalized_name))
    }
}

/// Lower-cased name with every whitespace run collapsed to `_`
pub fn name_slug(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
