use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Grouping used by the summary view; every gift category belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GiftGroup {
    Family,
    Friends,
    Others,
}

impl GiftGroup {
    /// All groups in display order
    pub const ALL: [GiftGroup; 3] = [GiftGroup::Family, GiftGroup::Friends, GiftGroup::Others];

    pub fn as_str(&self) -> &'static str {
        match self {
            GiftGroup::Family => "Family",
            GiftGroup::Friends => "Friends",
            GiftGroup::Others => "Others",
        }
    }
}

impl fmt::Display for GiftGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pacing status of a week in the term plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStatus {
    /// Running remaining is at or above the evenly paced expectation
    OnTrack,
    /// More has been spent than even pacing allows
    Overspent,
}

// ---------------------------------------------------------------------------
// Admin
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Passcodes
// ---------------------------------------------------------------------------

/// Passcode as shown on the teacher's dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passcode {
    pub code: String,
    pub max_users: u32,
    /// ISO date (YYYY-MM-DD)
    pub start_date: String,
    /// ISO date (YYYY-MM-DD)
    pub end_date: String,
    pub used_by: Vec<String>,
    pub seats_used: u32,
    /// True when today falls inside the validity window
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePasscodeRequest {
    pub code: String,
    #[serde(default = "default_max_users")]
    pub max_users: u32,
    pub start_date: String,
    pub end_date: String,
}

fn default_max_users() -> u32 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePasscodeResponse {
    pub passcode: Passcode,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasscodeListResponse {
    pub passcodes: Vec<Passcode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePasscodeResponse {
    pub deleted: bool,
    pub success_message: String,
}

// ---------------------------------------------------------------------------
// Student sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLoginRequest {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentLoginResponse {
    /// Name as typed (trimmed)
    pub student_name: String,
    /// Lower-cased name recorded against the passcode
    pub normalized_name: String,
    pub code: String,
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

/// One occasion's inputs. Numbers may arrive as strings from form fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GiftInput {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub recipients: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub times_per_year: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetRecord {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub budget: f64,
    /// category id -> occasion -> inputs
    #[serde(default)]
    pub gifts: BTreeMap<String, BTreeMap<String, GiftInput>>,
    /// Indexed by week number; index 0 is the term start and is ignored
    #[serde(default, deserialize_with = "lenient::amounts")]
    pub weekly_actual: Vec<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub weeks_in_term: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveBudgetResponse {
    pub record: BudgetRecord,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub group: GiftGroup,
    pub total: f64,
    /// Fraction of the annual budget (0.0 when no budget is set)
    pub share_of_budget: f64,
    pub display_total: String,
    pub display_share: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccasionLine {
    pub category_id: String,
    pub category_label: String,
    pub occasion: String,
    pub annual_total: f64,
    pub display_total: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummaryResponse {
    pub budget: f64,
    pub groups: Vec<GroupTotal>,
    pub total_expenses: f64,
    pub surplus: f64,
    /// Surplus as a fraction of the budget; negative when overspending
    pub surplus_share: f64,
    pub display_total_expenses: String,
    pub display_surplus: String,
    pub breakdown: Vec<OccasionLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekRow {
    pub week: u32,
    pub actual: f64,
    pub running_remaining: f64,
    pub expected_remaining: f64,
    /// None for week 0
    pub status: Option<WeekStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlanResponse {
    pub annual_budget: f64,
    pub term_budget: f64,
    pub weekly_target: f64,
    pub weeks_in_term: u32,
    pub weeks: Vec<WeekRow>,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccasionInfo {
    pub name: String,
    /// Set when the occasion always happens a fixed number of times per year
    pub fixed_frequency: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftCategoryInfo {
    pub id: String,
    pub label: String,
    pub hint: String,
    pub group: GiftGroup,
    pub occasions: Vec<OccasionInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub categories: Vec<GiftCategoryInfo>,
}

/// Forgiving numeric parsing for values typed into form fields.
///
/// Anything that does not read as a number becomes `0.0` instead of an error,
/// so a half-filled form never fails to load or save.
pub mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    /// Parse the leading numeric part of `input`, the way a browser's
    /// `parseFloat` would. Empty or non-numeric input yields `0.0`.
    pub fn parse_amount(input: &str) -> f64 {
        let trimmed = input.trim();
        let candidate: String = trimmed
            .chars()
            .take_while(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
            .collect();

        // Shrink from the right until something parses ("12e" -> "12")
        let mut end = candidate.len();
        while end > 0 {
            if let Ok(value) = candidate[..end].parse::<f64>() {
                return if value.is_finite() { value } else { 0.0 };
            }
            end -= 1;
        }
        0.0
    }

    /// Interpret an arbitrary JSON value as an amount
    pub fn value_to_amount(value: &Value) -> f64 {
        match value {
            Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
            Value::String(s) => parse_amount(s),
            _ => 0.0,
        }
    }

    pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(value_to_amount(&value))
    }

    pub fn amounts<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::Array(items) => items.iter().map(value_to_amount).collect(),
            _ => Vec::new(),
        })
    }

    /// Whole, non-negative count (truncates like `parseInt`)
    pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let amount = value_to_amount(&value);
        if amount <= 0.0 {
            Ok(0)
        } else if amount >= u32::MAX as f64 {
            Ok(u32::MAX)
        } else {
            Ok(amount.trunc() as u32)
        }
    }
}
