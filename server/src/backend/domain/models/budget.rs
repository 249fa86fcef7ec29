//! Domain model for a student's saved budget.

use serde::{Deserialize, Serialize};
use shared::lenient;
use std::collections::BTreeMap;

/// Longest term a record may describe, in weeks
pub const MAX_WEEKS_IN_TERM: u32 = 52;

/// Inputs for one gift occasion
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftEntry {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub amount: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub recipients: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub times_per_year: f64,
}

impl GiftEntry {
    pub fn new(amount: f64, recipients: f64, times_per_year: f64) -> Self {
        Self { amount, recipients, times_per_year }
    }
}

/// Everything one student saves under one passcode. Each save overwrites the
/// previous record; there is no history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentBudgetRecord {
    #[serde(default, deserialize_with = "lenient::amount")]
    pub budget: f64,
    /// category id -> occasion -> inputs
    #[serde(default)]
    pub gifts: BTreeMap<String, BTreeMap<String, GiftEntry>>,
    /// Actual spend by week number; index 0 is the term start checkpoint
    #[serde(default, deserialize_with = "lenient::amounts")]
    pub weekly_actual: Vec<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    pub weeks_in_term: u32,
}

impl StudentBudgetRecord {
    /// Blank record for a first-time student
    pub fn blank(weeks_in_term: u32) -> Self {
        Self {
            weeks_in_term,
            ..Default::default()
        }
    }

    pub fn gift(&self, category_id: &str, occasion: &str) -> Option<&GiftEntry> {
        self.gifts.get(category_id).and_then(|occasions| occasions.get(occasion))
    }

    pub fn set_gift(&mut self, category_id: &str, occasion: &str, entry: GiftEntry) {
        self.gifts
            .entry(category_id.to_string())
            .or_default()
            .insert(occasion.to_string(), entry);
    }

    /// Actual spend recorded for `week`; missing weeks count as nothing spent
    pub fn actual_for_week(&self, week: u32) -> f64 {
        self.weekly_actual.get(week as usize).copied().unwrap_or(0.0)
    }

    /// Weeks per term, falling back to `default_weeks` when unset and
    /// capped at [`MAX_WEEKS_IN_TERM`]
    pub fn effective_weeks(&self, default_weeks: u32) -> u32 {
        let weeks = if self.weeks_in_term == 0 { default_weeks } else { self.weeks_in_term };
        weeks.clamp(1, MAX_WEEKS_IN_TERM)
    }
}
