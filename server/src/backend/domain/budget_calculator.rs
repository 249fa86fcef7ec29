//! Budget calculations over a student's saved record.
//!
//! Everything here is a pure function of the record and the catalog. Totals
//! are recomputed from scratch on every call; nothing is cached between
//! edits.

use shared::{GiftGroup, WeekStatus};

use crate::backend::domain::models::budget::StudentBudgetRecord;
use crate::backend::domain::models::catalog::GiftCatalog;

/// Float noise allowed when comparing running and expected remaining
/// amounts, relative to the term budget
const PACE_TOLERANCE: f64 = 1e-9;

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Yearly cost of one occasion: amount × recipients × times per year
pub fn occasion_annual_total(amount: f64, recipients: f64, times_per_year: f64) -> f64 {
    finite_or_zero(finite_or_zero(amount) * finite_or_zero(recipients) * finite_or_zero(times_per_year))
}

#[derive(Debug, Clone, PartialEq)]
pub struct OccasionTotal {
    pub category_id: String,
    pub category_label: String,
    pub group: GiftGroup,
    pub occasion: String,
    pub annual_total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroupTotals {
    pub family: f64,
    pub friends: f64,
    pub others: f64,
}

impl GroupTotals {
    pub fn get(&self, group: GiftGroup) -> f64 {
        match group {
            GiftGroup::Family => self.family,
            GiftGroup::Friends => self.friends,
            GiftGroup::Others => self.others,
        }
    }

    fn add(&mut self, group: GiftGroup, amount: f64) {
        match group {
            GiftGroup::Family => self.family += amount,
            GiftGroup::Friends => self.friends += amount,
            GiftGroup::Others => self.others += amount,
        }
    }

    pub fn total(&self) -> f64 {
        self.family + self.friends + self.others
    }
}

/// Annual picture: what the gifts cost against the yearly budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    pub budget: f64,
    pub groups: GroupTotals,
    pub total_expenses: f64,
    pub surplus: f64,
    /// Every occasion in catalog order, including zero totals
    pub occasions: Vec<OccasionTotal>,
}

impl BudgetSummary {
    /// Share of the budget taken by `group`; 0 when no budget is set
    pub fn group_share(&self, group: GiftGroup) -> f64 {
        share(self.groups.get(group), self.budget)
    }

    /// Surplus over budget; negative when gifts cost more than the budget
    pub fn surplus_share(&self) -> f64 {
        share(self.surplus, self.budget)
    }

    /// Occasions that actually cost something
    pub fn breakdown(&self) -> impl Iterator<Item = &OccasionTotal> {
        self.occasions.iter().filter(|o| o.annual_total != 0.0)
    }
}

fn share(part: f64, whole: f64) -> f64 {
    if whole > 0.0 {
        finite_or_zero(part / whole)
    } else {
        0.0
    }
}

/// Annual totals per occasion and per group.
///
/// Occasions with a fixed frequency in the catalog ignore whatever
/// times-per-year the student saved. Gifts saved under categories or
/// occasions the catalog does not know are not counted.
pub fn summarize(record: &StudentBudgetRecord, catalog: &GiftCatalog) -> BudgetSummary {
    let mut groups = GroupTotals { family: 0.0, friends: 0.0, others: 0.0 };
    let mut occasions = Vec::new();

    for category in catalog.categories() {
        for occasion in &category.occasions {
            let annual_total = match record.gift(&category.id, occasion) {
                Some(entry) => {
                    let times = category
                        .fixed_frequency_for(occasion)
                        .unwrap_or(entry.times_per_year);
                    occasion_annual_total(entry.amount, entry.recipients, times)
                }
                None => 0.0,
            };
            groups.add(category.group, annual_total);
            occasions.push(OccasionTotal {
                category_id: category.id.clone(),
                category_label: category.label.clone(),
                group: category.group,
                occasion: occasion.clone(),
                annual_total,
            });
        }
    }

    let budget = finite_or_zero(record.budget);
    let total_expenses = groups.total();

    BudgetSummary {
        budget,
        groups,
        total_expenses,
        surplus: budget - total_expenses,
        occasions,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeekProjection {
    pub week: u32,
    pub actual: f64,
    pub running_remaining: f64,
    pub expected_remaining: f64,
    pub status: Option<WeekStatus>,
}

/// One term's budget split evenly across its weeks
#[derive(Debug, Clone, PartialEq)]
pub struct TermPlan {
    pub annual_budget: f64,
    pub term_budget: f64,
    pub weekly_target: f64,
    pub weeks_in_term: u32,
    /// Weeks `0..=weeks_in_term`; week 0 is the starting checkpoint
    pub weeks: Vec<WeekProjection>,
}

/// Weekly pacing for the current term.
///
/// The running remaining amount is a single prefix sum over the weekly
/// actuals. Week 0 is never treated as spending.
pub fn term_plan(
    record: &StudentBudgetRecord,
    terms_per_year: u32,
    default_weeks: u32,
) -> TermPlan {
    let annual_budget = finite_or_zero(record.budget);
    let term_budget = annual_budget / terms_per_year.max(1) as f64;
    let weeks_in_term = record.effective_weeks(default_weeks);
    let weekly_target = term_budget / weeks_in_term as f64;
    let tolerance = PACE_TOLERANCE * term_budget.abs().max(1.0);

    let mut spent = 0.0;
    let mut weeks = Vec::with_capacity(weeks_in_term as usize + 1);

    for week in 0..=weeks_in_term {
        let actual = if week == 0 { 0.0 } else { finite_or_zero(record.actual_for_week(week)) };
        spent += actual;

        let running_remaining = term_budget - spent;
        let expected_remaining = term_budget - week as f64 * weekly_target;
        let status = (week > 0).then(|| {
            if running_remaining + tolerance >= expected_remaining {
                WeekStatus::OnTrack
            } else {
                WeekStatus::Overspent
            }
        });

        weeks.push(WeekProjection {
            week,
            actual,
            running_remaining,
            expected_remaining,
            status,
        });
    }

    TermPlan {
        annual_budget,
        term_budget,
        weekly_target,
        weeks_in_term,
        weeks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::budget::GiftEntry;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.005
    }

    #[test]
    fn test_occasion_total_multiplies() {
        assert_eq!(occasion_annual_total(10.0, 3.0, 2.0), 60.0);
    }

    #[test]
    fn test_occasion_total_zero_when_any_factor_zero() {
        for (a, r, t) in [(0.0, 3.0, 2.0), (10.0, 0.0, 2.0), (10.0, 3.0, 0.0)] {
            assert_eq!(occasion_annual_total(a, r, t), 0.0);
        }
    }

    #[test]
    fn test_occasion_total_ignores_non_finite_inputs() {
        assert_eq!(occasion_annual_total(f64::NAN, 3.0, 2.0), 0.0);
        assert_eq!(occasion_annual_total(10.0, f64::INFINITY, 2.0), 0.0);
    }

    fn sample_record() -> StudentBudgetRecord {
        let mut record = StudentBudgetRecord::blank(9);
        record.budget = 500.0;
        record.set_gift("immFamily", "Birthdays", GiftEntry::new(20.0, 4.0, 1.0)); // 80
        record.set_gift("extFamily", "Religious holiday(s)", GiftEntry::new(10.0, 5.0, 2.0)); // 100
        record.set_gift("friends", "Birthdays", GiftEntry::new(8.0, 6.0, 1.0)); // 48
        record.set_gift("others", "Teachers (end of term/year)", GiftEntry::new(5.0, 2.0, 3.0)); // 30
        record
    }

    #[test]
    fn test_group_totals() {
        let summary = summarize(&sample_record(), &GiftCatalog::builtin());
        assert_eq!(summary.groups.family, 180.0);
        assert_eq!(summary.groups.friends, 48.0);
        assert_eq!(summary.groups.others, 30.0);
    }

    #[test]
    fn test_total_is_sum_of_groups() {
        let summary = summarize(&sample_record(), &GiftCatalog::builtin());
        let by_group: f64 = GiftGroup::ALL.iter().map(|g| summary.groups.get(*g)).sum();
        assert_eq!(summary.total_expenses, by_group);
        assert_eq!(summary.total_expenses, 258.0);

        let by_occasion: f64 = summary.occasions.iter().map(|o| o.annual_total).sum();
        assert_eq!(summary.total_expenses, by_occasion);
    }

    #[test]
    fn test_surplus_may_go_negative() {
        let mut record = sample_record();
        record.budget = 200.0;
        let summary = summarize(&record, &GiftCatalog::builtin());
        assert_eq!(summary.surplus, -58.0);
        assert!(approx(summary.surplus_share(), -0.29));
    }

    #[test]
    fn test_fixed_frequency_overrides_saved_times() {
        let mut record = StudentBudgetRecord::blank(9);
        record.set_gift("immFamily", "Mother's Day", GiftEntry::new(15.0, 1.0, 12.0));
        let summary = summarize(&record, &GiftCatalog::builtin());
        assert_eq!(summary.groups.family, 15.0);
    }

    #[test]
    fn test_fixed_frequency_applies_even_when_times_blank() {
        let mut record = StudentBudgetRecord::blank(9);
        record.set_gift("immFamily", "Father's Day", GiftEntry::new(12.0, 1.0, 0.0));
        let summary = summarize(&record, &GiftCatalog::builtin());
        assert_eq!(summary.total_expenses, 12.0);
    }

    #[test]
    fn test_unknown_categories_are_not_counted() {
        let mut record = StudentBudgetRecord::blank(9);
        record.set_gift("pets", "Birthdays", GiftEntry::new(10.0, 1.0, 1.0));
        let summary = summarize(&record, &GiftCatalog::builtin());
        assert_eq!(summary.total_expenses, 0.0);
    }

    #[test]
    fn test_breakdown_skips_zero_lines() {
        let summary = summarize(&sample_record(), &GiftCatalog::builtin());
        let lines: Vec<_> = summary.breakdown().map(|o| o.occasion.as_str()).collect();
        assert_eq!(lines, vec!["Birthdays", "Religious holiday(s)", "Birthdays", "Teachers (end of term/year)"]);
    }

    #[test]
    fn test_shares_are_zero_without_budget() {
        let mut record = sample_record();
        record.budget = 0.0;
        let summary = summarize(&record, &GiftCatalog::builtin());
        assert_eq!(summary.group_share(GiftGroup::Family), 0.0);
        assert_eq!(summary.surplus_share(), 0.0);
    }

    #[test]
    fn test_term_plan_overspent_scenario() {
        let mut record = StudentBudgetRecord::blank(9);
        record.budget = 1200.0;
        record.weekly_actual = vec![0.0, 50.0];

        let plan = term_plan(&record, 3, 9);
        assert_eq!(plan.term_budget, 400.0);
        assert!(approx(plan.weekly_target, 44.44));
        assert_eq!(plan.weeks.len(), 10);

        let week1 = &plan.weeks[1];
        assert_eq!(week1.running_remaining, 350.0);
        assert!(approx(week1.expected_remaining, 355.56));
        assert_eq!(week1.status, Some(WeekStatus::Overspent));
    }

    #[test]
    fn test_week_zero_is_a_checkpoint() {
        let mut record = StudentBudgetRecord::blank(9);
        record.budget = 1200.0;
        record.weekly_actual = vec![999.0];

        let plan = term_plan(&record, 3, 9);
        let week0 = &plan.weeks[0];
        assert_eq!(week0.actual, 0.0);
        assert_eq!(week0.running_remaining, 400.0);
        assert_eq!(week0.expected_remaining, 400.0);
        assert_eq!(week0.status, None);
    }

    #[test]
    fn test_spending_on_target_ends_at_zero() {
        let mut record = StudentBudgetRecord::blank(9);
        record.budget = 1000.0;
        let target = 1000.0 / 3.0 / 9.0;
        record.weekly_actual = std::iter::once(0.0).chain(std::iter::repeat(target).take(9)).collect();

        let plan = term_plan(&record, 3, 9);
        let last = plan.weeks.last().unwrap();
        assert_eq!(last.week, 9);
        assert!(last.running_remaining.abs() < 1e-9);
        assert!(plan.weeks[1..].iter().all(|w| w.status == Some(WeekStatus::OnTrack)));
    }

    #[test]
    fn test_underspending_is_on_track() {
        let mut record = StudentBudgetRecord::blank(4);
        record.budget = 300.0;
        record.weekly_actual = vec![0.0, 10.0, 10.0];

        let plan = term_plan(&record, 3, 9);
        assert_eq!(plan.weeks_in_term, 4);
        assert_eq!(plan.weeks[2].running_remaining, 80.0);
        assert_eq!(plan.weeks[2].status, Some(WeekStatus::OnTrack));
        // No spend recorded for weeks 3-4
        assert_eq!(plan.weeks[4].running_remaining, 80.0);
    }

    #[test]
    fn test_zero_weeks_uses_default() {
        let mut record = StudentBudgetRecord::blank(0);
        record.budget = 90.0;
        let plan = term_plan(&record, 3, 6);
        assert_eq!(plan.weeks_in_term, 6);
        assert_eq!(plan.weekly_target, 5.0);
    }

    #[test]
    fn test_custom_terms_per_year() {
        let mut record = StudentBudgetRecord::blank(10);
        record.budget = 1200.0;
        let plan = term_plan(&record, 4, 9);
        assert_eq!(plan.term_budget, 300.0);
        assert_eq!(plan.weekly_target, 30.0);
    }

    #[test]
    fn test_hostile_term_length_gives_bounded_plan() {
        let record: StudentBudgetRecord =
            serde_json::from_value(serde_json::json!({ "budget": 1200, "weeksInTerm": "1e12" })).unwrap();

        let plan = term_plan(&record, 3, 9);
        assert_eq!(plan.weeks_in_term, 52);
        assert_eq!(plan.weeks.len(), 53);
        assert!(approx(plan.weekly_target, 400.0 / 52.0));
    }

    #[test]
    fn test_large_budget_on_target_stays_on_track() {
        let mut record = StudentBudgetRecord::blank(9);
        record.budget = 3e12;
        let target = 3e12 / 3.0 / 9.0;
        record.weekly_actual = std::iter::once(0.0).chain(std::iter::repeat(target).take(9)).collect();

        let plan = term_plan(&record, 3, 9);
        assert!(plan.weeks[1..].iter().all(|w| w.status == Some(WeekStatus::OnTrack)));
    }

    #[test]
    fn test_large_budget_still_flags_small_overspend() {
        let mut record = StudentBudgetRecord::blank(9);
        record.budget = 3e12;
        let target = 3e12 / 3.0 / 9.0;
        record.weekly_actual = vec![0.0, target + 1.0];

        let plan = term_plan(&record, 3, 9);
        assert_eq!(plan.weeks[1].status, Some(WeekStatus::Overspent));
    }
}
