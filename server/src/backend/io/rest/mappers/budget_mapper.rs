use shared::{
    BudgetRecord, BudgetSummaryResponse, CatalogResponse, GiftCategoryInfo, GiftGroup, GiftInput,
    GroupTotal, OccasionInfo, OccasionLine, WeekRow, WeeklyPlanResponse,
};

use crate::backend::domain::budget_calculator::{BudgetSummary, TermPlan};
use crate::backend::domain::display::{format_percent, MoneyFormatter};
use crate::backend::domain::models::budget::{GiftEntry, StudentBudgetRecord};
use crate::backend::domain::models::catalog::GiftCatalog;

/// Mapper between budget DTOs and domain models.
pub struct BudgetMapper;

impl BudgetMapper {
    pub fn to_domain(dto: BudgetRecord) -> StudentBudgetRecord {
        StudentBudgetRecord {
            budget: dto.budget,
            gifts: dto
                .gifts
                .into_iter()
                .map(|(category, occasions)| {
                    let occasions = occasions
                        .into_iter()
                        .map(|(occasion, input)| {
                            (occasion, GiftEntry::new(input.amount, input.recipients, input.times_per_year))
                        })
                        .collect();
                    (category, occasions)
                })
                .collect(),
            weekly_actual: dto.weekly_actual,
            weeks_in_term: dto.weeks_in_term,
        }
    }

    pub fn to_dto(domain: StudentBudgetRecord) -> BudgetRecord {
        BudgetRecord {
            budget: domain.budget,
            gifts: domain
                .gifts
                .into_iter()
                .map(|(category, occasions)| {
                    let occasions = occasions
                        .into_iter()
                        .map(|(occasion, entry)| {
                            (
                                occasion,
                                GiftInput {
                                    amount: entry.amount,
                                    recipients: entry.recipients,
                                    times_per_year: entry.times_per_year,
                                },
                            )
                        })
                        .collect();
                    (category, occasions)
                })
                .collect(),
            weekly_actual: domain.weekly_actual,
            weeks_in_term: domain.weeks_in_term,
        }
    }

    pub fn to_summary_dto(summary: &BudgetSummary, formatter: &MoneyFormatter) -> BudgetSummaryResponse {
        let groups = GiftGroup::ALL
            .iter()
            .map(|group| {
                let total = summary.groups.get(*group);
                let share = summary.group_share(*group);
                GroupTotal {
                    group: *group,
                    total,
                    share_of_budget: share,
                    display_total: formatter.format_money(total),
                    display_share: format_percent(share),
                }
            })
            .collect();

        let breakdown = summary
            .breakdown()
            .map(|line| OccasionLine {
                category_id: line.category_id.clone(),
                category_label: line.category_label.clone(),
                occasion: line.occasion.clone(),
                annual_total: line.annual_total,
                display_total: formatter.format_money(line.annual_total),
            })
            .collect();

        BudgetSummaryResponse {
            budget: summary.budget,
            groups,
            total_expenses: summary.total_expenses,
            surplus: summary.surplus,
            surplus_share: summary.surplus_share(),
            display_total_expenses: formatter.format_money(summary.total_expenses),
            display_surplus: formatter.format_money(summary.surplus),
            breakdown,
        }
    }

    pub fn to_weekly_dto(plan: &TermPlan) -> WeeklyPlanResponse {
        WeeklyPlanResponse {
            annual_budget: plan.annual_budget,
            term_budget: plan.term_budget,
            weekly_target: plan.weekly_target,
            weeks_in_term: plan.weeks_in_term,
            weeks: plan
                .weeks
                .iter()
                .map(|w| WeekRow {
                    week: w.week,
                    actual: w.actual,
                    running_remaining: w.running_remaining,
                    expected_remaining: w.expected_remaining,
                    status: w.status,
                })
                .collect(),
        }
    }

    pub fn to_catalog_dto(catalog: &GiftCatalog) -> CatalogResponse {
        CatalogResponse {
            categories: catalog
                .categories()
                .iter()
                .map(|category| GiftCategoryInfo {
                    id: category.id.clone(),
                    label: category.label.clone(),
                    hint: category.hint.clone(),
                    group: category.group,
                    occasions: category
                        .occasions
                        .iter()
                        .map(|name| OccasionInfo {
                            name: name.clone(),
                            fixed_frequency: category.fixed_frequency_for(name),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
