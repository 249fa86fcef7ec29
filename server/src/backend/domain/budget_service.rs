//! Loading, saving and evaluating a student's budget.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::backend::domain::budget_calculator::{self, BudgetSummary, TermPlan};
use crate::backend::domain::display::MoneyFormatter;
use crate::backend::domain::models::budget::StudentBudgetRecord;
use crate::backend::domain::models::catalog::GiftCatalog;
use crate::backend::domain::models::session::StudentSession;
use crate::backend::storage::repositories::BudgetRepository;
use crate::backend::storage::KeyValueStorage;
use crate::config::AppConfig;

#[derive(Clone)]
pub struct BudgetService {
    repository: BudgetRepository,
    config: Arc<AppConfig>,
    formatter: MoneyFormatter,
}

impl BudgetService {
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: Arc<AppConfig>) -> Self {
        let formatter = MoneyFormatter::new(config.currency_symbol.clone());
        Self {
            repository: BudgetRepository::new(storage),
            config,
            formatter,
        }
    }

    pub fn catalog(&self) -> &GiftCatalog {
        &self.config.catalog
    }

    pub fn formatter(&self) -> &MoneyFormatter {
        &self.formatter
    }

    /// The student's saved record, or a blank one on first use
    pub async fn load_record(&self, session: &StudentSession) -> StudentBudgetRecord {
        match self.repository.load(&session.storage_key()).await {
            Some(record) => record,
            None => {
                info!("No saved budget for {} on {}, starting blank", session.normalized_name, session.code);
                StudentBudgetRecord::blank(self.config.weeks_per_term)
            }
        }
    }

    /// Overwrite the student's record. Fixed-frequency occasions are stored
    /// with their catalog frequency, and the term length is stored as the
    /// default when missing and capped when too long.
    pub async fn save_record(&self, session: &StudentSession, mut record: StudentBudgetRecord) -> Result<StudentBudgetRecord> {
        for category in self.config.catalog.categories() {
            if let Some(occasions) = record.gifts.get_mut(&category.id) {
                for (occasion, entry) in occasions.iter_mut() {
                    if let Some(times) = category.fixed_frequency_for(occasion) {
                        entry.times_per_year = times;
                    }
                }
            }
        }
        record.weeks_in_term = record.effective_weeks(self.config.weeks_per_term);

        self.repository.save(&session.storage_key(), &record).await?;
        info!("Saved budget for {} on {}", session.normalized_name, session.code);
        Ok(record)
    }

    pub fn summarize(&self, record: &StudentBudgetRecord) -> BudgetSummary {
        budget_calculator::summarize(record, &self.config.catalog)
    }

    pub fn term_plan(&self, record: &StudentBudgetRecord) -> TermPlan {
        budget_calculator::term_plan(record, self.config.terms_per_year, self.config.weeks_per_term)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::budget::{GiftEntry, MAX_WEEKS_IN_TERM};
    use crate::backend::storage::MemoryStore;
    use shared::WeekStatus;

    fn setup_test() -> BudgetService {
        BudgetService::new(Arc::new(MemoryStore::new()), Arc::new(AppConfig::default()))
    }

    #[tokio::test]
    async fn test_first_load_is_blank() {
        let service = setup_test();
        let record = service.load_record(&StudentSession::new("Alice", "C")).await;
        assert_eq!(record, StudentBudgetRecord::blank(9));
    }

    #[tokio::test]
    async fn test_save_then_load_round_trip() {
        let service = setup_test();
        let session = StudentSession::new("Alice", "CLASS2024");

        let mut record = StudentBudgetRecord::blank(10);
        record.budget = 1200.0;
        record.set_gift("friends", "Birthdays", GiftEntry::new(10.0, 5.0, 1.0));
        record.weekly_actual = vec![0.0, 25.0, 40.0];

        let saved = service.save_record(&session, record.clone()).await.unwrap();
        assert_eq!(saved, record);

        let loaded = service.load_record(&StudentSession::new(" alice ", "class2024")).await;
        assert_eq!(loaded.budget, 1200.0);
        assert_eq!(loaded.gifts, record.gifts);
        assert_eq!(loaded.weekly_actual, record.weekly_actual);
        assert_eq!(loaded.weeks_in_term, 10);
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let service = setup_test();
        let session = StudentSession::new("Alice", "C");

        let mut first = StudentBudgetRecord::blank(9);
        first.budget = 100.0;
        service.save_record(&session, first).await.unwrap();

        let mut second = StudentBudgetRecord::blank(9);
        second.budget = 250.0;
        service.save_record(&session, second).await.unwrap();

        assert_eq!(service.load_record(&session).await.budget, 250.0);
    }

    #[tokio::test]
    async fn test_save_applies_fixed_frequency_and_default_weeks() {
        let service = setup_test();
        let session = StudentSession::new("Alice", "C");

        let mut record = StudentBudgetRecord::blank(0);
        record.set_gift("immFamily", "Mother's Day", GiftEntry::new(20.0, 1.0, 4.0));
        record.set_gift("immFamily", "Birthdays", GiftEntry::new(20.0, 1.0, 4.0));

        let saved = service.save_record(&session, record).await.unwrap();
        assert_eq!(saved.gift("immFamily", "Mother's Day").unwrap().times_per_year, 1.0);
        assert_eq!(saved.gift("immFamily", "Birthdays").unwrap().times_per_year, 4.0);
        assert_eq!(saved.weeks_in_term, 9);
    }

    #[tokio::test]
    async fn test_save_caps_term_length() {
        let service = setup_test();
        let session = StudentSession::new("Alice", "C");

        let mut record = StudentBudgetRecord::blank(u32::MAX);
        record.budget = 1200.0;
        let saved = service.save_record(&session, record).await.unwrap();
        assert_eq!(saved.weeks_in_term, MAX_WEEKS_IN_TERM);

        let plan = service.term_plan(&service.load_record(&session).await);
        assert_eq!(plan.weeks_in_term, MAX_WEEKS_IN_TERM);
        assert_eq!(plan.weeks.len(), MAX_WEEKS_IN_TERM as usize + 1);
    }

    #[tokio::test]
    async fn test_students_do_not_share_records() {
        let service = setup_test();
        let mut record = StudentBudgetRecord::blank(9);
        record.budget = 75.0;
        service.save_record(&StudentSession::new("Alice", "C"), record).await.unwrap();

        assert_eq!(service.load_record(&StudentSession::new("Bob", "C")).await.budget, 0.0);
        assert_eq!(service.load_record(&StudentSession::new("Alice", "D")).await.budget, 0.0);
    }

    #[test]
    fn test_term_plan_uses_config() {
        let service = setup_test();
        let mut record = StudentBudgetRecord::blank(9);
        record.budget = 1200.0;
        record.weekly_actual = vec![0.0, 50.0];

        let plan = service.term_plan(&record);
        assert_eq!(plan.term_budget, 400.0);
        assert_eq!(plan.weeks[1].status, Some(WeekStatus::Overspent));
    }
}
