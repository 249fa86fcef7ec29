//! Shared fixtures for the REST handler tests.

use axum::response::Response;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::backend::domain::{AdminService, BudgetService, Clock, PasscodeService};
use crate::backend::storage::{KeyValueStorage, MemoryStore};
use crate::backend::AppState;
use crate::config::AppConfig;

/// Inside the window of the codes the tests create
pub fn test_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 10, 1).unwrap()
}

pub fn test_state() -> AppState {
    let config = Arc::new(AppConfig::default());
    let storage: Arc<dyn KeyValueStorage> = Arc::new(MemoryStore::new());
    AppState {
        passcode_service: PasscodeService::new(storage.clone()),
        budget_service: BudgetService::new(storage, config.clone()),
        admin_service: AdminService::new(config.admin_password.clone()),
        clock: Clock::Fixed(test_today()),
    }
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
