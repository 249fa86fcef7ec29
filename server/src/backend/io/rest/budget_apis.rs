//! # REST API for Student Budgets
//!
//! Every route is scoped to `/:code/:name`. The student must already have
//! been admitted to the code, and the code must be open today.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::{error, info};

use crate::backend::domain::models::session::StudentSession;
use crate::backend::io::rest::errors::{error_response, registry_error_response, ApiError};
use crate::backend::io::rest::mappers::budget_mapper::BudgetMapper;
use crate::backend::AppState;
use shared::{BudgetRecord, BudgetSummaryResponse, SaveBudgetResponse, WeeklyPlanResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:code/:name", get(get_budget).put(save_budget))
        .route("/:code/:name/summary", get(get_summary))
        .route("/:code/:name/weekly", get(get_weekly_plan))
}

async fn authorize(app_state: &AppState, code: &str, name: &str) -> Result<StudentSession, ApiError> {
    app_state
        .passcode_service
        .verify_session(name, code, app_state.clock.today())
        .await
        .map_err(|e| registry_error_response(&e))
}

pub async fn get_budget(
    State(app_state): State<AppState>,
    Path((code, name)): Path<(String, String)>,
) -> Result<Json<BudgetRecord>, ApiError> {
    info!("GET /api/budgets/{}/{}", code, name);
    let session = authorize(&app_state, &code, &name).await?;

    let record = app_state.budget_service.load_record(&session).await;
    Ok(Json(BudgetMapper::to_dto(record)))
}

/// Replace the student's whole record
pub async fn save_budget(
    State(app_state): State<AppState>,
    Path((code, name)): Path<(String, String)>,
    Json(request): Json<BudgetRecord>,
) -> Result<Json<SaveBudgetResponse>, ApiError> {
    info!("PUT /api/budgets/{}/{}", code, name);
    let session = authorize(&app_state, &code, &name).await?;

    let record = BudgetMapper::to_domain(request);
    match app_state.budget_service.save_record(&session, record).await {
        Ok(saved) => Ok(Json(SaveBudgetResponse {
            record: BudgetMapper::to_dto(saved),
            success_message: "Budget saved.".to_string(),
        })),
        Err(e) => {
            error!("Failed to save budget for {} on {}: {:#}", session.normalized_name, session.code, e);
            Err(error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "Your budget could not be saved. Please try again.",
                "STORAGE_UNAVAILABLE",
            ))
        }
    }
}

pub async fn get_summary(
    State(app_state): State<AppState>,
    Path((code, name)): Path<(String, String)>,
) -> Result<Json<BudgetSummaryResponse>, ApiError> {
    info!("GET /api/budgets/{}/{}/summary", code, name);
    let session = authorize(&app_state, &code, &name).await?;

    let record = app_state.budget_service.load_record(&session).await;
    let summary = app_state.budget_service.summarize(&record);
    Ok(Json(BudgetMapper::to_summary_dto(&summary, app_state.budget_service.formatter())))
}

pub async fn get_weekly_plan(
    State(app_state): State<AppState>,
    Path((code, name)): Path<(String, String)>,
) -> Result<Json<WeeklyPlanResponse>, ApiError> {
    info!("GET /api/budgets/{}/{}/weekly", code, name);
    let session = authorize(&app_state, &code, &name).await?;

    let record = app_state.budget_service.load_record(&session).await;
    let plan = app_state.budget_service.term_plan(&record);
    Ok(Json(BudgetMapper::to_weekly_dto(&plan)))
}
