use axum::{extract::State, response::Json, routing::get, Router};
use tracing::info;

use crate::backend::io::rest::mappers::budget_mapper::BudgetMapper;
use crate::backend::AppState;
use shared::CatalogResponse;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_catalog))
}

/// The gift categories and occasions a budget form should show
pub async fn get_catalog(State(app_state): State<AppState>) -> Json<CatalogResponse> {
    info!("GET /api/catalog");
    Json(BudgetMapper::to_catalog_dto(app_state.budget_service.catalog()))
}
