use axum::{extract::State, http::HeaderMap, http::StatusCode, response::Json, routing::post, Router};
use tracing::info;

use crate::backend::domain::commands::admin::AdminLoginCommand;
use crate::backend::io::rest::errors::{error_response, ApiError};
use crate::backend::AppState;
use shared::{AdminLoginRequest, AdminLoginResponse};

/// Header carrying the admin secret on dashboard requests
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// Create the admin API router
pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(admin_login))
}

/// Check an admin password. Wrong passwords get 200 with `success: false`.
#[axum::debug_handler]
pub async fn admin_login(
    State(app_state): State<AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> Json<AdminLoginResponse> {
    info!("POST /api/admin/login");

    let result = app_state.admin_service.login(AdminLoginCommand { password: request.password });
    Json(AdminLoginResponse {
        success: result.success,
        message: result.message,
    })
}

/// Reject the request unless it carries the admin secret
pub fn require_admin(app_state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let attempt = headers
        .get(ADMIN_PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if app_state.admin_service.is_authorized(attempt) {
        Ok(())
    } else {
        info!("Rejected admin request without a valid {} header", ADMIN_PASSWORD_HEADER);
        Err(error_response(StatusCode::UNAUTHORIZED, "Incorrect admin password.", "UNAUTHORIZED"))
    }
}
