use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;
use tracing::{error, info};

use crate::backend::io::rest::admin_apis::require_admin;
use crate::backend::io::rest::errors::{error_response, registry_error_response, ApiError};
use crate::backend::io::rest::mappers::passcode_mapper::PasscodeMapper;
use crate::backend::AppState;
use shared::{CreatePasscodeRequest, CreatePasscodeResponse, DeletePasscodeResponse, PasscodeListResponse};

/// Create the passcode management router (admin only)
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_passcodes).post(create_passcode))
        .route("/:code", delete(delete_passcode))
}

pub async fn list_passcodes(
    State(app_state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PasscodeListResponse>, ApiError> {
    info!("GET /api/passcodes");
    require_admin(&app_state, &headers)?;

    let entries = app_state.passcode_service.list_codes().await;
    Ok(Json(PasscodeMapper::to_list_dto(entries, app_state.clock.today())))
}

pub async fn create_passcode(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreatePasscodeRequest>,
) -> Result<(StatusCode, Json<CreatePasscodeResponse>), ApiError> {
    info!("POST /api/passcodes - code: {:?}", request.code);
    require_admin(&app_state, &headers)?;

    let command = PasscodeMapper::to_create_command(request);
    match app_state.passcode_service.create_code(command).await {
        Ok(entry) => {
            let response = CreatePasscodeResponse {
                passcode: PasscodeMapper::to_dto(entry, app_state.clock.today()),
                success_message: "Code created successfully.".to_string(),
            };
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(e) => {
            error!("Failed to create passcode: {}", e);
            Err(registry_error_response(&e))
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

/// Delete a passcode. The caller must pass `confirm=true`.
pub async fn delete_passcode(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    Path(code): Path<String>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<DeletePasscodeResponse>, ApiError> {
    info!("DELETE /api/passcodes/{} - confirm: {}", code, params.confirm);
    require_admin(&app_state, &headers)?;

    if !params.confirm {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            format!("Delete passcode \"{}\"? Repeat the request with confirm=true.", code),
            "CONFIRMATION_REQUIRED",
        ));
    }

    match app_state.passcode_service.delete_code(&code).await {
        Ok(true) => Ok(Json(DeletePasscodeResponse {
            deleted: true,
            success_message: format!("Passcode {} deleted.", code.trim().to_uppercase()),
        })),
        Ok(false) => Err(error_response(StatusCode::NOT_FOUND, "No such passcode.", "INVALID_CODE")),
        Err(e) => {
            error!("Failed to delete passcode {}: {}", code, e);
            Err(registry_error_response(&e))
        }
    }
}
