use axum::{extract::State, response::Json, routing::post, Router};
use tracing::info;

use crate::backend::io::rest::errors::{registry_error_response, ApiError};
use crate::backend::io::rest::mappers::passcode_mapper::PasscodeMapper;
use crate::backend::AppState;
use shared::{StudentLoginRequest, StudentLoginResponse};

/// Create the student login router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(student_login))
}

/// Admit a student with their name and class passcode
#[axum::debug_handler]
pub async fn student_login(
    State(app_state): State<AppState>,
    Json(request): Json<StudentLoginRequest>,
) -> Result<Json<StudentLoginResponse>, ApiError> {
    info!("POST /api/sessions - code: {:?}", request.code);

    let command = PasscodeMapper::to_admit_command(request, app_state.clock.today());
    app_state
        .passcode_service
        .admit(command)
        .await
        .map(|session| Json(PasscodeMapper::to_login_dto(session)))
        .map_err(|e| registry_error_response(&e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::commands::passcode::CreatePasscodeCommand;
    use crate::backend::io::rest::test_support::{read_json, test_state};
    use axum::{body::Body, http::{Method, Request, StatusCode}};
    use serde_json::{json, Value};
    use tower::util::ServiceExt; // for `oneshot`

    fn login(name: &str, code: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header("content-type", "application/json")
            .body(Body::from(json!({ "name": name, "code": code }).to_string()))
            .unwrap()
    }

    async fn state_with_code(max_users: u32) -> AppState {
        let state = test_state();
        state
            .passcode_service
            .create_code(CreatePasscodeCommand {
                code: "CLASS2024".to_string(),
                max_users,
                start_date: "2024-09-01".to_string(),
                end_date: "2024-12-20".to_string(),
            })
            .await
            .unwrap();
        state
    }

    #[tokio::test]
    async fn test_login_success() {
        let app = router().with_state(state_with_code(2).await);
        let response = app.oneshot(login(" Alice ", "class2024")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: StudentLoginResponse = read_json(response).await;
        assert_eq!(body.student_name, "Alice");
        assert_eq!(body.normalized_name, "alice");
        assert_eq!(body.code, "CLASS2024");
    }

    #[tokio::test]
    async fn test_login_when_full() {
        let app = router().with_state(state_with_code(1).await);
        app.clone().oneshot(login("Alice", "CLASS2024")).await.unwrap();

        let response = app.clone().oneshot(login("Bob", "CLASS2024")).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body: Value = read_json(response).await;
        assert_eq!(body["code"], "SESSION_FULL");

        let response = app.oneshot(login("alice", "CLASS2024")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_login_without_any_codes() {
        let app = router().with_state(test_state());
        let response = app.oneshot(login("Alice", "CLASS2024")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body: Value = read_json(response).await;
        assert_eq!(body["code"], "REGISTRY_EMPTY");
        assert_eq!(body["error"], "No passcodes set up yet. Please contact your teacher.");
    }

    #[tokio::test]
    async fn test_login_missing_name() {
        let app = router().with_state(state_with_code(1).await);
        let response = app.oneshot(login("   ", "CLASS2024")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
