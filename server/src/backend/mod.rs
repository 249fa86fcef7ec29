//! # Backend Module
//!
//! Everything behind the HTTP port of the gift budget planner.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (REST handlers, DTO mappers)
//!     ↓
//! Domain Layer (passcode registry, budget calculator)
//!     ↓
//! Storage Layer (key-value store: SQLite or memory)
//! ```
//!
//! [`initialize_backend`] opens storage and builds the services;
//! [`create_router`] mounts the REST routes with CORS for the web client.

pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::backend::domain::{AdminService, BudgetService, Clock, PasscodeService};
use crate::backend::io::rest::{admin_apis, budget_apis, catalog_apis, passcode_apis, session_apis};
use crate::config::AppConfig;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub passcode_service: PasscodeService,
    pub budget_service: BudgetService,
    pub admin_service: AdminService,
    pub clock: Clock,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: Arc<AppConfig>) -> Result<AppState> {
    info!("Setting up storage at {}", config.database_url);
    let storage = storage::open_storage(&config.database_url).await?;

    info!("Setting up domain services");
    let passcode_service = PasscodeService::new(storage.clone());
    let budget_service = BudgetService::new(storage, config.clone());
    let admin_service = AdminService::new(config.admin_password.clone());

    Ok(AppState {
        passcode_service,
        budget_service,
        admin_service,
        clock: Clock::System,
    })
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, allowed_origin: &str) -> Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed_origin {:?}", allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api_routes = Router::new()
        .nest("/admin", admin_apis::router())
        .nest("/passcodes", passcode_apis::router())
        .nest("/sessions", session_apis::router())
        .nest("/budgets", budget_apis::router())
        .nest("/catalog", catalog_apis::router());

    Ok(Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::io::rest::admin_apis::ADMIN_PASSWORD_HEADER;
    use crate::backend::io::rest::test_support::{read_json, test_state};
    use axum::{body::Body, http::{Request, StatusCode}};
    use serde_json::{json, Value};
    use shared::{CreatePasscodeResponse, StudentLoginResponse, SaveBudgetResponse};
    use tower::util::ServiceExt; // for `oneshot`

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .header(ADMIN_PASSWORD_HEADER, "admin2024")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        assert!(create_router(test_state(), "not a\nheader").is_err());
    }

    #[tokio::test]
    async fn test_memory_backend_initializes() {
        let config = AppConfig {
            database_url: crate::config::MEMORY_DATABASE.to_string(),
            ..AppConfig::default()
        };
        let state = initialize_backend(Arc::new(config)).await.unwrap();
        assert!(state.passcode_service.list_codes().await.is_empty());
        assert_eq!(state.clock, Clock::System);
    }

    #[tokio::test]
    async fn test_teacher_and_student_flow() {
        let app = create_router(test_state(), "http://localhost:8080").unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                Method::POST,
                "/api/passcodes",
                json!({ "code": "class2024", "max_users": 30, "start_date": "2024-09-01", "end_date": "2024-12-20" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: CreatePasscodeResponse = read_json(response).await;
        assert_eq!(created.passcode.code, "CLASS2024");

        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/api/sessions", json!({ "name": "Alice", "code": "Class2024" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let login: StudentLoginResponse = read_json(response).await;

        let uri = format!("/api/budgets/{}/{}", login.code, login.normalized_name);
        let response = app
            .clone()
            .oneshot(json_request(Method::PUT, &uri, json!({ "budget": 300 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let saved: SaveBudgetResponse = read_json(response).await;
        assert_eq!(saved.record.budget, 300.0);

        let response = app
            .oneshot(json_request(Method::GET, "/api/passcodes", json!({})))
            .await
            .unwrap();
        let list: Value = read_json(response).await;
        assert_eq!(list["passcodes"][0]["used_by"], json!(["alice"]));
        assert_eq!(list["passcodes"][0]["seats_used"], 1);
    }
}
