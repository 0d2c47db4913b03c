//! Authentication endpoints.

use axum::{extract::State, routing::post, Json, Router};
use campus_common::AppResult;
use campus_db::entities::user::UserRole;
use serde::{Deserialize, Serialize};

use crate::{middleware::AppState, response::ApiResponse};

/// Registration request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

/// Registration response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub token: String,
}

/// Register a new account.
async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<ApiResponse<RegisterResponse>> {
    let input = campus_core::account::RegisterInput {
        username: req.username,
        password: req.password,
        role: req.role,
        name: req.name,
        email: req.email,
        photo_url: req.photo_url,
    };

    let user = state.account_service.register(input).await?;

    Ok(ApiResponse::ok(RegisterResponse {
        id: user.id.clone(),
        username: user.username,
        role: user.role,
        token: user.token.unwrap_or_default(),
    }))
}

/// Login request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Login response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub token: String,
}

/// Log in to an existing account.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<ApiResponse<LoginResponse>> {
    let user = state
        .account_service
        .login(&req.username, &req.password)
        .await?;

    Ok(ApiResponse::ok(LoginResponse {
        id: user.id.clone(),
        username: user.username,
        role: user.role,
        token: user.token.unwrap_or_default(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
}
