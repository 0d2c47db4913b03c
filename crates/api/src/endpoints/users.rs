//! User endpoints.

use axum::{
    extract::{Path, Query, State},
    routing::{get, patch},
    Json, Router,
};
use campus_common::AppResult;
use campus_db::entities::{status_update, user, user::UserRole};
use serde::{Deserialize, Serialize};

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Public user fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub role: UserRole,
    pub name: Option<String>,
    pub photo_url: Option<String>,
    pub created_at: String,
}

impl From<user::Model> for UserResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            username: u.username,
            role: u.role,
            name: u.name,
            photo_url: u.photo_url,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// List/search query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
    pub query: Option<String>,
}

const fn default_limit() -> u64 {
    20
}

/// List or search users.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<UserResponse>>> {
    let limit = params.limit.min(100);

    let users = if let Some(query) = params.query.as_deref() {
        state.account_service.search(query, limit).await?
    } else {
        state
            .account_service
            .list(limit, params.until_id.as_deref())
            .await?
    };

    Ok(ApiResponse::ok(users.into_iter().map(Into::into).collect()))
}

/// Get a user by username.
async fn get_by_username(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<ApiResponse<UserResponse>> {
    let user = state.account_service.get_by_username(&username).await?;
    Ok(ApiResponse::ok(user.into()))
}

/// Profile update request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
}

/// Update a profile. Owner only.
async fn update_profile(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<ApiResponse<UserResponse>> {
    let input = campus_core::account::UpdateProfileInput {
        name: req.name,
        email: req.email,
        photo_url: req.photo_url,
    };

    let updated = state
        .account_service
        .update_profile(&user.id, &user_id, input)
        .await?;

    Ok(ApiResponse::ok(updated.into()))
}

/// Status update item.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateResponse {
    pub id: String,
    pub user_id: String,
    pub content: String,
    pub created_at: String,
}

impl From<status_update::Model> for StatusUpdateResponse {
    fn from(s: status_update::Model) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            content: s.content,
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

/// List a user's status updates, newest first.
async fn status_updates(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(params): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<StatusUpdateResponse>>> {
    let limit = params.limit.min(100);
    let updates = state
        .status_update_service
        .list_for_user(&user_id, limit, params.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        updates.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list))
        .route("/by-username/{username}", get(get_by_username))
        .route("/{id}", patch(update_profile))
        .route("/{id}/status-updates", get(status_updates))
}
