//! Status update endpoints.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use campus_common::AppResult;
use serde::Deserialize;

use crate::endpoints::users::StatusUpdateResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// List query parameters.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: u64,
    pub until_id: Option<String>,
}

const fn default_limit() -> u64 {
    20
}

/// Post request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStatusRequest {
    pub content: String,
}

/// Post a status update.
async fn post_update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<PostStatusRequest>,
) -> AppResult<ApiResponse<StatusUpdateResponse>> {
    let input = campus_core::status_update::PostStatusInput {
        content: req.content,
    };

    let update = state.status_update_service.post(&user.id, input).await?;
    Ok(ApiResponse::ok(update.into()))
}

/// Global status feed, newest first.
async fn feed(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<StatusUpdateResponse>>> {
    let limit = params.limit.min(100);
    let updates = state
        .status_update_service
        .list_recent(limit, params.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        updates.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(feed).post(post_update))
}
