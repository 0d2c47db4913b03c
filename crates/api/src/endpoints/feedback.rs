//! Feedback endpoints outside the course scope.

use axum::{
    extract::{Path, State},
    routing::delete,
    Router,
};
use campus_common::AppResult;

use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Delete feedback. Author only.
async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(feedback_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.feedback_service.delete(&user.id, &feedback_id).await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", delete(remove))
}
