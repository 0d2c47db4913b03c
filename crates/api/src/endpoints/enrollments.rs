//! Enrollment endpoints outside the course scope.

use axum::{extract::State, routing::get, Router};
use campus_common::AppResult;

use crate::endpoints::courses::EnrollmentResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// List the caller's enrollments, newest first.
async fn mine(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<Vec<EnrollmentResponse>>> {
    let enrollments = state.enrollment_service.list_for_student(&user.id).await?;

    Ok(ApiResponse::ok(
        enrollments.into_iter().map(Into::into).collect(),
    ))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/me", get(mine))
}
