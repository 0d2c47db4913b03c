//! API middleware.

#![allow(missing_docs)]

use axum::{body::Body, extract::State, http::Request, middleware::Next, response::Response};
use campus_core::{
    AccountService, CourseService, EnrollmentService, FeedbackService, MaterialService,
    NotificationService, StatusUpdateService,
};

use crate::chat::ChatState;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub course_service: CourseService,
    pub enrollment_service: EnrollmentService,
    pub feedback_service: FeedbackService,
    pub material_service: MaterialService,
    pub status_update_service: StatusUpdateService,
    pub notification_service: NotificationService,
    pub chat: ChatState,
}

/// Authentication middleware.
///
/// Resolves a `Bearer` token to a user and stashes the model in request
/// extensions. Handlers that require authentication reject with 401 through
/// the [`crate::extractors::AuthUser`] extractor.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
        && let Ok(user) = state.account_service.authenticate_by_token(token).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}
