//! API endpoints.

mod auth;
mod courses;
mod dashboard;
mod enrollments;
mod feedback;
mod notifications;
mod status_updates;
mod users;

use axum::Router;

use crate::middleware::AppState;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/courses", courses::router())
        .nest("/enrollments", enrollments::router())
        .nest("/feedback", feedback::router())
        .nest("/status-updates", status_updates::router())
        .nest("/notifications", notifications::router())
        .nest("/dashboard", dashboard::router())
}
