//! Dashboard endpoint.
//!
//! One aggregate read per role: students see their enrollments, teachers see
//! their courses, both see recent notifications and the unread count.

use axum::{extract::State, routing::get, Router};
use campus_common::AppResult;
use campus_db::entities::user::UserRole;
use serde::Serialize;

use crate::endpoints::courses::{CourseResponse, EnrollmentResponse};
use crate::endpoints::notifications::NotificationResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

const DASHBOARD_NOTIFICATIONS: u64 = 10;

/// Dashboard payload.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollments: Option<Vec<EnrollmentResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub courses: Option<Vec<CourseResponse>>,
    pub notifications: Vec<NotificationResponse>,
    pub unread_count: u64,
}

/// Role-dependent home view.
async fn home(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
) -> AppResult<ApiResponse<DashboardResponse>> {
    let notifications = state
        .notification_service
        .get_notifications(&user.id, DASHBOARD_NOTIFICATIONS, None, false)
        .await?;
    let unread_count = state.notification_service.count_unread(&user.id).await?;

    let (enrollments, courses) = match user.role {
        UserRole::Student => {
            let enrollments = state.enrollment_service.list_for_student(&user.id).await?;
            (
                Some(enrollments.into_iter().map(Into::into).collect()),
                None,
            )
        }
        UserRole::Teacher => {
            let courses = state.course_service.list_by_teacher(&user.id).await?;
            (None, Some(courses.into_iter().map(Into::into).collect()))
        }
    };

    Ok(ApiResponse::ok(DashboardResponse {
        role: user.role,
        enrollments,
        courses,
        notifications: notifications.into_iter().map(Into::into).collect(),
        unread_count,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}
