//! API integration tests.
//!
//! These tests drive the full router with the auth middleware attached and
//! verify the authentication boundary: 401 before handler logic, 403 from
//! the service layer's role checks.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
    middleware,
};
use campus_api::{ChatState, middleware::AppState, middleware::auth_middleware, router as api_router};
use campus_core::{
    AccountService, CourseService, EnrollmentService, FeedbackService, MaterialService,
    NotificationService, StatusUpdateService,
};
use campus_db::entities::{user, user::UserRole};
use campus_db::repositories::{
    CourseMaterialRepository, CourseRepository, EnrollmentRepository, FeedbackRepository,
    NotificationRepository, StatusUpdateRepository, UserRepository,
};
use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_user(id: &str, username: &str, role: UserRole, token: &str) -> user::Model {
    user::Model {
        id: id.to_string(),
        username: username.to_string(),
        username_lower: username.to_lowercase(),
        role,
        token: Some(token.to_string()),
        name: None,
        email: None,
        photo_url: None,
        password_hash: "x".to_string(),
        created_at: Utc::now().into(),
        updated_at: None,
    }
}

fn empty_db() -> Arc<DatabaseConnection> {
    Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
}

/// Build app state where token resolution reads `auth_db` and the course
/// service's actor lookup reads `course_user_db`.
fn create_test_state(
    auth_db: Arc<DatabaseConnection>,
    course_user_db: Arc<DatabaseConnection>,
) -> AppState {
    let account_service = AccountService::new(UserRepository::new(auth_db));
    let course_service = CourseService::new(
        CourseRepository::new(empty_db()),
        UserRepository::new(course_user_db),
    );
    let notification_service =
        NotificationService::new(NotificationRepository::new(empty_db()));
    let enrollment_service = EnrollmentService::new(
        EnrollmentRepository::new(empty_db()),
        CourseRepository::new(empty_db()),
        UserRepository::new(empty_db()),
        notification_service.clone(),
    );
    let feedback_service = FeedbackService::new(
        FeedbackRepository::new(empty_db()),
        EnrollmentRepository::new(empty_db()),
        CourseRepository::new(empty_db()),
        UserRepository::new(empty_db()),
    );
    let material_service = MaterialService::new(
        CourseMaterialRepository::new(empty_db()),
        CourseRepository::new(empty_db()),
        EnrollmentRepository::new(empty_db()),
        UserRepository::new(empty_db()),
        notification_service.clone(),
    );
    let status_update_service = StatusUpdateService::new(
        StatusUpdateRepository::new(empty_db()),
        UserRepository::new(empty_db()),
    );

    AppState {
        account_service,
        course_service,
        enrollment_service,
        feedback_service,
        material_service,
        status_update_service,
        notification_service,
        chat: ChatState::new(),
    }
}

fn create_test_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
}

#[tokio::test]
async fn test_protected_route_without_token_returns_401() {
    let app = create_test_router(create_test_state(empty_db(), empty_db()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/courses")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_unknown_token_returns_401() {
    // Token lookup comes back empty
    let auth_db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .into_connection(),
    );
    let app = create_test_router(create_test_state(auth_db, empty_db()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/courses")
                .header("Authorization", "Bearer bogus")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_student_creating_course_returns_403() {
    let student = create_test_user("s1", "alice", UserRole::Student, "tok");

    // The middleware resolves the token, then the course service reloads the
    // actor for its role check
    let auth_db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[student.clone()]])
            .into_connection(),
    );
    let course_user_db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[student]])
            .into_connection(),
    );
    let app = create_test_router(create_test_state(auth_db, course_user_db));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/courses")
                .method("POST")
                .header("Authorization", "Bearer tok")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"title":"Algebra"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_register_needs_no_token() {
    let created = create_test_user("u1", "alice", UserRole::Student, "tok");

    // Username availability check, then the insert
    let auth_db = Arc::new(
        MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<user::Model>::new()])
            .append_query_results([[created]])
            .into_connection(),
    );
    let app = create_test_router(create_test_state(auth_db, empty_db()));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/register")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(
                    r#"{"username":"alice","password":"correct horse","role":"student"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
