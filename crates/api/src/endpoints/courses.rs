//! Course endpoints.
//!
//! Enrollment, feedback, and material routes hang off the course scope; the
//! corresponding services enforce who may call them.

use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use campus_common::AppResult;
use campus_core::EnrollOutcome;
use campus_db::entities::{course, course_material, enrollment, feedback, user};
use serde::{Deserialize, Serialize};

use crate::endpoints::users::UserResponse;
use crate::{extractors::AuthUser, middleware::AppState, response::ApiResponse};

/// Course fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub teacher_id: String,
    pub created_at: String,
}

impl From<course::Model> for CourseResponse {
    fn from(c: course::Model) -> Self {
        Self {
            id: c.id,
            title: c.title,
            description: c.description,
            teacher_id: c.teacher_id,
            created_at: c.created_at.to_rfc3339(),
        }
    }
}

/// Course detail with teacher and materials embedded.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub teacher: UserResponse,
    pub materials: Vec<MaterialResponse>,
}

/// Material fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaterialResponse {
    pub id: String,
    pub course_id: String,
    pub file_name: String,
    pub file_url: String,
    pub uploaded_at: String,
}

impl From<course_material::Model> for MaterialResponse {
    fn from(m: course_material::Model) -> Self {
        Self {
            id: m.id,
            course_id: m.course_id,
            file_name: m.file_name,
            file_url: m.file_url,
            uploaded_at: m.uploaded_at.to_rfc3339(),
        }
    }
}

/// Enrollment fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentResponse {
    pub id: String,
    pub student_id: String,
    pub course_id: String,
    pub is_blocked: bool,
    pub enrolled_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub course: Option<CourseResponse>,
}

impl From<enrollment::Model> for EnrollmentResponse {
    fn from(e: enrollment::Model) -> Self {
        Self {
            id: e.id,
            student_id: e.student_id,
            course_id: e.course_id,
            is_blocked: e.is_blocked,
            enrolled_at: e.enrolled_at.to_rfc3339(),
            student: None,
            course: None,
        }
    }
}

impl From<(enrollment::Model, Option<user::Model>)> for EnrollmentResponse {
    fn from((e, student): (enrollment::Model, Option<user::Model>)) -> Self {
        Self {
            student: student.map(Into::into),
            ..e.into()
        }
    }
}

impl From<(enrollment::Model, Option<course::Model>)> for EnrollmentResponse {
    fn from((e, course): (enrollment::Model, Option<course::Model>)) -> Self {
        Self {
            course: course.map(Into::into),
            ..e.into()
        }
    }
}

/// Feedback fields.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub id: String,
    pub course_id: String,
    pub student_id: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: String,
}

impl From<feedback::Model> for FeedbackResponse {
    fn from(f: feedback::Model) -> Self {
        Self {
            id: f.id,
            course_id: f.course_id,
            student_id: f.student_id,
            rating: f.rating,
            comment: f.comment,
            created_at: f.created_at.to_rfc3339(),
        }
    }
}

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

/// List courses, newest first.
async fn list(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Query(params): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<CourseResponse>>> {
    let limit = params.limit.min(100);
    let courses = state
        .course_service
        .list(limit, params.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        courses.into_iter().map(Into::into).collect(),
    ))
}

/// Create course request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Create a course. Teachers only.
async fn create(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<CreateCourseRequest>,
) -> AppResult<ApiResponse<CourseResponse>> {
    let input = campus_core::course::CreateCourseInput {
        title: req.title,
        description: req.description,
    };

    let course = state.course_service.create(&user.id, input).await?;
    Ok(ApiResponse::ok(course.into()))
}

/// Get a course with its teacher and materials.
async fn detail(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<ApiResponse<CourseDetailResponse>> {
    let course = state.course_service.get(&course_id).await?;
    let teacher = state.account_service.get(&course.teacher_id).await?;
    let materials = state.material_service.list_for_course(&course_id).await?;

    Ok(ApiResponse::ok(CourseDetailResponse {
        course: course.into(),
        teacher: teacher.into(),
        materials: materials.into_iter().map(Into::into).collect(),
    }))
}

/// Update course request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
}

/// Update a course. Owning teacher only.
async fn update(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(req): Json<UpdateCourseRequest>,
) -> AppResult<ApiResponse<CourseResponse>> {
    let input = campus_core::course::UpdateCourseInput {
        title: req.title,
        description: req.description,
    };

    let course = state
        .course_service
        .update(&user.id, &course_id, input)
        .await?;

    Ok(ApiResponse::ok(course.into()))
}

/// Delete a course. Owning teacher only.
async fn remove(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<ApiResponse<()>> {
    state.course_service.delete(&user.id, &course_id).await?;
    Ok(ApiResponse::ok(()))
}

/// Enroll result response.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<EnrollmentResponse>,
}

/// Enroll in a course. Students only; repeating is a no-op.
async fn enroll(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<ApiResponse<EnrollResponse>> {
    let outcome = state.enrollment_service.enroll(&user.id, &course_id).await?;

    let response = match outcome {
        EnrollOutcome::Enrolled(e) => EnrollResponse {
            status: "enrolled".to_string(),
            enrollment: Some(e.into()),
        },
        EnrollOutcome::AlreadyEnrolled => EnrollResponse {
            status: "alreadyEnrolled".to_string(),
            enrollment: None,
        },
    };

    Ok(ApiResponse::ok(response))
}

/// List the course roster. Owning teacher only.
async fn roster(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<ApiResponse<Vec<EnrollmentResponse>>> {
    let enrollments = state
        .enrollment_service
        .list_for_course(&user.id, &course_id)
        .await?;

    Ok(ApiResponse::ok(
        enrollments.into_iter().map(Into::into).collect(),
    ))
}

/// Block a student. Owning teacher only.
async fn block(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((course_id, student_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<EnrollmentResponse>> {
    let enrollment = state
        .enrollment_service
        .set_blocked(&user.id, &course_id, &student_id, true)
        .await?;

    Ok(ApiResponse::ok(enrollment.into()))
}

/// Unblock a student. Owning teacher only.
async fn unblock(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((course_id, student_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<EnrollmentResponse>> {
    let enrollment = state
        .enrollment_service
        .set_blocked(&user.id, &course_id, &student_id, false)
        .await?;

    Ok(ApiResponse::ok(enrollment.into()))
}

/// Submit feedback request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitFeedbackRequest {
    pub rating: i16,
    pub comment: String,
}

/// Submit feedback on a course. Requires a non-blocked enrollment.
async fn submit_feedback(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(req): Json<SubmitFeedbackRequest>,
) -> AppResult<ApiResponse<FeedbackResponse>> {
    let input = campus_core::feedback::SubmitFeedbackInput {
        rating: req.rating,
        comment: req.comment,
    };

    let feedback = state
        .feedback_service
        .submit(&user.id, &course_id, input)
        .await?;

    Ok(ApiResponse::ok(feedback.into()))
}

/// List feedback for a course, newest first.
async fn list_feedback(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Query(params): Query<ListQuery>,
) -> AppResult<ApiResponse<Vec<FeedbackResponse>>> {
    let limit = params.limit.min(100);
    let feedback = state
        .feedback_service
        .list_for_course(&course_id, limit, params.until_id.as_deref())
        .await?;

    Ok(ApiResponse::ok(
        feedback.into_iter().map(Into::into).collect(),
    ))
}

/// Add material request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMaterialRequest {
    pub file_name: String,
    pub file_url: String,
}

/// Add a material to a course. Owning teacher only; enrolled students get
/// notified.
async fn add_material(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
    Json(req): Json<AddMaterialRequest>,
) -> AppResult<ApiResponse<MaterialResponse>> {
    let input = campus_core::material::AddMaterialInput {
        file_name: req.file_name,
        file_url: req.file_url,
    };

    let material = state
        .material_service
        .add(&user.id, &course_id, input)
        .await?;

    Ok(ApiResponse::ok(material.into()))
}

/// List materials for a course, newest first.
async fn list_materials(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(course_id): Path<String>,
) -> AppResult<ApiResponse<Vec<MaterialResponse>>> {
    let materials = state.material_service.list_for_course(&course_id).await?;

    Ok(ApiResponse::ok(
        materials.into_iter().map(Into::into).collect(),
    ))
}

/// Remove a material. Owning teacher only.
async fn remove_material(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path((course_id, material_id)): Path<(String, String)>,
) -> AppResult<ApiResponse<()>> {
    state
        .material_service
        .remove(&user.id, &course_id, &material_id)
        .await?;
    Ok(ApiResponse::ok(()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(detail).patch(update).delete(remove))
        .route("/{id}/enroll", post(enroll))
        .route("/{id}/enrollments", get(roster))
        .route("/{id}/enrollments/{student_id}/block", post(block))
        .route("/{id}/enrollments/{student_id}/unblock", post(unblock))
        .route("/{id}/feedback", get(list_feedback).post(submit_feedback))
        .route("/{id}/materials", get(list_materials).post(add_material))
        .route("/{id}/materials/{material_id}", delete(remove_material))
}
