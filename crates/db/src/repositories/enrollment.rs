//! Enrollment repository.

use std::sync::Arc;

use crate::entities::{Course, Enrollment, User, course, enrollment, user};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    SqlErr,
};

/// Enrollment repository for database operations.
#[derive(Clone)]
pub struct EnrollmentRepository {
    db: Arc<DatabaseConnection>,
}

impl EnrollmentRepository {
    /// Create a new enrollment repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find an enrollment by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<enrollment::Model>> {
        Enrollment::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an enrollment by student and course.
    pub async fn find_by_pair(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<enrollment::Model>> {
        Enrollment::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .filter(enrollment::Column::CourseId.eq(course_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if a student holds any enrollment in a course, blocked or not.
    pub async fn is_enrolled(&self, student_id: &str, course_id: &str) -> AppResult<bool> {
        Ok(self.find_by_pair(student_id, course_id).await?.is_some())
    }

    /// Create a new enrollment.
    ///
    /// The (student, course) unique index is the arbiter under concurrent
    /// identical requests: a unique violation surfaces as [`AppError::Conflict`]
    /// so the caller can treat it as "already enrolled" rather than a failure.
    pub async fn create(&self, model: enrollment::ActiveModel) -> AppResult<enrollment::Model> {
        model.insert(self.db.as_ref()).await.map_err(|e| {
            if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                AppError::Conflict("Already enrolled".to_string())
            } else {
                AppError::Database(e.to_string())
            }
        })
    }

    /// Update an enrollment (block flag toggles).
    pub async fn update(&self, model: enrollment::ActiveModel) -> AppResult<enrollment::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a student's enrollments with their courses, newest first.
    pub async fn find_by_student_with_course(
        &self,
        student_id: &str,
    ) -> AppResult<Vec<(enrollment::Model, Option<course::Model>)>> {
        Enrollment::find()
            .filter(enrollment::Column::StudentId.eq(student_id))
            .find_also_related(Course)
            .order_by_desc(enrollment::Column::EnrolledAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a course's enrollments with their students, newest first.
    pub async fn find_by_course_with_student(
        &self,
        course_id: &str,
    ) -> AppResult<Vec<(enrollment::Model, Option<user::Model>)>> {
        Enrollment::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .find_also_related(User)
            .order_by_desc(enrollment::Column::EnrolledAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List non-blocked enrollments in a course (notification recipients).
    pub async fn find_active_by_course(&self, course_id: &str) -> AppResult<Vec<enrollment::Model>> {
        Enrollment::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::IsBlocked.eq(false))
            .order_by_desc(enrollment::Column::EnrolledAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
