//! Enrollment service.

use crate::authorization;
use crate::services::notification::NotificationService;
use campus_common::{AppError, AppResult, IdGenerator};
use campus_db::{
    entities::{course, enrollment, user},
    repositories::{CourseRepository, EnrollmentRepository, UserRepository},
};
use sea_orm::Set;

/// Enrollment service for business logic.
#[derive(Clone)]
pub struct EnrollmentService {
    enrollment_repo: EnrollmentRepository,
    course_repo: CourseRepository,
    user_repo: UserRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

/// Result of an enroll operation.
pub enum EnrollOutcome {
    /// A new enrollment was created.
    Enrolled(enrollment::Model),
    /// The student already holds an enrollment in this course, blocked or
    /// not. Nothing was written and no notification was sent.
    AlreadyEnrolled,
}

impl EnrollmentService {
    /// Create a new enrollment service.
    #[must_use]
    pub const fn new(
        enrollment_repo: EnrollmentRepository,
        course_repo: CourseRepository,
        user_repo: UserRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            enrollment_repo,
            course_repo,
            user_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Enroll a student in a course.
    ///
    /// Idempotent: repeating the request, including concurrently, yields
    /// [`EnrollOutcome::AlreadyEnrolled`] instead of an error. The unique
    /// (student, course) index arbitrates races; a blocked enrollment also
    /// counts as already enrolled and is not resurrected.
    pub async fn enroll(&self, actor_id: &str, course_id: &str) -> AppResult<EnrollOutcome> {
        let actor = self.user_repo.get_by_id(actor_id).await?;
        if !authorization::can_enroll(&actor) {
            return Err(AppError::Forbidden(
                "Only students can enroll in courses".to_string(),
            ));
        }

        let course = self.course_repo.get_by_id(course_id).await?;

        if self.enrollment_repo.is_enrolled(actor_id, course_id).await? {
            return Ok(EnrollOutcome::AlreadyEnrolled);
        }

        let model = enrollment::ActiveModel {
            id: Set(self.id_gen.generate()),
            student_id: Set(actor.id.clone()),
            course_id: Set(course.id.clone()),
            is_blocked: Set(false),
            ..Default::default()
        };

        let created = match self.enrollment_repo.create(model).await {
            Ok(created) => created,
            // Lost the race against an identical concurrent request
            Err(AppError::Conflict(_)) => return Ok(EnrollOutcome::AlreadyEnrolled),
            Err(e) => return Err(e),
        };

        // The enrollment stands even if the notification write fails
        if let Err(e) = self.notifications.notify_enrollment(&actor, &course).await {
            tracing::warn!(error = %e, "Failed to create enrollment notification");
        }

        Ok(EnrollOutcome::Enrolled(created))
    }

    /// Block or unblock a student's enrollment in a course. Only the
    /// course's owning teacher may do this. Setting the current state again
    /// is a no-op.
    pub async fn set_blocked(
        &self,
        actor_id: &str,
        course_id: &str,
        student_id: &str,
        blocked: bool,
    ) -> AppResult<enrollment::Model> {
        let actor = self.user_repo.get_by_id(actor_id).await?;
        let course = self.course_repo.get_by_id(course_id).await?;

        if !authorization::can_moderate_enrollment(&actor, &course) {
            return Err(AppError::Forbidden(
                "Only the owning teacher can block or unblock students".to_string(),
            ));
        }

        let enrollment = self
            .enrollment_repo
            .find_by_pair(student_id, course_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Enrollment not found".to_string()))?;

        if enrollment.is_blocked == blocked {
            return Ok(enrollment);
        }

        let mut active: enrollment::ActiveModel = enrollment.into();
        active.is_blocked = Set(blocked);

        self.enrollment_repo.update(active).await
    }

    /// List a student's enrollments with their courses, newest first.
    pub async fn list_for_student(
        &self,
        student_id: &str,
    ) -> AppResult<Vec<(enrollment::Model, Option<course::Model>)>> {
        self.enrollment_repo
            .find_by_student_with_course(student_id)
            .await
    }

    /// List the roster of a course with each student embedded, newest first.
    /// Restricted to the owning teacher; blocked enrollments are included.
    pub async fn list_for_course(
        &self,
        actor_id: &str,
        course_id: &str,
    ) -> AppResult<Vec<(enrollment::Model, Option<user::Model>)>> {
        let actor = self.user_repo.get_by_id(actor_id).await?;
        let course = self.course_repo.get_by_id(course_id).await?;

        if !authorization::can_moderate_enrollment(&actor, &course) {
            return Err(AppError::Forbidden(
                "Only the owning teacher can view the roster".to_string(),
            ));
        }

        self.enrollment_repo
            .find_by_course_with_student(course_id)
            .await
    }

    /// Look up a student's enrollment in a course.
    pub async fn find(
        &self,
        student_id: &str,
        course_id: &str,
    ) -> AppResult<Option<enrollment::Model>> {
        self.enrollment_repo.find_by_pair(student_id, course_id).await
    }
}
