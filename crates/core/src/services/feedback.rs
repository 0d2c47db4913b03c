//! Feedback service.

use crate::authorization;
use campus_common::{AppError, AppResult, IdGenerator};
use campus_db::{
    entities::feedback,
    repositories::{CourseRepository, EnrollmentRepository, FeedbackRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Feedback service for business logic.
#[derive(Clone)]
pub struct FeedbackService {
    feedback_repo: FeedbackRepository,
    enrollment_repo: EnrollmentRepository,
    course_repo: CourseRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for submitting feedback.
#[derive(Debug, Deserialize, Validate)]
pub struct SubmitFeedbackInput {
    /// Star rating from 1 to 5 inclusive.
    #[validate(range(min = 1, max = 5))]
    pub rating: i16,

    /// Free-text comment, at least 10 characters.
    #[validate(length(min = 10, max = 4096))]
    pub comment: String,
}

impl FeedbackService {
    /// Create a new feedback service.
    #[must_use]
    pub const fn new(
        feedback_repo: FeedbackRepository,
        enrollment_repo: EnrollmentRepository,
        course_repo: CourseRepository,
        user_repo: UserRepository,
    ) -> Self {
        Self {
            feedback_repo,
            enrollment_repo,
            course_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Submit feedback on a course.
    ///
    /// Requires a non-blocked enrollment. A student may leave feedback on
    /// the same course more than once.
    pub async fn submit(
        &self,
        actor_id: &str,
        course_id: &str,
        input: SubmitFeedbackInput,
    ) -> AppResult<feedback::Model> {
        input.validate()?;

        let actor = self.user_repo.get_by_id(actor_id).await?;
        let course = self.course_repo.get_by_id(course_id).await?;

        let enrollment = self
            .enrollment_repo
            .find_by_pair(actor_id, &course.id)
            .await?;

        if !authorization::can_submit_feedback(&actor, enrollment.as_ref()) {
            return Err(AppError::Forbidden(
                "Feedback requires an active enrollment in this course".to_string(),
            ));
        }

        let model = feedback::ActiveModel {
            id: Set(self.id_gen.generate()),
            course_id: Set(course.id),
            student_id: Set(actor.id),
            rating: Set(input.rating),
            comment: Set(input.comment),
            ..Default::default()
        };

        self.feedback_repo.create(model).await
    }

    /// List feedback for a course, newest first.
    pub async fn list_for_course(
        &self,
        course_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<feedback::Model>> {
        self.feedback_repo
            .find_by_course(course_id, limit, until_id)
            .await
    }

    /// Delete feedback. Only the author may do this.
    pub async fn delete(&self, actor_id: &str, feedback_id: &str) -> AppResult<()> {
        let feedback = self
            .feedback_repo
            .find_by_id(feedback_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Feedback not found".to_string()))?;

        let actor = self.user_repo.get_by_id(actor_id).await?;
        if !authorization::can_modify_feedback(&actor, &feedback) {
            return Err(AppError::Forbidden(
                "You can only delete your own feedback".to_string(),
            ));
        }

        self.feedback_repo.delete(feedback_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_db::entities::{course, enrollment, user, user::UserRole};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, role: UserRole) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: id.to_string(),
            username_lower: id.to_lowercase(),
            role,
            token: None,
            name: None,
            email: None,
            photo_url: None,
            password_hash: "x".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_course(id: &str, teacher_id: &str) -> course::Model {
        course::Model {
            id: id.to_string(),
            title: "Algebra".to_string(),
            description: String::new(),
            teacher_id: teacher_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_enrollment(student_id: &str, course_id: &str, is_blocked: bool) -> enrollment::Model {
        enrollment::Model {
            id: "e1".to_string(),
            student_id: student_id.to_string(),
            course_id: course_id.to_string(),
            is_blocked,
            enrolled_at: Utc::now().into(),
        }
    }

    fn service_with(
        feedback_db: Arc<sea_orm::DatabaseConnection>,
        enrollment_db: Arc<sea_orm::DatabaseConnection>,
        course_db: Arc<sea_orm::DatabaseConnection>,
        user_db: Arc<sea_orm::DatabaseConnection>,
    ) -> FeedbackService {
        FeedbackService::new(
            FeedbackRepository::new(feedback_db),
            EnrollmentRepository::new(enrollment_db),
            CourseRepository::new(course_db),
            UserRepository::new(user_db),
        )
    }

    fn empty_db() -> Arc<sea_orm::DatabaseConnection> {
        Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection())
    }

    #[tokio::test]
    async fn test_submit_rejects_rating_out_of_range() {
        let service = service_with(empty_db(), empty_db(), empty_db(), empty_db());

        let result = service
            .submit(
                "s1",
                "c1",
                SubmitFeedbackInput {
                    rating: 6,
                    comment: "Plenty long enough comment".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_short_comment() {
        let service = service_with(empty_db(), empty_db(), empty_db(), empty_db());

        let result = service
            .submit(
                "s1",
                "c1",
                SubmitFeedbackInput {
                    rating: 4,
                    comment: "too short".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_unenrolled_student() {
        let student = create_test_user("s1", UserRole::Student);
        let course = create_test_course("c1", "t1");

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[student]])
                .into_connection(),
        );
        let course_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[course]])
                .into_connection(),
        );
        let enrollment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<enrollment::Model>::new()])
                .into_connection(),
        );

        let service = service_with(empty_db(), enrollment_db, course_db, user_db);

        let result = service
            .submit(
                "s1",
                "c1",
                SubmitFeedbackInput {
                    rating: 4,
                    comment: "A comment of sufficient length".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_submit_rejects_blocked_enrollment() {
        let student = create_test_user("s1", UserRole::Student);
        let course = create_test_course("c1", "t1");
        let blocked = create_test_enrollment("s1", "c1", true);

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[student]])
                .into_connection(),
        );
        let course_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[course]])
                .into_connection(),
        );
        let enrollment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[blocked]])
                .into_connection(),
        );

        let service = service_with(empty_db(), enrollment_db, course_db, user_db);

        let result = service
            .submit(
                "s1",
                "c1",
                SubmitFeedbackInput {
                    rating: 4,
                    comment: "A comment of sufficient length".to_string(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_submit_accepts_boundary_comment() {
        let student = create_test_user("s1", UserRole::Student);
        let course = create_test_course("c1", "t1");
        let enrollment = create_test_enrollment("s1", "c1", false);
        let created = feedback::Model {
            id: "f1".to_string(),
            course_id: "c1".to_string(),
            student_id: "s1".to_string(),
            rating: 1,
            comment: "0123456789".to_string(),
            created_at: Utc::now().into(),
        };

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[student]])
                .into_connection(),
        );
        let course_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[course]])
                .into_connection(),
        );
        let enrollment_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[enrollment]])
                .into_connection(),
        );
        let feedback_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[created]])
                .into_connection(),
        );

        let service = service_with(feedback_db, enrollment_db, course_db, user_db);

        // Exactly 10 characters and a rating of 1 both pass
        let feedback = service
            .submit(
                "s1",
                "c1",
                SubmitFeedbackInput {
                    rating: 1,
                    comment: "0123456789".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(feedback.rating, 1);
    }
}
