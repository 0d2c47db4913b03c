//! Course service.

use crate::authorization;
use campus_common::{AppError, AppResult, IdGenerator};
use campus_db::{
    entities::course,
    repositories::{CourseRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Course service for business logic.
#[derive(Clone)]
pub struct CourseService {
    course_repo: CourseRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for creating a course.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseInput {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(max = 4096))]
    pub description: String,
}

/// Input for updating a course.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCourseInput {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 4096))]
    pub description: Option<String>,
}

impl CourseService {
    /// Create a new course service.
    #[must_use]
    pub const fn new(course_repo: CourseRepository, user_repo: UserRepository) -> Self {
        Self {
            course_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a course owned by the acting teacher.
    pub async fn create(&self, actor_id: &str, input: CreateCourseInput) -> AppResult<course::Model> {
        input.validate()?;

        let actor = self.user_repo.get_by_id(actor_id).await?;
        if !authorization::can_create_course(&actor) {
            return Err(AppError::Forbidden(
                "Only teachers can create courses".to_string(),
            ));
        }

        let model = course::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title),
            description: Set(input.description),
            teacher_id: Set(actor.id),
            ..Default::default()
        };

        self.course_repo.create(model).await
    }

    /// Update a course. Only the owning teacher may do this.
    pub async fn update(
        &self,
        actor_id: &str,
        course_id: &str,
        input: UpdateCourseInput,
    ) -> AppResult<course::Model> {
        input.validate()?;

        let actor = self.user_repo.get_by_id(actor_id).await?;
        let course = self.course_repo.get_by_id(course_id).await?;

        if !authorization::can_modify_course(&actor, &course) {
            return Err(AppError::Forbidden(
                "Only the owning teacher can edit this course".to_string(),
            ));
        }

        let mut active: course::ActiveModel = course.into();
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }

        self.course_repo.update(active).await
    }

    /// Delete a course. Only the owning teacher may do this. Enrollments,
    /// materials, and feedback go with it.
    pub async fn delete(&self, actor_id: &str, course_id: &str) -> AppResult<()> {
        let actor = self.user_repo.get_by_id(actor_id).await?;
        let course = self.course_repo.get_by_id(course_id).await?;

        if !authorization::can_modify_course(&actor, &course) {
            return Err(AppError::Forbidden(
                "Only the owning teacher can delete this course".to_string(),
            ));
        }

        self.course_repo.delete(course_id).await
    }

    /// Get a course by ID.
    pub async fn get(&self, id: &str) -> AppResult<course::Model> {
        self.course_repo.get_by_id(id).await
    }

    /// List courses, newest first.
    pub async fn list(&self, limit: u64, until_id: Option<&str>) -> AppResult<Vec<course::Model>> {
        self.course_repo.find_all(limit, until_id).await
    }

    /// List courses taught by a teacher, newest first.
    pub async fn list_by_teacher(&self, teacher_id: &str) -> AppResult<Vec<course::Model>> {
        self.course_repo.find_by_teacher(teacher_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_db::entities::user::{self, UserRole};
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
            description: "Linear algebra basics".to_string(),
            teacher_id: teacher_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_students() {
        let student = create_test_user("s1", UserRole::Student);

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[student]])
                .into_connection(),
        );
        let course_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = CourseService::new(
            CourseRepository::new(course_db),
            UserRepository::new(user_db),
        );

        let result = service
            .create(
                "s1",
                CreateCourseInput {
                    title: "Algebra".to_string(),
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_empty_title() {
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let course_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = CourseService::new(
            CourseRepository::new(course_db),
            UserRepository::new(user_db),
        );

        let result = service
            .create(
                "t1",
                CreateCourseInput {
                    title: String::new(),
                    description: String::new(),
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_rejects_non_owner() {
        let other_teacher = create_test_user("t2", UserRole::Teacher);
        let course = create_test_course("c1", "t1");

        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[other_teacher]])
                .into_connection(),
        );
        let course_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[course]])
                .into_connection(),
        );

        let service = CourseService::new(
            CourseRepository::new(course_db),
            UserRepository::new(user_db),
        );

        let result = service
            .update(
                "t2",
                "c1",
                UpdateCourseInput {
                    title: Some("Hijacked".to_string()),
                    description: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_get_missing_course() {
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let course_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<course::Model>::new()])
                .into_connection(),
        );

        let service = CourseService::new(
            CourseRepository::new(course_db),
            UserRepository::new(user_db),
        );

        let result = service.get("missing").await;
        assert!(matches!(result, Err(AppError::CourseNotFound(_))));
    }
}
