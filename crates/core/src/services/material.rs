//! Course material service.

use crate::authorization;
use crate::services::notification::NotificationService;
use campus_common::{AppError, AppResult, IdGenerator};
use campus_db::{
    entities::course_material,
    repositories::{CourseMaterialRepository, CourseRepository, EnrollmentRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Course material service for business logic.
#[derive(Clone)]
pub struct MaterialService {
    material_repo: CourseMaterialRepository,
    course_repo: CourseRepository,
    enrollment_repo: EnrollmentRepository,
    user_repo: UserRepository,
    notifications: NotificationService,
    id_gen: IdGenerator,
}

/// Input for adding a course material.
#[derive(Debug, Deserialize, Validate)]
pub struct AddMaterialInput {
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,

    #[validate(url)]
    pub file_url: String,
}

impl MaterialService {
    /// Create a new material service.
    #[must_use]
    pub const fn new(
        material_repo: CourseMaterialRepository,
        course_repo: CourseRepository,
        enrollment_repo: EnrollmentRepository,
        user_repo: UserRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            material_repo,
            course_repo,
            enrollment_repo,
            user_repo,
            notifications,
            id_gen: IdGenerator::new(),
        }
    }

    /// Add a material to a course. Only the owning teacher may do this.
    ///
    /// Every student with a non-blocked enrollment gets a notification;
    /// blocked students get nothing.
    pub async fn add(
        &self,
        actor_id: &str,
        course_id: &str,
        input: AddMaterialInput,
    ) -> AppResult<course_material::Model> {
        input.validate()?;

        let actor = self.user_repo.get_by_id(actor_id).await?;
        let course = self.course_repo.get_by_id(course_id).await?;

        if !authorization::can_manage_materials(&actor, &course) {
            return Err(AppError::Forbidden(
                "Only the owning teacher can add materials".to_string(),
            ));
        }

        let model = course_material::ActiveModel {
            id: Set(self.id_gen.generate()),
            course_id: Set(course.id.clone()),
            file_name: Set(input.file_name.clone()),
            file_url: Set(input.file_url),
            ..Default::default()
        };

        let created = self.material_repo.create(model).await?;

        // The material stands even if notification writes fail
        match self.enrollment_repo.find_active_by_course(&course.id).await {
            Ok(enrollments) => {
                let recipient_ids: Vec<String> =
                    enrollments.into_iter().map(|e| e.student_id).collect();
                if let Err(e) = self
                    .notifications
                    .notify_new_material(&recipient_ids, &input.file_name, &course)
                    .await
                {
                    tracing::warn!(error = %e, "Failed to create material notifications");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load recipients for material notifications");
            }
        }

        Ok(created)
    }

    /// Remove a material from a course. Only the owning teacher may do this.
    /// A material that exists under a different course is NotFound.
    pub async fn remove(&self, actor_id: &str, course_id: &str, material_id: &str) -> AppResult<()> {
        let material = self
            .material_repo
            .find_by_id(material_id)
            .await?
            .filter(|m| m.course_id == course_id)
            .ok_or_else(|| AppError::NotFound("Material not found".to_string()))?;

        let actor = self.user_repo.get_by_id(actor_id).await?;
        let course = self.course_repo.get_by_id(&material.course_id).await?;

        if !authorization::can_manage_materials(&actor, &course) {
            return Err(AppError::Forbidden(
                "Only the owning teacher can remove materials".to_string(),
            ));
        }

        self.material_repo.delete(material_id).await
    }

    /// List materials for a course, newest first.
    pub async fn list_for_course(
        &self,
        course_id: &str,
    ) -> AppResult<Vec<course_material::Model>> {
        self.material_repo.find_by_course(course_id).await
    }
}
