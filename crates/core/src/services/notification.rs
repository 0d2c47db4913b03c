//! Notification service.
//!
//! Notifications are plain text rows dispatched explicitly by the service
//! that performed the triggering write. There is no implicit signal layer:
//! every notification in the system can be traced to a call site here.

use campus_common::{AppError, AppResult, IdGenerator};
use campus_db::{
    entities::{course, notification, user},
    repositories::NotificationRepository,
};
use sea_orm::Set;

/// Notification service for business logic.
#[derive(Clone)]
pub struct NotificationService {
    notification_repo: NotificationRepository,
    id_gen: IdGenerator,
}

impl NotificationService {
    /// Create a new notification service.
    #[must_use]
    pub const fn new(notification_repo: NotificationRepository) -> Self {
        Self {
            notification_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Notify a course's teacher that a student enrolled.
    pub async fn notify_enrollment(
        &self,
        student: &user::Model,
        course: &course::Model,
    ) -> AppResult<notification::Model> {
        let message = format!("{} enrolled in {}", student.username, course.title);
        self.create_internal(&course.teacher_id, &message).await
    }

    /// Notify enrolled students that a material was added to their course.
    ///
    /// Returns the number of notifications created. A failure for one
    /// recipient does not stop delivery to the rest.
    pub async fn notify_new_material(
        &self,
        recipient_ids: &[String],
        file_name: &str,
        course: &course::Model,
    ) -> AppResult<u64> {
        let message = format!("New material \"{}\" in {}", file_name, course.title);
        let mut delivered = 0;

        for recipient_id in recipient_ids {
            match self.create_internal(recipient_id, &message).await {
                Ok(_) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        recipient_id = %recipient_id,
                        error = %e,
                        "Failed to create material notification"
                    );
                }
            }
        }

        Ok(delivered)
    }

    async fn create_internal(
        &self,
        user_id: &str,
        message: &str,
    ) -> AppResult<notification::Model> {
        let model = notification::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            message: Set(message.to_string()),
            is_read: Set(false),
            ..Default::default()
        };

        self.notification_repo.create(model).await
    }

    /// Get notifications for a user, newest first.
    pub async fn get_notifications(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
        unread_only: bool,
    ) -> AppResult<Vec<notification::Model>> {
        self.notification_repo
            .find_by_user(user_id, limit, until_id, unread_only)
            .await
    }

    /// Mark a notification as read.
    ///
    /// A notification that does not exist or belongs to someone else is
    /// NotFound; ownership is never revealed to other users.
    pub async fn mark_as_read(&self, user_id: &str, notification_id: &str) -> AppResult<()> {
        let notification = self
            .notification_repo
            .find_by_id(notification_id)
            .await?
            .filter(|n| n.user_id == user_id)
            .ok_or_else(|| AppError::NotFound("Notification not found".to_string()))?;

        self.notification_repo.mark_as_read(&notification.id).await
    }

    /// Mark all notifications as read for a user.
    pub async fn mark_all_as_read(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.mark_all_as_read(user_id).await
    }

    /// Count unread notifications for a user.
    pub async fn count_unread(&self, user_id: &str) -> AppResult<u64> {
        self.notification_repo.count_unread(user_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use campus_db::entities::user::UserRole;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            role: UserRole::Student,
            token: None,
            name: None,
            email: None,
            photo_url: None,
            password_hash: "x".to_string(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    fn create_test_course(id: &str, title: &str, teacher_id: &str) -> course::Model {
        course::Model {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            teacher_id: teacher_id.to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn create_test_notification(id: &str, user_id: &str, message: &str) -> notification::Model {
        notification::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            message: message.to_string(),
            is_read: false,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_enrollment_notification_message() {
        let student = create_test_user("s1", "alice");
        let course = create_test_course("c1", "Algebra", "t1");
        let expected = create_test_notification("n1", "t1", "alice enrolled in Algebra");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[expected.clone()]])
                .into_connection(),
        );
        let service = NotificationService::new(NotificationRepository::new(db));

        let created = service.notify_enrollment(&student, &course).await.unwrap();
        assert_eq!(created.user_id, "t1");
        assert_eq!(created.message, "alice enrolled in Algebra");
    }

    #[tokio::test]
    async fn test_material_notification_fans_out() {
        let course = create_test_course("c1", "Algebra", "t1");
        let n1 = create_test_notification("n1", "s1", "New material \"notes.pdf\" in Algebra");
        let n2 = create_test_notification("n2", "s2", "New material \"notes.pdf\" in Algebra");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[n1], [n2]])
                .into_connection(),
        );
        let service = NotificationService::new(NotificationRepository::new(db));

        let delivered = service
            .notify_new_material(
                &["s1".to_string(), "s2".to_string()],
                "notes.pdf",
                &course,
            )
            .await
            .unwrap();

        assert_eq!(delivered, 2);
    }

    #[tokio::test]
    async fn test_mark_as_read_rejects_foreign_notification() {
        let other = create_test_notification("n1", "someone_else", "hi");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[other]])
                .into_connection(),
        );
        let service = NotificationService::new(NotificationRepository::new(db));

        // The row is never touched; no exec results are queued
        let result = service.mark_as_read("u1", "n1").await;
        assert!(matches!(result, Err(campus_common::AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mark_as_read_rejects_missing_notification() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<notification::Model>::new()])
                .into_connection(),
        );
        let service = NotificationService::new(NotificationRepository::new(db));

        let result = service.mark_as_read("u1", "nope").await;
        assert!(matches!(result, Err(campus_common::AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_mark_as_read_updates_own_notification() {
        let own = create_test_notification("n1", "u1", "hi");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[own.clone()]])
                .append_query_results([[notification::Model {
                    is_read: true,
                    ..own
                }]])
                .into_connection(),
        );
        let service = NotificationService::new(NotificationRepository::new(db));

        service.mark_as_read("u1", "n1").await.unwrap();
    }
}
