//! Feedback repository.

use std::sync::Arc;

use crate::entities::{Feedback, feedback};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

/// Feedback repository for database operations.
#[derive(Clone)]
pub struct FeedbackRepository {
    db: Arc<DatabaseConnection>,
}

impl FeedbackRepository {
    /// Create a new feedback repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find feedback by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<feedback::Model>> {
        Feedback::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a feedback entry. Multiple entries per (student, course) are
    /// allowed, unlike enrollments.
    pub async fn create(&self, model: feedback::ActiveModel) -> AppResult<feedback::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List feedback for a course, newest first (paginated).
    pub async fn find_by_course(
        &self,
        course_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<feedback::Model>> {
        let mut query = Feedback::find()
            .filter(feedback::Column::CourseId.eq(course_id))
            .order_by_desc(feedback::Column::CreatedAt)
            .order_by_desc(feedback::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(feedback::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a feedback entry.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let feedback = self.find_by_id(id).await?;
        if let Some(f) = feedback {
            f.delete(self.db.as_ref())
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_feedback(id: &str, course_id: &str, student_id: &str) -> feedback::Model {
        feedback::Model {
            id: id.to_string(),
            course_id: course_id.to_string(),
            student_id: student_id.to_string(),
            rating: 5,
            comment: "Great course, learned a lot.".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_course() {
        let f1 = create_test_feedback("f2", "c1", "s1");
        let f2 = create_test_feedback("f1", "c1", "s2");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[f1.clone(), f2]])
                .into_connection(),
        );

        let repo = FeedbackRepository::new(db);
        let result = repo.find_by_course("c1", 10, None).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, "f2");
    }

    #[tokio::test]
    async fn test_find_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<feedback::Model>::new()])
                .into_connection(),
        );

        let repo = FeedbackRepository::new(db);
        let result = repo.find_by_id("missing").await.unwrap();

        assert!(result.is_none());
    }
}
