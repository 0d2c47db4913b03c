//! Status update repository.

use std::sync::Arc;

use crate::entities::{StatusUpdate, status_update};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};

/// Status update repository for database operations.
#[derive(Clone)]
pub struct StatusUpdateRepository {
    db: Arc<DatabaseConnection>,
}

impl StatusUpdateRepository {
    /// Create a new status update repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a status update.
    pub async fn create(&self, model: status_update::ActiveModel) -> AppResult<status_update::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List a user's status updates, strictly newest first (paginated).
    pub async fn find_by_user(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<status_update::Model>> {
        let mut query = StatusUpdate::find()
            .filter(status_update::Column::UserId.eq(user_id))
            .order_by_desc(status_update::Column::CreatedAt)
            .order_by_desc(status_update::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(status_update::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List recent status updates across all users, newest first.
    pub async fn find_recent(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<status_update::Model>> {
        let mut query = StatusUpdate::find()
            .order_by_desc(status_update::Column::CreatedAt)
            .order_by_desc(status_update::Column::Id);

        if let Some(id) = until_id {
            query = query.filter(status_update::Column::Id.lt(id));
        }

        query
            .limit(limit)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_status(id: &str, user_id: &str, content: &str) -> status_update::Model {
        status_update::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            content: content.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_user_newest_first() {
        let newer = create_test_status("s2", "u1", "second post");
        let older = create_test_status("s1", "u1", "first post");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[newer.clone(), older]])
                .into_connection(),
        );

        let repo = StatusUpdateRepository::new(db);
        let result = repo.find_by_user("u1", 10, None).await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].content, "second post");
    }
}
