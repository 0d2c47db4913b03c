//! Course material repository.

use std::sync::Arc;

use crate::entities::{CourseMaterial, course_material};
use campus_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

/// Course material repository for database operations.
#[derive(Clone)]
pub struct CourseMaterialRepository {
    db: Arc<DatabaseConnection>,
}

impl CourseMaterialRepository {
    /// Create a new course material repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a material by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<course_material::Model>> {
        CourseMaterial::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a material.
    pub async fn create(
        &self,
        model: course_material::ActiveModel,
    ) -> AppResult<course_material::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List materials for a course, newest first.
    pub async fn find_by_course(&self, course_id: &str) -> AppResult<Vec<course_material::Model>> {
        CourseMaterial::find()
            .filter(course_material::Column::CourseId.eq(course_id))
            .order_by_desc(course_material::Column::UploadedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a material.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let material = self.find_by_id(id).await?;
        if let Some(m) = material {
            m.delete(self.db.as_ref())
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

    fn create_test_material(id: &str, course_id: &str, file_name: &str) -> course_material::Model {
        course_material::Model {
            id: id.to_string(),
            course_id: course_id.to_string(),
            file_name: file_name.to_string(),
            file_url: format!("/media/course_materials/{file_name}"),
            uploaded_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_course() {
        let m1 = create_test_material("m1", "c1", "syllabus.pdf");
        let m2 = create_test_material("m2", "c1", "week1.pdf");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[m1, m2]])
                .into_connection(),
        );

        let repo = CourseMaterialRepository::new(db);
        let result = repo.find_by_course("c1").await.unwrap();

        assert_eq!(result.len(), 2);
    }
}
