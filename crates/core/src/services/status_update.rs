//! Status update service.

use campus_common::{AppResult, IdGenerator};
use campus_db::{
    entities::status_update,
    repositories::{StatusUpdateRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Status update service for business logic.
#[derive(Clone)]
pub struct StatusUpdateService {
    status_repo: StatusUpdateRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for posting a status update.
#[derive(Debug, Deserialize, Validate)]
pub struct PostStatusInput {
    #[validate(length(min = 1, max = 1000))]
    pub content: String,
}

impl StatusUpdateService {
    /// Create a new status update service.
    #[must_use]
    pub const fn new(status_repo: StatusUpdateRepository, user_repo: UserRepository) -> Self {
        Self {
            status_repo,
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Post a status update. Any authenticated user may post; there is no
    /// role restriction here.
    pub async fn post(
        &self,
        actor_id: &str,
        input: PostStatusInput,
    ) -> AppResult<status_update::Model> {
        input.validate()?;

        let model = status_update::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(actor_id.to_string()),
            content: Set(input.content),
            ..Default::default()
        };

        self.status_repo.create(model).await
    }

    /// List a user's status updates, newest first. Fails if the user does
    /// not exist.
    pub async fn list_for_user(
        &self,
        user_id: &str,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<status_update::Model>> {
        self.user_repo.get_by_id(user_id).await?;
        self.status_repo.find_by_user(user_id, limit, until_id).await
    }

    /// List recent status updates across all users, newest first.
    pub async fn list_recent(
        &self,
        limit: u64,
        until_id: Option<&str>,
    ) -> AppResult<Vec<status_update::Model>> {
        self.status_repo.find_recent(limit, until_id).await
    }
}
