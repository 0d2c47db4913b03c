//! Account service.

use crate::authorization;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use campus_common::{AppError, AppResult, IdGenerator};
use campus_db::{
    entities::user::{self, UserRole},
    repositories::UserRepository,
};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

/// Account service for registration, login, and profile management.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

/// Input for registering a new account.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 128))]
    pub username: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    /// Student or teacher. Fixed at registration.
    pub role: UserRole,

    #[validate(length(max = 256))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(url)]
    pub photo_url: Option<String>,
}

/// Input for updating a profile.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileInput {
    #[validate(length(max = 256))]
    pub name: Option<String>,

    #[validate(email)]
    pub email: Option<String>,

    #[validate(url)]
    pub photo_url: Option<String>,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Register a new account.
    pub async fn register(&self, input: RegisterInput) -> AppResult<user::Model> {
        input.validate()?;

        if self
            .user_repo
            .find_by_username(&input.username)
            .await?
            .is_some()
        {
            return Err(AppError::BadRequest("Username already taken".to_string()));
        }

        let password_hash = hash_password(&input.password)?;
        let token = self.id_gen.generate_token();

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(input.username.clone()),
            username_lower: Set(input.username.to_lowercase()),
            role: Set(input.role),
            token: Set(Some(token)),
            name: Set(input.name),
            email: Set(input.email),
            photo_url: Set(input.photo_url),
            password_hash: Set(password_hash),
            ..Default::default()
        };

        self.user_repo.create(model).await
    }

    /// Authenticate by username and password, returning the account on
    /// success.
    ///
    /// An unknown username and a wrong password produce the same error.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }

    /// Authenticate by access token.
    pub async fn authenticate_by_token(&self, token: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_token(token)
            .await?
            .ok_or(AppError::Unauthorized)
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Get a user by username.
    pub async fn get_by_username(&self, username: &str) -> AppResult<user::Model> {
        self.user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::UserNotFound(username.to_string()))
    }

    /// Update a profile. Only the owner may edit it.
    pub async fn update_profile(
        &self,
        actor_id: &str,
        target_user_id: &str,
        input: UpdateProfileInput,
    ) -> AppResult<user::Model> {
        input.validate()?;

        let actor = self.user_repo.get_by_id(actor_id).await?;
        if !authorization::can_edit_profile(&actor, target_user_id) {
            return Err(AppError::Forbidden(
                "You can only edit your own profile".to_string(),
            ));
        }

        let user = self.user_repo.get_by_id(target_user_id).await?;
        let mut active: user::ActiveModel = user.into();

        if let Some(name) = input.name {
            active.name = Set(Some(name));
        }
        if let Some(email) = input.email {
            active.email = Set(Some(email));
        }
        if let Some(photo_url) = input.photo_url {
            active.photo_url = Set(Some(photo_url));
        }

        active.updated_at = Set(Some(chrono::Utc::now().into()));

        self.user_repo.update(active).await
    }

    /// Search users by username or display name.
    pub async fn search(&self, query: &str, limit: u64) -> AppResult<Vec<user::Model>> {
        self.user_repo.search(query, limit).await
    }

    /// List users, newest first.
    pub async fn list(&self, limit: u64, until_id: Option<&str>) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_all(limit, until_id).await
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str, role: UserRole) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            username_lower: username.to_lowercase(),
            role,
            token: Some("test_token".to_string()),
            name: Some("Test User".to_string()),
            email: None,
            photo_url: None,
            password_hash: hash_password("correct horse").unwrap(),
            created_at: Utc::now().into(),
            updated_at: None,
        }
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = AccountService::new(UserRepository::new(db));

        let result = service
            .register(RegisterInput {
                username: "alice".to_string(),
                password: "short".to_string(),
                role: UserRole::Student,
                name: None,
                email: None,
                photo_url: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let existing = create_test_user("u1", "alice", UserRole::Student);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = AccountService::new(UserRepository::new(db));

        let result = service
            .register(RegisterInput {
                username: "Alice".to_string(),
                password: "a much longer password".to_string(),
                role: UserRole::Student,
                name: None,
                email: None,
                photo_url: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_unauthorized() {
        let existing = create_test_user("u1", "alice", UserRole::Student);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = AccountService::new(UserRepository::new(db));

        let result = service.login("alice", "wrong password").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_unknown_user_is_unauthorized() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = AccountService::new(UserRepository::new(db));

        let result = service.login("nobody", "whatever pass").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_login_correct_password() {
        let existing = create_test_user("u1", "alice", UserRole::Student);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = AccountService::new(UserRepository::new(db));

        let user = service.login("alice", "correct horse").await.unwrap();
        assert_eq!(user.id, "u1");
    }

    #[tokio::test]
    async fn test_authenticate_by_token_unknown_is_unauthorized() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = AccountService::new(UserRepository::new(db));

        let result = service.authenticate_by_token("bogus").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_update_profile_rejects_other_users() {
        let actor = create_test_user("u1", "alice", UserRole::Student);

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[actor]])
                .into_connection(),
        );
        let service = AccountService::new(UserRepository::new(db));

        let result = service
            .update_profile(
                "u1",
                "u2",
                UpdateProfileInput {
                    name: Some("New Name".to_string()),
                    email: None,
                    photo_url: None,
                },
            )
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }
}
