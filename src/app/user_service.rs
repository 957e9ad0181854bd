//! Business validation and orchestration for user operations.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::{AppError, CreateUserRequest, NewUser, UpdateUserRequest, User, UserRepository};

/// Validates input and enforces the username/email uniqueness invariant
/// before delegating to the repository.
///
/// The pre-checks here are a fast path; the database's unique constraints
/// remain the authoritative guard under concurrent writers.
pub struct UserService {
    repository: Arc<dyn UserRepository>,
}

impl UserService {
    #[must_use]
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    /// Creates a new user.
    ///
    /// # Errors
    ///
    /// `Validation` when username or email is missing or blank, `Conflict`
    /// when either already belongs to another user.
    #[instrument(skip(self, request))]
    pub async fn create_user(&self, request: &CreateUserRequest) -> Result<User, AppError> {
        let username = non_blank(request.username.as_deref())
            .ok_or_else(|| AppError::Validation("username is required".to_string()))?;
        let email = non_blank(request.email.as_deref())
            .ok_or_else(|| AppError::Validation("email is required".to_string()))?;

        if self.repository.find_by_username(&username).await?.is_some() {
            warn!(%username, "Rejected user creation: username taken");
            return Err(AppError::Conflict("username already exists".to_string()));
        }
        if self.repository.find_by_email(&email).await?.is_some() {
            warn!(%email, "Rejected user creation: email taken");
            return Err(AppError::Conflict("email already exists".to_string()));
        }

        let new_user = NewUser {
            username,
            email,
            first_name: request.first_name.clone(),
            last_name: request.last_name.clone(),
        };

        let user = self.repository.save(&new_user).await?;
        info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn get_user(&self, id: i64) -> Result<Option<User>, AppError> {
        self.repository.find_by_id(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.repository.find_by_username(username).await
    }

    pub async fn get_all_users(&self) -> Result<Vec<User>, AppError> {
        self.repository.find_all().await
    }

    /// Applies a partial update to a stored user.
    ///
    /// Only fields present in the patch change; blank username/email values
    /// are skipped rather than applied. When username or email changes, its
    /// uniqueness is re-checked against the other rows.
    ///
    /// # Errors
    ///
    /// `NotFound` when the id does not exist, `Conflict` when the new
    /// username or email is already taken.
    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: i64, patch: &UpdateUserRequest) -> Result<User, AppError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user not found with id: {id}")))?;

        if let Some(username) = non_blank(patch.username.as_deref()) {
            if username != user.username
                && self.repository.find_by_username(&username).await?.is_some()
            {
                return Err(AppError::Conflict("username already exists".to_string()));
            }
            user.username = username;
        }

        if let Some(email) = non_blank(patch.email.as_deref()) {
            if email != user.email && self.repository.find_by_email(&email).await?.is_some() {
                return Err(AppError::Conflict("email already exists".to_string()));
            }
            user.email = email;
        }

        if let Some(first_name) = &patch.first_name {
            user.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &patch.last_name {
            user.last_name = Some(last_name.clone());
        }

        let updated = self.repository.update(&user).await?;
        info!(user_id = updated.id, "User updated");
        Ok(updated)
    }

    /// Deletes a user by id. Returns `false` when the id does not exist.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> Result<bool, AppError> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.repository.delete_by_id(id).await?;
        info!(user_id = id, "User deleted");
        Ok(true)
    }

    pub async fn count_users(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }
}

/// `None`, empty, and whitespace-only all count as absent.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|s| !s.trim().is_empty())
        .map(ToString::to_string)
}
