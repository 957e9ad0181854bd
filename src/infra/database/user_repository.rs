//! PostgreSQL implementation of the user repository.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row;
use tracing::instrument;

use crate::domain::{AppError, DatabaseError, NewUser, User, UserRepository};

use super::postgres::PostgresGateway;

pub struct PostgresUserRepository {
    gateway: Arc<PostgresGateway>,
}

impl PostgresUserRepository {
    #[must_use]
    pub fn new(gateway: Arc<PostgresGateway>) -> Self {
        Self { gateway }
    }

    fn row_to_user(row: &sqlx::postgres::PgRow) -> User {
        User {
            id: row.get("id"),
            username: row.get("username"),
            email: row.get("email"),
            first_name: row.get("first_name"),
            last_name: row.get("last_name"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

/// The unique constraints on `users` are the authoritative uniqueness guard;
/// a violation that slips past the service-level pre-check surfaces here as
/// a conflict, named after the offending column.
fn map_user_conflict(err: sqlx::Error) -> AppError {
    match DatabaseError::from(err) {
        DatabaseError::Duplicate(message) => {
            if message.contains("users_email_key") {
                AppError::Conflict("email already exists".to_string())
            } else {
                AppError::Conflict("username already exists".to_string())
            }
        }
        other => AppError::Database(other),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    #[instrument(skip(self, user), fields(username = %user.username))]
    async fn save(&self, user: &NewUser) -> Result<User, AppError> {
        let now = Utc::now();
        let mut tx = self.gateway.begin().await?;

        let row = sqlx::query(
            r#"
            INSERT INTO users (username, email, first_name, last_name, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(now)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_user_conflict)?;

        tx.commit().await.map_err(map_user_conflict)?;

        Ok(User {
            id: row.get("id"),
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, first_name, last_name, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.gateway.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    #[instrument(skip(self))]
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, first_name, last_name, created_at, updated_at
            FROM users
            WHERE username = $1
            LIMIT 1
            "#,
        )
        .bind(username)
        .fetch_optional(self.gateway.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query(
            r#"
            SELECT id, username, email, first_name, last_name, created_at, updated_at
            FROM users
            WHERE email = $1
            LIMIT 1
            "#,
        )
        .bind(email)
        .fetch_optional(self.gateway.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_user))
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query(
            r#"
            SELECT id, username, email, first_name, last_name, created_at, updated_at
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.gateway.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_user).collect())
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn update(&self, user: &User) -> Result<User, AppError> {
        let now = Utc::now();
        let mut tx = self.gateway.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $1, email = $2, first_name = $3, last_name = $4, updated_at = $5
            WHERE id = $6
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(now)
        .bind(user.id)
        .execute(&mut *tx)
        .await
        .map_err(map_user_conflict)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "user not found with id: {}",
                user.id
            )));
        }

        tx.commit().await.map_err(map_user_conflict)?;

        Ok(User {
            updated_at: now,
            ..user.clone()
        })
    }

    #[instrument(skip(self))]
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        let mut tx = self.gateway.begin().await?;

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn count(&self) -> Result<i64, AppError> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM users")
            .fetch_one(self.gateway.pool())
            .await?;

        Ok(row.get("count"))
    }
}
