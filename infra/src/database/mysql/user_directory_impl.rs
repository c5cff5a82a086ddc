//! MySQL implementation of the UserDirectory trait.
//!
//! Passwords are stored as bcrypt hashes. Hashing and verification run on
//! the blocking pool so they do not stall the async workers.

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use sg_core::domain::entities::user::{Identity, Role, User};
use sg_core::errors::{AuthError, DomainError};
use sg_core::repositories::UserDirectory;

/// MySQL implementation of UserDirectory
pub struct MySqlUserDirectory {
    /// Database connection pool
    pool: MySqlPool,
    /// bcrypt work factor for new passwords
    bcrypt_cost: u32,
}

impl MySqlUserDirectory {
    /// Create a new MySQL user directory
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            pool,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost (tests use the minimum)
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }

    /// Convert database row to User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: i64 = row.try_get("id").map_err(decode_error)?;
        let role: String = row.try_get("role").map_err(decode_error)?;

        Ok(User {
            id: Identity(id),
            username: row.try_get("username").map_err(decode_error)?,
            external_id: row.try_get("iin").map_err(decode_error)?,
            role: role.parse().unwrap_or_else(|_| {
                tracing::warn!(user_id = id, role = %role, "Unknown role in users table, treating as user");
                Role::User
            }),
        })
    }

    async fn hash_password(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.bcrypt_cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| internal("password hashing task failed", e))?
            .map_err(|e| internal("password hashing failed", e))
    }

    async fn verify_password(password: &str, hash: String) -> Result<bool, DomainError> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| internal("password verification task failed", e))?
            .map_err(|e| internal("password verification failed", e))
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, DomainError> {
        let row = sqlx::query("SELECT id, password_hash FROM users WHERE username = ? LIMIT 1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        let Some(row) = row else {
            return Err(AuthError::InvalidCredentials.into());
        };

        let id: i64 = row.try_get("id").map_err(decode_error)?;
        let hash: String = row.try_get("password_hash").map_err(decode_error)?;

        if Self::verify_password(password, hash).await? {
            Ok(Identity(id))
        } else {
            Err(AuthError::InvalidCredentials.into())
        }
    }

    async fn get_by_identity(&self, identity: Identity) -> Result<Option<User>, DomainError> {
        let row = sqlx::query("SELECT id, username, iin, role FROM users WHERE id = ? LIMIT 1")
            .bind(identity.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(query_error)?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn create_if_unique(
        &self,
        username: &str,
        password: &str,
        external_id: &str,
    ) -> Result<Identity, DomainError> {
        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE username = ? OR iin = ?")
            .bind(username)
            .bind(external_id)
            .fetch_one(&self.pool)
            .await
            .map_err(query_error)?;

        if taken > 0 {
            return Err(AuthError::AlreadyExists.into());
        }

        let password_hash = self.hash_password(password).await?;

        // The unique indexes settle races between concurrent registrations
        let result = sqlx::query("INSERT INTO users (username, password_hash, iin, role) VALUES (?, ?, ?, ?)")
            .bind(username)
            .bind(&password_hash)
            .bind(external_id)
            .bind(Role::User.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::AlreadyExists.into(),
                _ => query_error(e),
            })?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|e| internal("inserted id out of range", e))?;
        Ok(Identity(id))
    }
}

fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "User directory query failed");
    DomainError::DirectoryUnavailable {
        message: "user directory query failed".to_string(),
    }
}

fn decode_error(e: sqlx::Error) -> DomainError {
    internal("unexpected users row layout", e)
}

fn internal(context: &str, e: impl std::fmt::Display) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::Internal {
        message: context.to_string(),
    }
}
