use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::{AppError, Result};
use crate::domain::user::User;

use super::entities::UserEntity;
use super::VaultRepository;

impl VaultRepository {
    /// Look up the user behind a session token digest. Expired sessions
    /// are treated as absent.
    pub async fn user_for_token_hash(&self, token_hash: &str) -> Result<Option<User>> {
        let now = Utc::now().to_rfc3339();

        let entity = sqlx::query_as::<_, UserEntity>(
            "SELECT u.id, u.email FROM sessions s
             JOIN users u ON u.id = s.user_id
             WHERE s.token_hash = ? AND s.expires_at > ?",
        )
        .bind(token_hash)
        .bind(&now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to resolve session: {}", e)))?;

        Ok(entity.map(Into::into))
    }

    pub async fn create_user(&self, email: &str) -> Result<User> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        let entity = sqlx::query_as::<_, UserEntity>(
            "INSERT INTO users (id, email, created_at) VALUES (?, ?, ?) RETURNING id, email",
        )
        .bind(&id)
        .bind(email)
        .bind(&now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create user: {}", e)))?;

        Ok(entity.into())
    }

    pub async fn create_session(
        &self,
        user_id: &str,
        token_hash: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO sessions (id, user_id, token_hash, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at.to_rfc3339())
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(format!("Failed to create session: {}", e)))?;

        Ok(())
    }
}
