use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Chirp, RefreshToken, User};
use crate::error::AppError;
use crate::store::Store;

/// `Store` backed by Postgres
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError> {
        let now = Utc::now();
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, created_at, updated_at, email, hashed_password)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(now)
        .bind(now)
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, created_at, updated_at, email, hashed_password, is_chirpy_red FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_user_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET email = $1, hashed_password = $2, updated_at = $3
            WHERE id = $4
            RETURNING id, created_at, updated_at, email, hashed_password, is_chirpy_red
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn upgrade_user_to_chirpy_red(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE users SET is_chirpy_red = TRUE, updated_at = $1 WHERE id = $2",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all_users(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM users").execute(&self.pool).await?;
        Ok(())
    }

    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<Chirp, AppError> {
        let now = Utc::now();
        let chirp = sqlx::query_as::<_, Chirp>(
            r#"
            INSERT INTO chirps (id, created_at, updated_at, body, user_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, created_at, updated_at, body, user_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(now)
        .bind(now)
        .bind(body)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(chirp)
    }

    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<Chirp>, AppError> {
        let chirps = match author_id {
            Some(author_id) => {
                sqlx::query_as::<_, Chirp>(
                    "SELECT id, created_at, updated_at, body, user_id FROM chirps WHERE user_id = $1 ORDER BY created_at ASC",
                )
                .bind(author_id)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Chirp>(
                    "SELECT id, created_at, updated_at, body, user_id FROM chirps ORDER BY created_at ASC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(chirps)
    }

    async fn find_chirp(&self, id: Uuid) -> Result<Option<Chirp>, AppError> {
        let chirp = sqlx::query_as::<_, Chirp>(
            "SELECT id, created_at, updated_at, body, user_id FROM chirps WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(chirp)
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_refresh_token(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError> {
        let now = Utc::now();
        let token = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (token_hash, created_at, updated_at, user_id, expires_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING token_hash, created_at, updated_at, user_id, expires_at, revoked_at
            "#,
        )
        .bind(token_hash)
        .bind(now)
        .bind(now)
        .bind(user_id)
        .bind(expires_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, AppError> {
        let token = sqlx::query_as::<_, RefreshToken>(
            r#"
            SELECT token_hash, created_at, updated_at, user_id, expires_at, revoked_at
            FROM refresh_tokens
            WHERE token_hash = $1
            "#,
        )
        .bind(token_hash)
        .fetch_optional(&self.pool)
        .await?;

        Ok(token)
    }

    async fn revoke_refresh_token(&self, token_hash: &str) -> Result<bool, AppError> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE refresh_tokens
            SET revoked_at = COALESCE(revoked_at, $1), updated_at = $1
            WHERE token_hash = $2
            "#,
        )
        .bind(now)
        .bind(token_hash)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
