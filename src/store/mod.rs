/// Persistence service
///
/// Handlers talk to storage only through `Store`. Lookups return
/// `Result<Option<T>, AppError>`: `Ok(Some)` found, `Ok(None)` no such row,
/// `Err` a genuine storage failure. Mutations keyed by id report whether a
/// row was affected.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Chirp, RefreshToken, User};
use crate::error::AppError;

#[async_trait]
pub trait Store: Send + Sync {
    /// Insert a user; duplicate emails fail with `UniqueConstraintViolation`
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError>;
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;
    async fn update_user_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, AppError>;
    async fn upgrade_user_to_chirpy_red(&self, id: Uuid) -> Result<bool, AppError>;
    /// Remove every user together with their chirps and refresh tokens
    async fn delete_all_users(&self) -> Result<(), AppError>;

    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<Chirp, AppError>;
    /// Chirps ordered by creation time, oldest first
    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<Chirp>, AppError>;
    async fn find_chirp(&self, id: Uuid) -> Result<Option<Chirp>, AppError>;
    async fn delete_chirp(&self, id: Uuid) -> Result<bool, AppError>;

    async fn create_refresh_token(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError>;
    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, AppError>;
    async fn revoke_refresh_token(&self, token_hash: &str) -> Result<bool, AppError>;
}
