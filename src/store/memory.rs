use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{Chirp, RefreshToken, User};
use crate::error::{AppError, DatabaseError};
use crate::store::Store;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    // Insertion order is creation order
    chirps: Vec<Chirp>,
    refresh_tokens: HashMap<String, RefreshToken>,
}

/// `Store` kept in process memory
///
/// Enforces the same constraints as the Postgres schema: unique emails and
/// cascading deletes from users to chirps and refresh tokens.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> Result<MutexGuard<'_, Tables>, AppError> {
        self.tables
            .lock()
            .map_err(|_| AppError::Internal("memory store lock poisoned".to_string()))
    }
}

fn missing_user(id: Uuid) -> AppError {
    AppError::not_found(format!("User {} not found", id))
}

fn duplicate_email() -> AppError {
    AppError::Database(DatabaseError::UniqueConstraintViolation(
        "Email already registered".to_string(),
    ))
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User, AppError> {
        let mut tables = self.tables()?;
        if tables.users.values().any(|u| u.email == email) {
            return Err(duplicate_email());
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
            is_chirpy_red: false,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables()?;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.tables()?.users.get(&id).cloned())
    }

    async fn update_user_credentials(
        &self,
        id: Uuid,
        email: &str,
        hashed_password: &str,
    ) -> Result<Option<User>, AppError> {
        let mut tables = self.tables()?;
        if tables.users.values().any(|u| u.email == email && u.id != id) {
            return Err(duplicate_email());
        }

        Ok(tables.users.get_mut(&id).map(|user| {
            user.email = email.to_string();
            user.hashed_password = hashed_password.to_string();
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn upgrade_user_to_chirpy_red(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables()?;
        match tables.users.get_mut(&id) {
            Some(user) => {
                user.is_chirpy_red = true;
                user.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all_users(&self) -> Result<(), AppError> {
        let mut tables = self.tables()?;
        tables.users.clear();
        tables.chirps.clear();
        tables.refresh_tokens.clear();
        Ok(())
    }

    async fn create_chirp(&self, user_id: Uuid, body: &str) -> Result<Chirp, AppError> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(&user_id) {
            return Err(missing_user(user_id));
        }

        let now = Utc::now();
        let chirp = Chirp {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            body: body.to_string(),
            user_id,
        };
        tables.chirps.push(chirp.clone());
        Ok(chirp)
    }

    async fn list_chirps(&self, author_id: Option<Uuid>) -> Result<Vec<Chirp>, AppError> {
        let tables = self.tables()?;
        Ok(tables
            .chirps
            .iter()
            .filter(|c| author_id.map_or(true, |author| c.user_id == author))
            .cloned()
            .collect())
    }

    async fn find_chirp(&self, id: Uuid) -> Result<Option<Chirp>, AppError> {
        let tables = self.tables()?;
        Ok(tables.chirps.iter().find(|c| c.id == id).cloned())
    }

    async fn delete_chirp(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tables = self.tables()?;
        let before = tables.chirps.len();
        tables.chirps.retain(|c| c.id != id);
        Ok(tables.chirps.len() != before)
    }

    async fn create_refresh_token(
        &self,
        token_hash: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> Result<RefreshToken, AppError> {
        let mut tables = self.tables()?;
        if !tables.users.contains_key(&user_id) {
            return Err(missing_user(user_id));
        }

        let now = Utc::now();
        let token = RefreshToken {
            token_hash: token_hash.to_string(),
            created_at: now,
            updated_at: now,
            user_id,
            expires_at,
            revoked_at: None,
        };
        tables
            .refresh_tokens
            .insert(token.token_hash.clone(), token.clone());
        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, AppError> {
        Ok(self.tables()?.refresh_tokens.get(token_hash).cloned())
    }

    async fn revoke_refresh_token(&self, token_hash: &str) -> Result<bool, AppError> {
        let mut tables = self.tables()?;
        match tables.refresh_tokens.get_mut(token_hash) {
            Some(token) => {
                let now = Utc::now();
                token.revoked_at.get_or_insert(now);
                token.updated_at = now;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
