pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

/// Persisted identity record. The password field only ever holds a hash;
/// it never leaves the process in serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub last_name: String,
    pub phone_number: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub department_id: i32,
    pub role: String,
    pub active: bool,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a record with {field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },
    #[error("record not found")]
    NotFound,
    #[error("database operation failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence port for user records. Email matching is case-insensitive
/// in every implementation, and uniqueness is enforced by the store itself
/// regardless of any caller-side pre-checks.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persists a new record and assigns its id.
    async fn create(&self, user: User) -> Result<User, StoreError>;

    /// Replaces an existing record, keyed by `user.id`.
    async fn update(&self, user: User) -> Result<User, StoreError>;

    async fn delete_by_id(&self, id: i32) -> Result<bool, StoreError>;

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn get_all(&self) -> Result<Vec<User>, StoreError>;

    async fn email_is_unique(&self, email: &str) -> Result<bool, StoreError>;
}
