use std::collections::HashMap;
use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, User, UserStore};

/// In-memory user store for development and tests. Enforces the same
/// case-insensitive email uniqueness contract as the Postgres store.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<i32, User>>,
    next_id: AtomicI32,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, mut user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        let taken = users
            .values()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(StoreError::Duplicate {
                field: "email",
                value: user.email,
            });
        }

        user.id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound);
        }
        let taken = users
            .values()
            .any(|u| u.id != user.id && u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(StoreError::Duplicate {
                field: "email",
                value: user.email,
            });
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, StoreError> {
        Ok(self.users.write().await.remove(&id).is_some())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn get_all(&self) -> Result<Vec<User>, StoreError> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn email_is_unique(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.get_by_email(email).await?.is_none())
    }
}
