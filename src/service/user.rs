use std::sync::Arc;

use thiserror::Error;

use crate::auth::token::{TokenError, TokenIssuer};
use crate::auth::{HashError, PasswordHasher};
use crate::routes::auth::model::LoginRequest;
use crate::routes::user::model::{RegisterUserRequest, UpdateUserRequest};
use crate::store::{StoreError, User, UserStore};
use crate::validation;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error("the email '{0}' is already registered")]
    EmailTaken(String),
    #[error("authentication failed")]
    Authentication,
    #[error("user not found")]
    UserNotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Hash(#[from] HashError),
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// Login result: the authenticated record plus its freshly issued token.
#[derive(Debug)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}

/// Orchestrates validation, uniqueness checks, credential hashing, store
/// calls, and token issuance. Stateless between calls.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenIssuer,
    name_min_length: usize,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: TokenIssuer,
        name_min_length: usize,
    ) -> Self {
        Self {
            store,
            hasher,
            tokens,
            name_min_length,
        }
    }

    pub async fn register(&self, req: RegisterUserRequest) -> Result<User, ServiceError> {
        let violations = validation::validate_registration(&req, self.name_min_length);
        if !violations.is_empty() {
            return Err(ServiceError::Validation(violations));
        }

        if self.store.get_by_email(&req.email).await?.is_some() {
            return Err(ServiceError::EmailTaken(req.email));
        }

        let email = req.email.clone();
        let password_hash = self.hasher.hash(&req.password)?;
        let user = User {
            id: 0,
            name: req.name,
            last_name: req.last_name,
            phone_number: req.phone_number,
            email: req.email,
            password_hash,
            department_id: req.department_id,
            role: req.role,
            active: true,
        };

        // The pre-check above is best-effort; the store's uniqueness
        // constraint is the authority under concurrent registration.
        let created = match self.store.create(user).await {
            Ok(created) => created,
            Err(StoreError::Duplicate { .. }) => return Err(ServiceError::EmailTaken(email)),
            Err(err) => return Err(err.into()),
        };

        tracing::info!(user_id = created.id, "registered user");
        Ok(created)
    }

    pub async fn login(&self, req: LoginRequest) -> Result<AuthenticatedUser, ServiceError> {
        let violations = validation::validate_login(&req);
        if !violations.is_empty() {
            return Err(ServiceError::Validation(violations));
        }

        // Unknown email, inactive account, and wrong password all resolve
        // to the same failure; the caller must not learn which occurred.
        let user = match self.store.get_by_email(&req.email).await? {
            Some(user) if user.active => user,
            _ => {
                tracing::warn!(email = %req.email, "login rejected");
                return Err(ServiceError::Authentication);
            }
        };

        if !self.hasher.verify(&req.password, &user.password_hash)? {
            tracing::warn!(email = %req.email, "login rejected");
            return Err(ServiceError::Authentication);
        }

        let token = self.tokens.issue(&user)?;
        tracing::info!(user_id = user.id, "login succeeded");
        Ok(AuthenticatedUser { user, token })
    }

    pub async fn get_all(&self) -> Result<Vec<User>, ServiceError> {
        Ok(self.store.get_all().await?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<User, ServiceError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound)
    }

    pub async fn update(&self, id: i32, req: UpdateUserRequest) -> Result<User, ServiceError> {
        let violations = validation::validate_update(&req, self.name_min_length);
        if !violations.is_empty() {
            return Err(ServiceError::Validation(violations));
        }

        let existing = self
            .store
            .get_by_id(id)
            .await?
            .ok_or(ServiceError::UserNotFound)?;

        if !req.email.eq_ignore_ascii_case(&existing.email) {
            if let Some(other) = self.store.get_by_email(&req.email).await? {
                if other.id != id {
                    return Err(ServiceError::EmailTaken(req.email));
                }
            }
        }

        // A blank password means "keep the current credentials"; an empty
        // string must never reach the hasher.
        let password_hash = match req.password.as_deref() {
            Some(password) if !password.trim().is_empty() => self.hasher.hash(password)?,
            _ => existing.password_hash,
        };

        let email = req.email.clone();
        let user = User {
            id,
            name: req.name,
            last_name: req.last_name,
            phone_number: req.phone_number,
            email: req.email,
            password_hash,
            department_id: req.department_id,
            role: req.role,
            active: existing.active,
        };

        match self.store.update(user).await {
            Ok(updated) => {
                tracing::info!(user_id = id, "updated user");
                Ok(updated)
            }
            Err(StoreError::Duplicate { .. }) => Err(ServiceError::EmailTaken(email)),
            Err(StoreError::NotFound) => Err(ServiceError::UserNotFound),
            Err(err) => Err(err.into()),
        }
    }

    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        if self.store.get_by_id(id).await?.is_none() {
            return Err(ServiceError::UserNotFound);
        }

        if !self.store.delete_by_id(id).await? {
            return Err(ServiceError::UserNotFound);
        }

        tracing::info!(user_id = id, "deleted user");
        Ok(true)
    }

    pub async fn is_email_unique(&self, email: &str) -> Result<bool, ServiceError> {
        if email.trim().is_empty() {
            return Err(ServiceError::Validation(vec![
                "email cannot be empty".to_string(),
            ]));
        }

        Ok(self.store.email_is_unique(email).await?)
    }
}
