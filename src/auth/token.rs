use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::Config;
use crate::store::User;

#[derive(Debug, Error)]
pub enum TokenError {
    /// A deployment defect, not a per-request condition. Never retried.
    #[error("token configuration is invalid: {0}")]
    Configuration(&'static str),
    #[error("token processing failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Builds and signs bounded-lifetime session tokens for authenticated
/// users, and validates them for the protected routes.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: String,
    issuer: String,
    audience: String,
    expiry_minutes: i64,
}

impl TokenIssuer {
    pub fn new(secret: String, issuer: String, audience: String, expiry_minutes: i64) -> Self {
        Self {
            secret,
            issuer,
            audience,
            expiry_minutes,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.jwt_secret.clone(),
            config.jwt_issuer.clone(),
            config.jwt_audience.clone(),
            config.token_expiry_minutes,
        )
    }

    fn check_configuration(&self) -> Result<(), TokenError> {
        if self.secret.trim().is_empty() {
            return Err(TokenError::Configuration("signing secret is empty"));
        }
        if self.issuer.trim().is_empty() {
            return Err(TokenError::Configuration("issuer is empty"));
        }
        if self.audience.trim().is_empty() {
            return Err(TokenError::Configuration("audience is empty"));
        }
        Ok(())
    }

    pub fn issue(&self, user: &User) -> Result<String, TokenError> {
        self.check_configuration()?;

        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: format!("{} {}", user.name, user.last_name),
            role: user.role.clone(),
            jti: Uuid::new_v4().to_string(),
            iat,
            exp: iat + self.expiry_minutes * 60,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.check_configuration()?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )?;
        Ok(data.claims)
    }
}
