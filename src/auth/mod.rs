pub mod token;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HashError {
    #[error("password hashing failed: {0}")]
    Bcrypt(#[from] bcrypt::BcryptError),
}

/// Capability for one-way credential hashing. Production uses bcrypt; tests
/// substitute deterministic implementations.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, HashError>;
    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, HashError>;
}

/// Salted adaptive hashing with a tunable work factor. A fast
/// general-purpose digest must never stand in for this.
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &str) -> Result<String, HashError> {
        Ok(bcrypt::hash(plaintext.as_bytes(), self.cost)?)
    }

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool, HashError> {
        Ok(bcrypt::verify(plaintext.as_bytes(), hash)?)
    }
}
