//! Password hashing

use crate::error::{Error, Result};

/// bcrypt wrapper with a fixed cost
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Salt and hash a plaintext password
    pub fn hash(&self, plain: &str) -> Result<String> {
        Ok(bcrypt::hash(plain, self.cost)?)
    }

    /// Compare a plaintext password against a stored hash.
    /// A malformed hash never matches.
    pub fn verify(&self, plain: &str, hash: &str) -> bool {
        bcrypt::verify(plain, hash).unwrap_or(false)
    }

    /// `hash` on the blocking pool
    pub async fn hash_blocking(&self, plain: String) -> Result<String> {
        let hasher = *self;
        blocking(move || hasher.hash(&plain)).await?
    }

    /// `verify` on the blocking pool
    pub async fn verify_blocking(&self, plain: String, hash: String) -> Result<bool> {
        let hasher = *self;
        blocking(move || hasher.verify(&plain, &hash)).await
    }
}

/// bcrypt is deliberately slow; keep it off the async workers
async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::Other(format!("password task failed: {}", e)))
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
