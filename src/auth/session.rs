//! Register and login

use std::sync::Arc;

use crate::auth::jwt::TokenService;
use crate::auth::models::{Identity, LoginAttempt, NewIdentity, SessionGrant, SessionOutcome};
use crate::auth::password::PasswordHasher;
use crate::error::{Error, Result};
use crate::store::CredentialStore;

pub const IDENTITY_NOT_FOUND: &str = "Username or email not found";
pub const INVALID_PASSWORD: &str = "Invalid password";

/// Orchestrates registration and login over a credential store
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn CredentialStore>,
    tokens: Arc<TokenService>,
    hasher: PasswordHasher,
}

impl SessionService {
    pub fn new(
        store: Arc<dyn CredentialStore>,
        tokens: Arc<TokenService>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            store,
            tokens,
            hasher,
        }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    pub fn hasher(&self) -> PasswordHasher {
        self.hasher
    }

    /// Store a new identity and hand back a token for it.
    ///
    /// Uniqueness violations surface as `Error::Conflict`.
    pub async fn register(&self, candidate: NewIdentity) -> Result<SessionGrant> {
        if let Some(reason) = candidate.missing_field() {
            return Err(Error::BadRequest(reason.to_string()));
        }

        let hash = self.hasher.hash_blocking(candidate.password.clone()).await?;
        let identity = self.store.insert(candidate, hash).await?;
        tracing::info!(user_id = identity.id, username = %identity.username, "user registered");

        self.grant(&identity)
    }

    /// Check a login attempt against the stored identity
    pub async fn login(&self, attempt: LoginAttempt) -> Result<SessionOutcome> {
        let identity = self
            .store
            .find_by_username_or_email(attempt.username.as_deref(), attempt.email.as_deref())
            .await?;

        let Some(identity) = identity else {
            tracing::info!(
                username = ?attempt.username,
                email = ?attempt.email,
                "login failed: {}",
                IDENTITY_NOT_FOUND
            );
            return Ok(SessionOutcome::denied(IDENTITY_NOT_FOUND));
        };

        let matches = self
            .hasher
            .verify_blocking(attempt.password, identity.password_hash.clone())
            .await?;
        if !matches {
            tracing::info!(user_id = identity.id, "login failed: {}", INVALID_PASSWORD);
            return Ok(SessionOutcome::denied(INVALID_PASSWORD));
        }

        tracing::info!(user_id = identity.id, "user logged in");
        Ok(SessionOutcome::Granted(self.grant(&identity)?))
    }

    fn grant(&self, identity: &Identity) -> Result<SessionGrant> {
        let token = self.tokens.issue(identity)?;
        let is_valid = self.tokens.verify(&token);
        Ok(SessionGrant {
            token,
            user_id: identity.id,
            is_valid,
        })
    }
}
