//! Storage for identities and cards

mod memory;
pub mod models;

pub use memory::MemoryStore;
pub use models::{Card, NewCard, UserCard};

use async_trait::async_trait;

use crate::auth::models::{Identity, NewIdentity};
use crate::error::Result;

/// Lookup and creation of identities, as used by the session service
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Store a new identity with an already-hashed password.
    ///
    /// Fails with `Error::Conflict` when the username, email or phone is
    /// already taken.
    async fn insert(&self, candidate: NewIdentity, password_hash: String) -> Result<Identity>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>>;

    /// First identity whose username or email matches. Blank identifiers
    /// never match.
    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Identity>>;
}
