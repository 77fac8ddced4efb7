//! Authentication models

use serde::{Deserialize, Serialize};

/// A registered user as held by the credential store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Store-assigned identifier, immutable once set
    pub id: i64,
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// bcrypt hash of the user's password
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Registration payload
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIdentity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl NewIdentity {
    /// Check the fields an identity cannot exist without
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.username.trim().is_empty() {
            Some("Username cannot be blank")
        } else if self.email.trim().is_empty() {
            Some("Email cannot be blank")
        } else if self.password.is_empty() {
            Some("Password cannot be blank")
        } else {
            None
        }
    }
}

/// Login credentials. Either identifier may be used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginAttempt {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// A missing password is an empty one, which never matches
    #[serde(default)]
    pub password: String,
}

/// Successful login or registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionGrant {
    pub token: String,
    pub user_id: i64,
    pub is_valid: bool,
}

/// Result of a login attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionOutcome {
    Granted(SessionGrant),
    Denied { message: String },
}

impl SessionOutcome {
    pub fn denied(message: impl Into<String>) -> Self {
        SessionOutcome::Denied {
            message: message.into(),
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, SessionOutcome::Granted(_))
    }
}
