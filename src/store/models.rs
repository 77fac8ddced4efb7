//! Card records

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// Card payload for create and update
#[derive(Debug, Clone, Deserialize)]
pub struct NewCard {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl NewCard {
    pub fn missing_field(&self) -> Option<&'static str> {
        if self.name.trim().is_empty() {
            Some("Name cannot be blank")
        } else {
            None
        }
    }
}

/// Ownership link between a user and a card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCard {
    pub id: i64,
    pub user_id: i64,
    pub card: Card,
}
