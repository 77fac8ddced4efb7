//! In-memory store

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::models::{Card, NewCard, UserCard};
use super::CredentialStore;
use crate::auth::models::{Identity, NewIdentity};
use crate::error::{Error, Result};

#[derive(Default)]
struct Tables {
    users: BTreeMap<i64, Identity>,
    cards: BTreeMap<i64, Card>,
    links: Vec<UserCard>,
    last_user_id: i64,
    last_card_id: i64,
    last_link_id: i64,
}

impl Tables {
    /// First username, email or phone of `candidate` already held by a user
    /// other than `owner`
    fn unique_violation(&self, candidate: &NewIdentity, owner: Option<i64>) -> Option<String> {
        for user in self.users.values().filter(|user| Some(user.id) != owner) {
            if user.username == candidate.username {
                return Some(format!("Key (username)=({}) already exists.", candidate.username));
            }
            if user.email == candidate.email {
                return Some(format!("Key (email)=({}) already exists.", candidate.email));
            }
            if let (Some(existing), Some(phone)) = (&user.phone, &candidate.phone) {
                if existing == phone {
                    return Some(format!("Key (phone)=({}) already exists.", phone));
                }
            }
        }
        None
    }

    fn insert_card(&mut self, card: NewCard) -> Card {
        self.last_card_id += 1;
        let card = Card {
            id: self.last_card_id,
            name: card.name,
            description: card.description,
        };
        self.cards.insert(card.id, card.clone());
        card
    }
}

/// Identity and card tables held in process memory.
///
/// Ids are assigned sequentially from 1 and never reused.
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
        }
    }

    pub async fn list_users(&self) -> Vec<Identity> {
        self.tables.read().await.users.values().cloned().collect()
    }

    /// Remove a user along with their card links
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.users.remove(&id).is_none() {
            return Err(Error::NotFound("User not found".to_string()));
        }
        tables.links.retain(|link| link.user_id != id);
        Ok(())
    }

    /// Replace a user's profile and password hash. Id and creation time are kept.
    pub async fn update_identity(
        &self,
        id: i64,
        update: NewIdentity,
        password_hash: String,
    ) -> Result<Identity> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&id) {
            return Err(Error::NotFound("User not found".to_string()));
        }
        if let Some(detail) = tables.unique_violation(&update, Some(id)) {
            return Err(Error::Conflict(detail));
        }

        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("User not found".to_string()))?;
        user.name = update.name;
        user.last_name = update.last_name;
        user.email = update.email;
        user.username = update.username;
        user.phone = update.phone;
        user.password_hash = password_hash;
        Ok(user.clone())
    }

    pub async fn list_cards(&self) -> Vec<Card> {
        self.tables.read().await.cards.values().cloned().collect()
    }

    pub async fn get_card(&self, id: i64) -> Result<Card> {
        self.tables
            .read()
            .await
            .cards
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound("Card not found".to_string()))
    }

    pub async fn create_card(&self, card: NewCard) -> Card {
        self.tables.write().await.insert_card(card)
    }

    pub async fn update_card(&self, id: i64, update: NewCard) -> Result<Card> {
        let mut tables = self.tables.write().await;
        let card = tables
            .cards
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("Card not found".to_string()))?;
        card.name = update.name;
        card.description = update.description;
        let card = card.clone();

        for link in tables.links.iter_mut().filter(|link| link.card.id == id) {
            link.card = card.clone();
        }
        Ok(card)
    }

    pub async fn delete_card(&self, id: i64) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.cards.remove(&id).is_none() {
            return Err(Error::NotFound("Card not found".to_string()));
        }
        tables.links.retain(|link| link.card.id != id);
        Ok(())
    }

    /// Cards linked to a user
    pub async fn cards_for_user(&self, user_id: i64) -> Result<Vec<Card>> {
        let tables = self.tables.read().await;
        if !tables.users.contains_key(&user_id) {
            return Err(Error::NotFound("User not found".to_string()));
        }
        Ok(tables
            .links
            .iter()
            .filter(|link| link.user_id == user_id)
            .map(|link| link.card.clone())
            .collect())
    }

    /// Create a card and link it to an existing user
    pub async fn add_card_to_user(&self, user_id: i64, card: NewCard) -> Result<UserCard> {
        let mut tables = self.tables.write().await;
        if !tables.users.contains_key(&user_id) {
            return Err(Error::NotFound("User not found".to_string()));
        }
        let card = tables.insert_card(card);
        tables.last_link_id += 1;
        let link = UserCard {
            id: tables.last_link_id,
            user_id,
            card,
        };
        tables.links.push(link.clone());
        Ok(link)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for MemoryStore {
    fn clone(&self) -> Self {
        Self {
            tables: Arc::clone(&self.tables),
        }
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn insert(&self, candidate: NewIdentity, password_hash: String) -> Result<Identity> {
        let mut tables = self.tables.write().await;
        if let Some(detail) = tables.unique_violation(&candidate, None) {
            return Err(Error::Conflict(detail));
        }

        tables.last_user_id += 1;
        let identity = Identity {
            id: tables.last_user_id,
            name: candidate.name,
            last_name: candidate.last_name,
            email: candidate.email,
            username: candidate.username,
            phone: candidate.phone,
            password_hash,
            created_at: chrono::Utc::now(),
        };
        tables.users.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>> {
        Ok(self.tables.read().await.users.get(&id).cloned())
    }

    async fn find_by_username_or_email(
        &self,
        username: Option<&str>,
        email: Option<&str>,
    ) -> Result<Option<Identity>> {
        let username = username.filter(|u| !u.is_empty());
        let email = email.filter(|e| !e.is_empty());

        Ok(self
            .tables
            .read()
            .await
            .users
            .values()
            .find(|user| {
                username == Some(user.username.as_str()) || email == Some(user.email.as_str())
            })
            .cloned())
    }
}
