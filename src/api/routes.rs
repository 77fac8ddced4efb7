//! API route handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use super::extract::{parse_id, JsonBody, PathParam};
use super::server::SharedState;
use crate::auth::{LoginAttempt, NewIdentity, SessionOutcome};
use crate::error::{Error, Result};
use crate::store::{CredentialStore, NewCard};

/// `{"message": ...}` body used by every error and rejection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

fn user_not_found() -> Error {
    Error::NotFound("User not found".to_string())
}

fn card_not_found() -> Error {
    Error::NotFound("Card not found".to_string())
}

fn check_identity(candidate: &NewIdentity) -> Result<()> {
    match candidate.missing_field() {
        Some(reason) => Err(Error::BadRequest(reason.to_string())),
        None => Ok(()),
    }
}

fn check_card(card: &NewCard) -> Result<()> {
    match card.missing_field() {
        Some(reason) => Err(Error::BadRequest(reason.to_string())),
        None => Ok(()),
    }
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// Auth routes

pub async fn register(
    State(state): State<SharedState>,
    JsonBody(candidate): JsonBody<NewIdentity>,
) -> Result<impl IntoResponse> {
    let grant = state.sessions.register(candidate).await?;
    Ok((StatusCode::CREATED, Json(grant)))
}

pub async fn login(
    State(state): State<SharedState>,
    JsonBody(attempt): JsonBody<LoginAttempt>,
) -> Result<impl IntoResponse> {
    let outcome = state.sessions.login(attempt).await?;
    let status = match outcome {
        SessionOutcome::Granted(_) => StatusCode::OK,
        SessionOutcome::Denied { .. } => StatusCode::UNAUTHORIZED,
    };
    Ok((status, Json(outcome)))
}

// User routes

pub async fn list_users(State(state): State<SharedState>) -> Result<impl IntoResponse> {
    let users = state.store.list_users().await;
    if users.is_empty() {
        return Err(Error::NotFound("No users found".to_string()));
    }
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<SharedState>,
    JsonBody(candidate): JsonBody<NewIdentity>,
) -> Result<impl IntoResponse> {
    check_identity(&candidate)?;
    let hash = state
        .sessions
        .hasher()
        .hash_blocking(candidate.password.clone())
        .await?;
    let user = state.store.insert(candidate, hash).await?;
    tracing::info!(user_id = user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "user": user }))))
}

pub async fn get_user(
    State(state): State<SharedState>,
    PathParam(raw): PathParam<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw).ok_or_else(user_not_found)?;
    let user = state.store.find_by_id(id).await?.ok_or_else(user_not_found)?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<SharedState>,
    PathParam(raw): PathParam<String>,
    JsonBody(update): JsonBody<NewIdentity>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw).ok_or_else(user_not_found)?;
    check_identity(&update)?;
    let hash = state
        .sessions
        .hasher()
        .hash_blocking(update.password.clone())
        .await?;
    let user = state.store.update_identity(id, update, hash).await?;
    tracing::info!(user_id = user.id, "user updated");
    Ok(Json(user))
}

pub async fn delete_user(
    State(state): State<SharedState>,
    PathParam(raw): PathParam<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw).ok_or_else(user_not_found)?;
    state.store.delete_user(id).await?;
    tracing::info!(user_id = id, "user deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// An unknown user and a user without cards read the same
pub async fn get_user_cards(
    State(state): State<SharedState>,
    PathParam(raw): PathParam<String>,
) -> Result<impl IntoResponse> {
    let no_cards = || Error::NotFound("No cards found".to_string());
    let id = parse_id(&raw).ok_or_else(no_cards)?;
    let cards = match state.store.cards_for_user(id).await {
        Ok(cards) => cards,
        Err(Error::NotFound(_)) => Vec::new(),
        Err(e) => return Err(e),
    };
    if cards.is_empty() {
        return Err(no_cards());
    }
    Ok(Json(cards))
}

pub async fn add_card_to_user(
    State(state): State<SharedState>,
    PathParam(raw): PathParam<String>,
    JsonBody(card): JsonBody<NewCard>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw).ok_or_else(user_not_found)?;
    check_card(&card)?;
    let link = state.store.add_card_to_user(id, card).await?;
    Ok(Json(link))
}

// Card routes

pub async fn list_cards(State(state): State<SharedState>) -> Result<impl IntoResponse> {
    let cards = state.store.list_cards().await;
    if cards.is_empty() {
        return Err(Error::NotFound("No cards found".to_string()));
    }
    Ok(Json(cards))
}

pub async fn get_card(
    State(state): State<SharedState>,
    PathParam(raw): PathParam<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw).ok_or_else(card_not_found)?;
    Ok(Json(state.store.get_card(id).await?))
}

pub async fn create_card(
    State(state): State<SharedState>,
    JsonBody(card): JsonBody<NewCard>,
) -> Result<impl IntoResponse> {
    check_card(&card)?;
    let card = state.store.create_card(card).await;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "card": card }))))
}

pub async fn update_card(
    State(state): State<SharedState>,
    PathParam(raw): PathParam<String>,
    JsonBody(card): JsonBody<NewCard>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw).ok_or_else(card_not_found)?;
    check_card(&card)?;
    Ok(Json(state.store.update_card(id, card).await?))
}

pub async fn delete_card(
    State(state): State<SharedState>,
    PathParam(raw): PathParam<String>,
) -> Result<impl IntoResponse> {
    let id = parse_id(&raw).ok_or_else(card_not_found)?;
    state.store.delete_card(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
