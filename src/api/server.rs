//! HTTP API server

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{
    require_gate, Gate, PasswordHasher, SessionService, TokenService, VerificationMode,
};
use crate::config::Config;
use crate::error::Result;
use crate::store::MemoryStore;

use super::routes;

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub store: MemoryStore,
    pub sessions: SessionService,
    pub gate: Arc<Gate>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wire services from a validated configuration
    pub fn from_config(config: Config) -> Result<SharedState> {
        config.validate()?;

        let tokens = Arc::new(TokenService::new(
            config.auth.signing_key.as_bytes(),
            config.auth.token_ttl(),
        ));
        let store = MemoryStore::new();
        let sessions = SessionService::new(
            Arc::new(store.clone()),
            Arc::clone(&tokens),
            PasswordHasher::new(config.auth.password_cost),
        );
        let gate = Arc::new(Gate::standard(
            tokens,
            VerificationMode::from_flag(config.auth.verify_credentials),
        ));

        Ok(Arc::new(AppState {
            config,
            store,
            sessions,
            gate,
        }))
    }
}

/// Run the HTTP API server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = AppState::from_config(config)?;

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes, every one of them behind the gate
pub fn create_router(state: SharedState) -> Router {
    let gate = Arc::clone(&state.gate);

    Router::new()
        .route("/api/health", get(routes::health))
        // Auth routes
        .route("/api/auth/register", post(routes::register))
        .route("/api/auth/login", post(routes::login))
        // User routes
        .route("/api/users", get(routes::list_users).post(routes::create_user))
        .route(
            "/api/users/{id}",
            get(routes::get_user)
                .put(routes::update_user)
                .delete(routes::delete_user),
        )
        .route(
            "/api/users/{id}/cards",
            get(routes::get_user_cards).post(routes::add_card_to_user),
        )
        // Card routes
        .route("/api/cards", get(routes::list_cards).post(routes::create_card))
        .route(
            "/api/cards/{id}",
            get(routes::get_card)
                .put(routes::update_card)
                .delete(routes::delete_card),
        )
        // Middleware
        .layer(middleware::from_fn_with_state(gate, require_gate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
