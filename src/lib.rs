//! Cardkeep - users and cards behind a session-gated API
//!
//! This is the library interface for Cardkeep: the access gate, token and
//! session services, the store and the HTTP router.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod store;

pub use config::Config;
pub use error::Error;
